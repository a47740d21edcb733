//! Server configuration from defaults, environment and command line
//!
//! Later sources override earlier ones: defaults, then `ROLEGATE_HOST`,
//! `PORT` and `ROLEGATE_CORS`, then flags.

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

pub const USAGE: &str = "rolegate-server - role-based access decision server

USAGE:
    rolegate-server [OPTIONS]

OPTIONS:
    -H, --host <HOST>  Bind address (default: 0.0.0.0)
    -p, --port <PORT>  Listen on PORT (default: 3000)
        --no-cors      Disable the permissive CORS layer
    -h, --help         Show this help message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST.to_string(), port: DEFAULT_PORT, cors_permissive: true }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve(ServerConfig),
    Help,
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in
    /// production and a map in tests.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ROLEGATE_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.port = parse_port("PORT", &port)?;
        }
        if let Some(cors) = lookup("ROLEGATE_CORS") {
            self.cors_permissive = parse_bool("ROLEGATE_CORS", &cors)?;
        }
        Ok(self)
    }

    /// Apply command line flags (without the program name).
    pub fn with_args<I, S>(mut self, args: I) -> Result<Command, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--host" | "-H" => {
                    self.host = args.next().ok_or(ConfigError::MissingValue("--host"))?;
                }
                "--port" | "-p" => {
                    let v = args.next().ok_or(ConfigError::MissingValue("--port"))?;
                    self.port = parse_port("--port", &v)?;
                }
                "--no-cors" => self.cors_permissive = false,
                "--help" | "-h" => return Ok(Command::Help),
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }
        Ok(Command::Serve(self))
    }

    /// Defaults, then process environment, then process arguments.
    pub fn load() -> Result<Command, ConfigError> {
        ServerConfig::default()
            .with_env(|k| std::env::var(k).ok())?
            .with_args(std::env::args().skip(1))
    }
}

fn parse_port(key: &'static str, v: &str) -> Result<u16, ConfigError> {
    v.parse().map_err(|_| ConfigError::InvalidValue { key, value: v.to_string() })
}

fn parse_bool(key: &'static str, v: &str) -> Result<bool, ConfigError> {
    match v {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value: v.to_string() }),
    }
}
