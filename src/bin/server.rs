//! rolegate REST API Server
//!
//! Run with: cargo run --features server --bin rolegate-server
//!
//! Endpoints:
//!   GET  /health                 - Health check
//!   GET  /me/permissions         - Capabilities of the calling user
//!   GET  /permissions/:role      - Capabilities of a role
//!   POST /decide                 - Evaluate an access request
//!   POST /authorize/:operation   - Check the caller against an operation policy

use rolegate::config::{Command, ServerConfig, USAGE};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("rolegate=info,tower_http=info")),
        )
        .init();

    let config = match ServerConfig::load() {
        Ok(Command::Serve(config)) => config,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(e) = rolegate::server::serve(config).await {
        tracing::error!(error = %e, "server failed");
        std::process::exit(1);
    }
}
