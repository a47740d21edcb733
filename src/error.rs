//! Error types for rolegate

use thiserror::Error;

/// Rejection produced by the authorization guard.
///
/// The two variants stay distinct all the way to the caller: no session
/// is never reported as a permission failure and vice versa.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("not authenticated")]
    Unauthenticated,

    #[error("{user_id} ({role}) is not permitted to {action}")]
    Forbidden { user_id: String, role: String, action: String },
}

impl AuthError {
    /// HTTP status code for this rejection.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Unauthenticated => 401,
            AuthError::Forbidden { .. } => 403,
        }
    }

    /// Short public message. Does not reveal which permission was missing.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated => "Unauthorized",
            AuthError::Forbidden { .. } => "Forbidden",
        }
    }
}

/// Invalid server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
}

/// Result type alias for guard operations
pub type Result<T> = std::result::Result<T, AuthError>;
