use std::time::Duration;

use thiserror::Error;

/// Outcome of a single failed login attempt. None of these are fatal; the
/// user may submit again.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    ConnectionFailed(#[from] sqlx::Error),

    #[error("employee not found")]
    NotFound,

    #[error("credential store did not answer within {0:?}")]
    TimedOut(Duration),
}

impl AuthError {
    /// Dialog title shown to the user for this failure.
    pub fn title(&self) -> &'static str {
        match self {
            AuthError::ConnectionFailed(_) => "Connection Refused",
            AuthError::NotFound => "Authentication Error",
            AuthError::TimedOut(_) => "Connection Timed Out",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

pub type AppResult<T> = Result<T, AppError>;
