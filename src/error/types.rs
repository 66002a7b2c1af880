//! Error types
//!
//! Defines the error taxonomy for the password gate. Expected login outcomes
//! (wrong password, no password configured) are not errors and never appear here.

use std::io;

use thiserror::Error;

/// Password hashing errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(error: argon2::password_hash::Error) -> Self {
        AuthError::Hashing(error.to_string())
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(error: bcrypt::BcryptError) -> Self {
        AuthError::Hashing(error.to_string())
    }
}

/// General gate error that encompasses all error types
#[derive(Debug, Error)]
pub enum GateError {
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Template error: {0}")]
    Render(#[from] askama::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
