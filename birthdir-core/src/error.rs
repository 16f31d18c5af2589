//! Error types for birthdir.

use thiserror::Error;

use crate::reminder::ReminderId;

/// Errors that can occur in birthdir operations.
#[derive(Error, Debug)]
pub enum BirthdirError {
    #[error("Invalid reminder: {0}")]
    Validation(String),

    #[error("Reminder not found: {0}")]
    NotFound(ReminderId),

    #[error("Holiday provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for birthdir operations.
pub type BirthdirResult<T> = Result<T, BirthdirError>;
