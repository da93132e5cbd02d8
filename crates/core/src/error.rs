//! Core error types

use thiserror::Error;

/// Core error type for msgsign
#[derive(Debug, Error)]
pub enum Error {
    /// An override variable held a value that could not be interpreted
    #[error("Invalid value for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    /// The global subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
