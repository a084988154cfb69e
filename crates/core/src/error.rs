//! Error types for the Shopwise retrieval core.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: input validation, backend calls, generation, and
//! configuration.

use thiserror::Error;

/// Unified error type for the Shopwise retrieval core.
///
/// All fallible functions in the workspace return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated. At the
/// gateway and summarization boundaries errors are converted into outcome
/// envelopes, never raised past them.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input caught before any network call (empty query,
    /// unsupported location, missing required configuration)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any failure surfaced by a backend network call (timeout, auth
    /// failure, malformed response)
    #[error("Backend error: {0}")]
    Backend(String),

    /// The generation capability rejected the input content
    #[error("Invalid input for summarization: {0}")]
    GenerationValidation(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Anything else
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
