//! Error types for the portfolio contact service.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field-level validation failures are not errors here: they are ordinary values
//! produced by the validator (see [`crate::domain::FieldError`]).

use thiserror::Error;

/// Errors that can occur when handing an email to a [`MessageSender`](crate::sender::MessageSender).
#[derive(Error, Debug)]
pub enum SendError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Email API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to encode or decode JSON
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The send did not resolve in time
    #[error("Send timed out")]
    Timeout,

    /// Authentication with the email API failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Generic send error with context
    #[error("Send error: {0}")]
    Other(String),
}

/// Errors that can occur while rendering an email body.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Template lookup or evaluation failed
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with SendError
pub type SendResult<T> = Result<T, SendError>;

/// Convenience type alias for Results with RenderError
pub type RenderResult<T> = Result<T, RenderError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
