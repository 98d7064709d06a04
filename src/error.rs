//! Error types for the Tour Sales Assistant.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to a remote store (catalog sheet or document folder).
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Credentials are valid but access to the resource was denied
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    BodyError(String),
}

impl StoreError {
    /// Whether a retry of the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::HttpError(_) | Self::Timeout | Self::RateLimitExceeded => true,
            Self::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }
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

/// Errors raised while turning raw document bytes into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// Plain text was not valid UTF-8
    #[error("Invalid UTF-8 text: {0}")]
    Encoding(String),

    /// Word-processor container could not be parsed
    #[error("DOCX parse error: {0}")]
    Docx(String),

    /// PDF could not be parsed
    #[error("PDF parse error: {0}")]
    Pdf(String),
}

/// Errors returned by the language-model collaborator.
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key configured
    #[error("Language model API key is not configured")]
    MissingApiKey,

    /// Transport or API failure
    #[error("Language model request failed: {0}")]
    Request(#[from] StoreError),

    /// Response contained no choices
    #[error("Language model returned an empty response")]
    EmptyResponse,
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ExtractError
pub type ExtractResult<T> = Result<T, ExtractError>;

/// Convenience type alias for Results with LlmError
pub type LlmResult<T> = Result<T, LlmError>;
