//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM operations
///
/// `Init` means no request was sent. Every other variant comes from the remote
/// call and is passed through unchanged.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Error initializing model: {0}")]
    Init(String),

    #[error("Rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Check if the client could not be constructed
    pub fn is_init(&self) -> bool {
        matches!(self, LlmError::Init(_))
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }
}
