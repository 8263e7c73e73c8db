//! LLM client error types.

use thiserror::Error;

/// Failures talking to the LLM endpoint. Surfaced only through the fallback
/// feedback summary.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The reply carried no candidate text.
    #[error("empty response: {0}")]
    EmptyResponse(String),

    /// No API key configured.
    #[error("missing API key")]
    MissingApiKey,
}
