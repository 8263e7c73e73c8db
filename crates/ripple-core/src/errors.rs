//! Cross-cutting error types for Ripple.
//!
//! Component-specific errors (`EngineError`, `StateError`, `LlmError`) live in
//! their own crates. The CLI converges them into `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Ripple crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A document name could not be derived from a path.
    #[error("Invalid document name: {0}")]
    InvalidDocumentName(String),
}
