//! # ripple-llm
//!
//! Best-effort impact analysis of change events by a hosted LLM.
//!
//! The analyzer never fails: transport errors and unusable replies are
//! replaced by a fixed [`ImpactFeedback`] so callers can log the result and
//! move on.

mod error;
mod extract;
mod gemini;
mod http;
mod prompt;

pub use error::LlmError;
pub use extract::{PARSE_FAILED_SUMMARY, extract_feedback};
pub use gemini::GeminiClient;
pub use prompt::build_prompt;

use std::future::Future;

use ripple_core::{ChangeEvent, ImpactFeedback};

/// Produces structured feedback for a change event.
pub trait ImpactAnalyzer: Send + Sync {
    /// Analyze `event`. Implementations substitute a fallback value instead
    /// of returning errors.
    fn analyze(&self, event: &ChangeEvent) -> impl Future<Output = ImpactFeedback> + Send;
}
