//! Tolerant JSON extraction from free-form model output.

use std::sync::LazyLock;

use regex::Regex;
use ripple_core::ImpactFeedback;

/// Summary of the fallback returned when no usable JSON is found.
pub const PARSE_FAILED_SUMMARY: &str = "JSON parse failed";

static OBJECT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

/// Parse feedback from `raw`: the whole text as JSON, else the span from the
/// first `{` to the last `}`, else the fixed fallback.
#[must_use]
pub fn extract_feedback(raw: &str) -> ImpactFeedback {
    let raw = raw.trim();
    if let Ok(feedback) = serde_json::from_str(raw) {
        return feedback;
    }
    if let Some(block) = OBJECT_BLOCK.find(raw)
        && let Ok(feedback) = serde_json::from_str(block.as_str())
    {
        return feedback;
    }
    tracing::debug!(chars = raw.len(), "no parseable JSON in LLM reply");
    ImpactFeedback::fallback(PARSE_FAILED_SUMMARY)
}
