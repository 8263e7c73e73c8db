//! Semantic paragraph splitting.

use std::sync::LazyLock;

use regex::Regex;
use ripple_core::Paragraph;

/// Two or more newlines, possibly with whitespace-only lines in between.
static BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph boundary pattern is valid"));

/// Split raw document text into ordered, non-empty, trimmed paragraphs.
///
/// Line endings are normalized to `\n` before splitting, so CRLF and LF
/// versions of the same text produce the same hashes.
#[must_use]
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    BOUNDARY
        .split(normalized.trim())
        .filter(|segment| !segment.trim().is_empty())
        .map(Paragraph::new)
        .collect()
}
