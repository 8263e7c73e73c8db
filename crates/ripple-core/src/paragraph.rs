use serde::{Deserialize, Serialize};

use crate::text::content_hash;

/// Minimal diffable unit of a document.
///
/// Identity is the content hash: two paragraphs with the same hash are the same
/// paragraph wherever they appear. Persisted as a `[text, hash]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Paragraph {
    pub text: String,
    pub hash: String,
}

impl Paragraph {
    /// Build a paragraph from raw text. Surrounding whitespace is trimmed before
    /// hashing.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let text = text.trim().to_string();
        let hash = content_hash(&text);
        Self { text, hash }
    }
}

impl From<(String, String)> for Paragraph {
    fn from((text, hash): (String, String)) -> Self {
        Self { text, hash }
    }
}

impl From<Paragraph> for (String, String) {
    fn from(p: Paragraph) -> Self {
        (p.text, p.hash)
    }
}
