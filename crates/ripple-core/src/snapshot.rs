//! Last-known paragraph state of every corpus document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::paragraph::Paragraph;

/// Mapping from document name to its ordered paragraphs, as last processed.
///
/// Serialized transparently as `{ "<doc>": [[text, hash], ...], ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    documents: BTreeMap<String, Vec<Paragraph>>,
}

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paragraphs recorded for `doc`, if the document has been seen.
    #[must_use]
    pub fn get(&self, doc: &str) -> Option<&[Paragraph]> {
        self.documents.get(doc).map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, doc: &str) -> bool {
        self.documents.contains_key(doc)
    }

    /// Replace the paragraph list for `doc` wholesale. Returns the previous list.
    pub fn insert(
        &mut self,
        doc: impl Into<String>,
        paragraphs: Vec<Paragraph>,
    ) -> Option<Vec<Paragraph>> {
        self.documents.insert(doc.into(), paragraphs)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document names in sorted order.
    pub fn documents(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }
}
