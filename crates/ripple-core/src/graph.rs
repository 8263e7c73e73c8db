use std::fmt;

use serde::{Deserialize, Serialize};

/// How a dependency between two documents was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefKind {
    /// The source document mentions the target's file name as a whole word.
    Explicit,
    /// The source document contains enough of the target name's keywords.
    Implicit,
}

impl RefKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Implicit => "implicit",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed, confidence-weighted reference `from_doc -> to_doc`.
///
/// Derived state: recomputed from document contents on every change and never
/// persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub from_doc: String,
    pub to_doc: String,
    #[serde(rename = "ref_type")]
    pub kind: RefKind,
    pub confidence: f64,
}
