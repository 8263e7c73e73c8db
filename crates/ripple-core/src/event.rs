//! Outbound records: the change event and the LLM collaborator's feedback.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical record describing one detected edit and its downstream impact.
///
/// `impacted_docs` only ever names documents holding an edge that points at
/// `changed_doc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub changed_doc: String,
    pub summary: String,
    pub old_snippets: Vec<String>,
    pub new_snippets: Vec<String>,
    pub impacted_docs: BTreeMap<String, Vec<String>>,
}

/// Severity grade returned by the LLM collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// Best-effort structured feedback for a `ChangeEvent`.
///
/// Missing fields deserialize to defaults so that partially-formed replies
/// still produce a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactFeedback {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default)]
    pub impacted_docs: Vec<String>,
}

impl ImpactFeedback {
    /// Fixed value substituted when a reply cannot be used.
    #[must_use]
    pub fn fallback(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            severity: Severity::Medium,
            impacted_docs: Vec::new(),
        }
    }
}
