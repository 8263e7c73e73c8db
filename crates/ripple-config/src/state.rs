//! Snapshot persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from(".ripple/state/paragraphs.json")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateConfig {
    /// JSON file holding the paragraph snapshot.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
