//! Monitored corpus configuration.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_root() -> PathBuf {
    PathBuf::from("docs")
}

fn default_patterns() -> Vec<String> {
    vec!["*.md".into(), "*.markdown".into(), "*.txt".into()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    /// Flat directory holding the documents. Subdirectories are not scanned.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// File-name globs selecting text documents (e.g. `*.md`).
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            patterns: default_patterns(),
        }
    }
}

impl CorpusConfig {
    /// Compile `patterns` into a matcher over file names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the list is empty or a glob
    /// does not parse.
    pub fn matcher(&self) -> Result<DocumentMatcher, ConfigError> {
        if self.patterns.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "corpus.patterns".into(),
                reason: "at least one pattern is required".into(),
            });
        }

        let mut builder = GlobSetBuilder::new();
        for pattern in &self.patterns {
            let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidValue {
                field: "corpus.patterns".into(),
                reason: format!("'{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidValue {
            field: "corpus.patterns".into(),
            reason: e.to_string(),
        })?;
        Ok(DocumentMatcher { set })
    }
}

/// Decides whether a path names a corpus document, by file name only.
#[derive(Debug, Clone)]
pub struct DocumentMatcher {
    set: GlobSet,
}

impl DocumentMatcher {
    #[must_use]
    pub fn is_match(&self, path: &Path) -> bool {
        path.file_name().is_some_and(|name| self.set.is_match(name))
    }
}
