//! Document access for the monitored corpus.
//!
//! The corpus is a single flat directory. Documents are identified by file
//! name; subdirectories are never scanned.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use ripple_config::{CorpusConfig, DocumentMatcher, WatchConfig};
use ripple_core::CoreError;
use ripple_core::text::content_hash;

use crate::error::EngineError;

/// Read access to corpus documents by name.
pub trait DocumentSource: Send + Sync {
    /// Names of all documents currently in the corpus, sorted.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the corpus cannot be listed.
    fn names(&self) -> Result<Vec<String>, EngineError>;

    /// Current text of `name`, or `None` if the document does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] for failures other than absence.
    fn read(&self, name: &str) -> Result<Option<String>, EngineError>;

    /// Map a notified path to a document name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if `path` cannot name a corpus document.
    fn document_name(&self, path: &Path) -> Result<String, EngineError> {
        file_name(path)
    }
}

impl<T: DocumentSource + ?Sized> DocumentSource for Arc<T> {
    fn names(&self) -> Result<Vec<String>, EngineError> {
        (**self).names()
    }

    fn read(&self, name: &str) -> Result<Option<String>, EngineError> {
        (**self).read(name)
    }

    fn document_name(&self, path: &Path) -> Result<String, EngineError> {
        (**self).document_name(path)
    }
}

fn file_name(path: &Path) -> Result<String, EngineError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| CoreError::InvalidDocumentName(path.display().to_string()).into())
}

/// Corpus backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct FsCorpus {
    root: PathBuf,
    matcher: DocumentMatcher,
}

impl FsCorpus {
    #[must_use]
    pub const fn new(root: PathBuf, matcher: DocumentMatcher) -> Self {
        Self { root, matcher }
    }

    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the document patterns are invalid.
    pub fn from_config(config: &CorpusConfig) -> Result<Self, EngineError> {
        Ok(Self::new(config.root.clone(), config.matcher()?))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn in_root(&self, path: &Path) -> bool {
        let Some(parent) = path.parent() else {
            return false;
        };
        if parent.as_os_str().is_empty() {
            return true;
        }
        match (parent.canonicalize(), self.root.canonicalize()) {
            (Ok(parent), Ok(root)) => parent == root,
            _ => parent == self.root,
        }
    }
}

impl DocumentSource for FsCorpus {
    fn names(&self) -> Result<Vec<String>, EngineError> {
        let entries = fs::read_dir(&self.root).map_err(|source| EngineError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(root = %self.root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_ok_and(|ft| ft.is_file()) || !self.matcher.is_match(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Option<String>, EngineError> {
        let path = self.root.join(name);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(EngineError::Io { path, source }),
        }
    }

    fn document_name(&self, path: &Path) -> Result<String, EngineError> {
        if !self.matcher.is_match(path) || !self.in_root(path) {
            return Err(EngineError::NotADocument(path.to_path_buf()));
        }
        file_name(path)
    }
}

/// In-memory corpus, mutable through a shared reference.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    docs: RwLock<BTreeMap<String, String>>,
}

impl MemoryCorpus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a corpus from `(name, text)` pairs.
    #[must_use]
    pub fn with_documents<'a>(docs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let corpus = Self::new();
        for (name, text) in docs {
            corpus.set(name, text);
        }
        corpus
    }

    pub fn set(&self, name: &str, text: &str) {
        self.docs
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(name.to_string(), text.to_string());
    }

    pub fn remove(&self, name: &str) {
        self.docs
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(name);
    }
}

impl DocumentSource for MemoryCorpus {
    fn names(&self) -> Result<Vec<String>, EngineError> {
        Ok(self
            .docs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .keys()
            .cloned()
            .collect())
    }

    fn read(&self, name: &str) -> Result<Option<String>, EngineError> {
        Ok(self
            .docs
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(name)
            .cloned())
    }
}

/// How long to wait for a just-modified file to stop changing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    pub interval: Duration,
    pub max_reads: u32,
}

impl SettlePolicy {
    /// Single read, no waiting.
    pub const IMMEDIATE: Self = Self {
        interval: Duration::ZERO,
        max_reads: 1,
    };

    #[must_use]
    pub const fn from_config(config: &WatchConfig) -> Self {
        Self {
            interval: config.settle_interval(),
            max_reads: config.settle_max_reads,
        }
    }
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::from_config(&WatchConfig::default())
    }
}

/// Read `name` until two consecutive reads have the same content digest.
///
/// Blocks the calling thread between reads. After `max_reads` reads without
/// settling, the last content read is returned.
///
/// # Errors
///
/// Returns [`EngineError`] if a read fails.
pub fn read_settled(
    source: &dyn DocumentSource,
    name: &str,
    policy: SettlePolicy,
) -> Result<Option<String>, EngineError> {
    let mut current = source.read(name)?;
    for _ in 1..policy.max_reads {
        std::thread::sleep(policy.interval);
        let next = source.read(name)?;
        let settled = match (&current, &next) {
            (Some(a), Some(b)) => content_hash(a) == content_hash(b),
            (None, None) => true,
            _ => false,
        };
        current = next;
        if settled {
            return Ok(current);
        }
    }
    if policy.max_reads > 1 {
        tracing::debug!(doc = name, reads = policy.max_reads, "document did not settle; using last read");
    }
    Ok(current)
}
