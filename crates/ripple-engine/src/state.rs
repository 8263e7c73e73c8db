//! JSON-file persistence for the paragraph snapshot.
//!
//! The store has no locking of its own; [`ChangeProcessor`](crate::ChangeProcessor)
//! serializes every load/diff/save sequence.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use ripple_core::Snapshot;

use crate::error::StateError;

/// Persists the snapshot as `{doc: [[text, hash], ...]}`.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted snapshot.
    ///
    /// A missing, unreadable, or corrupt file yields an empty snapshot.
    #[must_use]
    pub fn load(&self) -> Snapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no persisted snapshot");
                return Snapshot::new();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "snapshot unreadable; starting empty");
                return Snapshot::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "snapshot corrupt; starting empty");
            Snapshot::new()
        })
    }

    /// Overwrite the persisted snapshot.
    ///
    /// Writes to a temporary file in the target directory and renames it over
    /// the old file, so readers see either the old or the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StateError`] if the directory, temp file, or rename fails.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StateError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|source| self.io_error(source))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|source| self.io_error(source))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, snapshot)?;
            writer.flush().map_err(|source| self.io_error(source))?;
        }
        tmp.as_file()
            .sync_all()
            .map_err(|source| self.io_error(source))?;
        tmp.persist(&self.path)
            .map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), documents = snapshot.len(), "snapshot saved");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StateError {
        StateError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ripple_core::Paragraph;

    use super::*;

    fn sample() -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert(
            "RefundPolicy.md",
            vec![Paragraph::new("Refund Policy"), Paragraph::new("Within 14 days.")],
        );
        snapshot.insert("Support_Script.md", vec![Paragraph::new("Greet the customer.")]);
        snapshot
    }

    #[test]
    fn missing_file_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StateStore::new(tmp.path().join("absent.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("state.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(StateStore::new(&path).load().is_empty());
    }

    #[test]
    fn wrong_shape_loads_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("state.json");
        fs::write(&path, r#"{"A.md": "not a list"}"#).unwrap();
        assert!(StateStore::new(&path).load().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StateStore::new(tmp.path().join("nested/dir/state.json"));
        let snapshot = sample();

        store.save(&snapshot).unwrap();
        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let tmp = tempfile::tempdir().unwrap();
        let store = StateStore::new(tmp.path().join("state.json"));
        store.save(&sample()).unwrap();

        let mut smaller = Snapshot::new();
        smaller.insert("Only.md", vec![Paragraph::new("x")]);
        store.save(&smaller).unwrap();

        assert_eq!(store.load(), smaller);
        let leftovers: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1, "temp files must not be left behind");
    }

    #[test]
    fn reads_text_hash_pair_format() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("state.json");
        fs::write(&path, r#"{"A.md": [["Hello", "abc123"]]}"#).unwrap();

        let snapshot = StateStore::new(&path).load();
        let paragraphs = snapshot.get("A.md").unwrap();
        assert_eq!(paragraphs[0].text, "Hello");
        assert_eq!(paragraphs[0].hash, "abc123");
    }
}
