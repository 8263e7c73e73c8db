//! The per-notification processing cycle.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use ripple_config::RippleConfig;
use ripple_core::{ChangeEvent, DependencyEdge, Snapshot};

use crate::assemble::assemble;
use crate::corpus::{DocumentSource, FsCorpus, SettlePolicy, read_settled};
use crate::differ::diff_document;
use crate::error::EngineError;
use crate::graph::build_graph;
use crate::impact::resolve_impacts;
use crate::sink::EventSink;
use crate::splitter::split_paragraphs;
use crate::state::StateStore;

/// Owns the snapshot and runs one detect, graph, impact, emit, persist cycle
/// per change notification.
///
/// All methods are blocking. Cycles are serialized by the snapshot mutex; the
/// settle wait happens before the lock is taken.
pub struct ChangeProcessor {
    corpus: Box<dyn DocumentSource>,
    store: StateStore,
    sink: Box<dyn EventSink>,
    settle: SettlePolicy,
    snapshot: Mutex<Snapshot>,
}

impl ChangeProcessor {
    /// Create a processor with an empty in-memory snapshot.
    ///
    /// Call [`Self::bootstrap`] to load (or seed) persisted state.
    pub fn new(
        corpus: impl DocumentSource + 'static,
        store: StateStore,
        sink: impl EventSink + 'static,
        settle: SettlePolicy,
    ) -> Self {
        Self {
            corpus: Box::new(corpus),
            store,
            sink: Box::new(sink),
            settle,
            snapshot: Mutex::new(Snapshot::new()),
        }
    }

    /// Build a processor over the configured filesystem corpus and state file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] if the document patterns are invalid.
    pub fn from_config(
        config: &RippleConfig,
        sink: impl EventSink + 'static,
    ) -> Result<Self, EngineError> {
        let corpus = FsCorpus::from_config(&config.corpus)?;
        Ok(Self::new(
            corpus,
            StateStore::new(config.state.path.clone()),
            sink,
            SettlePolicy::from_config(&config.watch),
        ))
    }

    pub fn corpus(&self) -> &dyn DocumentSource {
        self.corpus.as_ref()
    }

    /// Load persisted state. When nothing usable was stored, seed the
    /// snapshot from the current corpus without emitting events, and save it.
    ///
    /// Returns the number of documents in the snapshot afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if seeding needs to read the corpus and that
    /// fails, or if the seeded snapshot cannot be saved.
    pub fn bootstrap(&self) -> Result<usize, EngineError> {
        let loaded = self.store.load();
        let mut snapshot = self.lock();
        *snapshot = loaded;
        if snapshot.is_empty() {
            tracing::info!("no stored snapshot; seeding from current corpus");
            self.seed(&mut snapshot)?;
            self.store.save(&snapshot)?;
        }
        tracing::info!(documents = snapshot.len(), "snapshot ready");
        Ok(snapshot.len())
    }

    /// Rebuild the snapshot from the current corpus without emitting events,
    /// then save. Documents no longer in the corpus are dropped. Returns the
    /// number of documents scanned.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if listing, reading, or saving fails.
    pub fn rescan(&self) -> Result<usize, EngineError> {
        let mut fresh = Snapshot::new();
        let scanned = self.seed(&mut fresh)?;
        let mut snapshot = self.lock();
        *snapshot = fresh;
        self.store.save(&snapshot)?;
        tracing::info!(documents = scanned, "corpus rescanned");
        Ok(scanned)
    }

    /// Process a change notification for `path`.
    ///
    /// Returns the emitted event, or `None` when the document's paragraph set
    /// did not change.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotADocument`] if `path` is outside the corpus
    /// - [`EngineError::Missing`] if the document vanished before it was read
    /// - any read, delivery, or persistence failure of the cycle
    pub fn process(&self, path: &Path) -> Result<Option<ChangeEvent>, EngineError> {
        let name = self.corpus.document_name(path)?;
        let text = read_settled(self.corpus.as_ref(), &name, self.settle)?
            .ok_or_else(|| EngineError::Missing(name.clone()))?;
        self.process_text(&name, &text)
    }

    /// Run the cycle for document `name` whose current content is `text`.
    ///
    /// The event is delivered before the snapshot is touched. If delivery
    /// fails nothing changes, so the same change is reported again next time.
    /// If only the save fails, the in-memory snapshot has already advanced and
    /// the error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if graph construction, delivery, or
    /// persistence fails.
    pub fn process_text(&self, name: &str, text: &str) -> Result<Option<ChangeEvent>, EngineError> {
        let mut snapshot = self.lock();

        let Some(diff) = diff_document(name, text, &snapshot) else {
            tracing::debug!(doc = name, "no paragraph changes");
            return Ok(None);
        };

        let edges = build_graph(self.corpus.as_ref())?;
        let impacted = resolve_impacts(name, &edges, self.corpus.as_ref())?;
        let event = assemble(&diff, impacted);

        self.sink.emit(&event)?;

        snapshot.insert(diff.doc_name, diff.paragraphs);
        self.store.save(&snapshot)?;

        tracing::info!(
            doc = name,
            removed = event.old_snippets.len(),
            added = event.new_snippets.len(),
            impacted = event.impacted_docs.len(),
            summary = %event.summary,
            "change event emitted"
        );
        Ok(Some(event))
    }

    /// Current dependency graph of the corpus.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the corpus cannot be listed or read.
    pub fn graph(&self) -> Result<Vec<DependencyEdge>, EngineError> {
        build_graph(self.corpus.as_ref())
    }

    /// Copy of the in-memory snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.lock().clone()
    }

    fn seed(&self, snapshot: &mut Snapshot) -> Result<usize, EngineError> {
        let mut scanned = 0;
        for name in self.corpus.names()? {
            let Some(text) = self.corpus.read(&name)? else {
                continue;
            };
            snapshot.insert(name, split_paragraphs(&text));
            scanned += 1;
        }
        Ok(scanned)
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot> {
        self.snapshot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
