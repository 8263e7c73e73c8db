//! # ripple-engine
//!
//! Change detection, dependency-graph construction, and impact resolution over
//! a flat corpus of short text documents.
//!
//! One processing cycle, run by [`ChangeProcessor`]:
//!
//! 1. split the changed document into paragraphs and diff them against the
//!    stored [`Snapshot`](ripple_core::Snapshot) by content hash
//! 2. rebuild the full dependency graph from current corpus contents
//! 3. pick the relevant paragraphs of every document that depends on the
//!    changed one
//! 4. assemble a [`ChangeEvent`](ripple_core::ChangeEvent) and hand it to the
//!    [`EventSink`]
//! 5. persist the updated snapshot, only after delivery succeeded
//!
//! The snapshot is guarded by a single mutex held from step 1 to step 5, so
//! cycles for different documents serialize against it.

pub mod assemble;
pub mod corpus;
pub mod differ;
pub mod error;
pub mod graph;
pub mod impact;
pub mod processor;
pub mod sink;
pub mod splitter;
pub mod state;

pub use assemble::assemble;
pub use corpus::{DocumentSource, FsCorpus, MemoryCorpus, SettlePolicy, read_settled};
pub use differ::{DocumentDiff, diff_document, summarize};
pub use error::{EngineError, SinkError, StateError};
pub use graph::build_graph;
pub use impact::resolve_impacts;
pub use processor::ChangeProcessor;
pub use sink::{BroadcastSink, EventSink, FanoutSink, JsonLinesSink};
pub use splitter::split_paragraphs;
pub use state::StateStore;
