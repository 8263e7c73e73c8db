//! Engine error types.
//!
//! Soft failures (corrupt snapshot, missing dependent document) never surface
//! as errors; they are handled where they occur. Everything here aborts the
//! current processing cycle only.

use std::path::PathBuf;

use thiserror::Error;

/// Snapshot persistence failures.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Change-event delivery failures.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink io error: {0}")]
    Io(#[from] std::io::Error),

    /// One or more sinks of a fan-out failed; the first failure is reported.
    #[error("{failed} of {total} sinks failed: {first}")]
    Fanout {
        failed: usize,
        total: usize,
        first: Box<SinkError>,
    },
}

/// Errors that abandon a single processing cycle.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The notified path is not a document of the monitored corpus.
    #[error("not a corpus document: {0}")]
    NotADocument(PathBuf),

    /// The notified document could not be read (removed before processing).
    #[error("document disappeared before it could be read: {0}")]
    Missing(String),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Config(#[from] ripple_config::ConfigError),

    #[error(transparent)]
    Core(#[from] ripple_core::CoreError),
}
