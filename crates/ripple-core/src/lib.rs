//! # ripple-core
//!
//! Core types and helpers shared across all Ripple crates.
//!
//! This crate provides:
//! - Paragraph and snapshot types (the only persisted mutable state)
//! - Dependency edges between corpus documents
//! - The canonical `ChangeEvent` record and LLM feedback types
//! - Text helpers: content digests, word tokenization, truncation
//! - Cross-cutting error types

pub mod errors;
pub mod event;
pub mod graph;
pub mod paragraph;
pub mod snapshot;
pub mod text;

pub use errors::CoreError;
pub use event::{ChangeEvent, ImpactFeedback, Severity};
pub use graph::{DependencyEdge, RefKind};
pub use paragraph::Paragraph;
pub use snapshot::Snapshot;
