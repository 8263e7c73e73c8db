//! # ripple-watch
//!
//! Connects filesystem notifications to the change processor.
//!
//! The notify callback runs on the watcher's own thread and pushes matching
//! paths into a bounded queue with `blocking_send`, so a slow processor
//! applies backpressure instead of growing memory. A single consumer drains
//! the queue in arrival order and runs one processing cycle at a time.

mod consumer;
mod error;
mod watcher;

pub use consumer::run_consumer;
pub use error::WatchError;
pub use watcher::{DocumentWatcher, spawn_watcher};
