//! File-watching and processing-queue configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const fn default_queue_capacity() -> usize {
    64
}

const fn default_settle_interval_ms() -> u64 {
    100
}

const fn default_settle_max_reads() -> u32 {
    10
}

const fn default_poll_interval_ms() -> u64 {
    1_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchConfig {
    /// Bound of the notification queue between the watcher and the processor.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Delay between consecutive reads while waiting for a file to settle.
    #[serde(default = "default_settle_interval_ms")]
    pub settle_interval_ms: u64,

    /// Upper bound on reads while waiting for two identical digests.
    #[serde(default = "default_settle_max_reads")]
    pub settle_max_reads: u32,

    /// Use a polling watcher instead of native OS notifications
    /// (network mounts, WSL drives).
    #[serde(default)]
    pub poll: bool,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            settle_interval_ms: default_settle_interval_ms(),
            settle_max_reads: default_settle_max_reads(),
            poll: false,
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl WatchConfig {
    #[must_use]
    pub const fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval_ms)
    }

    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}
