//! Change-event fan-out configuration.

use serde::{Deserialize, Serialize};

const fn default_capacity() -> usize {
    256
}

const fn default_stdout() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BroadcastConfig {
    /// Buffered events per subscriber before the slowest one starts lagging.
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Also write every change event to stdout as one JSON line.
    #[serde(default = "default_stdout")]
    pub stdout: bool,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            stdout: default_stdout(),
        }
    }
}
