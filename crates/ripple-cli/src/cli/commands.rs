use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Default, Subcommand)]
pub enum Commands {
    /// Bootstrap the snapshot, then watch the corpus and report changes.
    #[default]
    Watch,
    /// Rebuild the snapshot from the current corpus without reporting changes.
    Scan,
    /// Run one processing cycle for a single document now.
    Process(ProcessArgs),
    /// Print the current dependency graph as JSON.
    Graph,
}

#[derive(Clone, Debug, Args)]
pub struct ProcessArgs {
    /// Document to process (inside the corpus root).
    pub path: PathBuf,
}
