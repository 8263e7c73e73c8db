use std::path::PathBuf;

use clap::Parser;

pub mod commands;

pub use commands::Commands;

/// Top-level CLI parser for the `ripple` binary.
#[derive(Debug, Parser)]
#[command(
    name = "ripple",
    version,
    about = "Ripple - detect document edits and the documents they affect"
)]
pub struct Cli {
    /// Defaults to `watch`.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Corpus directory (overrides `corpus.root`)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Snapshot file (overrides `state.path`)
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Flags that adjust loaded configuration.
#[derive(Clone, Debug, Default)]
pub struct GlobalFlags {
    pub root: Option<PathBuf>,
    pub state: Option<PathBuf>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            root: self.root.clone(),
            state: self.state.clone(),
        }
    }
}
