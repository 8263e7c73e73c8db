use anyhow::Context;
use ripple_config::RippleConfig;
use ripple_engine::{FsCorpus, build_graph};

use crate::output::output;

/// Handle `ripple graph`.
pub async fn handle(config: &RippleConfig) -> anyhow::Result<()> {
    let corpus = FsCorpus::from_config(&config.corpus)?;
    let edges = tokio::task::spawn_blocking(move || build_graph(&corpus))
        .await
        .context("graph task failed")??;
    output(&edges)
}
