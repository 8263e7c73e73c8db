use std::path::PathBuf;

use anyhow::Context;
use ripple_config::RippleConfig;
use ripple_engine::{ChangeProcessor, JsonLinesSink};
use serde::Serialize;

use crate::output::output;

#[derive(Debug, Serialize)]
struct ScanResponse {
    documents: usize,
    state: PathBuf,
}

/// Handle `ripple scan`.
pub async fn handle(config: RippleConfig) -> anyhow::Result<()> {
    let processor = ChangeProcessor::from_config(&config, JsonLinesSink::stdout())?;
    let documents = tokio::task::spawn_blocking(move || processor.rescan())
        .await
        .context("scan task failed")??;

    output(&ScanResponse {
        documents,
        state: config.state.path,
    })
}
