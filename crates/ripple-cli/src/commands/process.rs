use anyhow::Context;
use ripple_config::RippleConfig;
use ripple_engine::{ChangeProcessor, EngineError, JsonLinesSink};
use ripple_llm::ImpactAnalyzer;

use super::analysis;
use crate::cli::commands::ProcessArgs;

/// Handle `ripple process <PATH>`.
///
/// The emitted event is printed as one JSON line. When analysis is enabled
/// the feedback follows on the next line.
pub async fn handle(args: &ProcessArgs, config: RippleConfig) -> anyhow::Result<()> {
    let processor = ChangeProcessor::from_config(&config, JsonLinesSink::stdout())?;
    let path = args.path.clone();
    let event = tokio::task::spawn_blocking(move || -> Result<_, EngineError> {
        processor.bootstrap()?;
        processor.process(&path)
    })
    .await
    .context("processing task failed")??;

    let Some(event) = event else {
        tracing::info!(path = %args.path.display(), "no paragraph changes");
        return Ok(());
    };

    if let Some(client) = analysis::client(&config.llm) {
        let feedback = client.analyze(&event).await;
        analysis::report(&event, &feedback);
    }
    Ok(())
}
