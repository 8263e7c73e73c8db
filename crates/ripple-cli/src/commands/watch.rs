use std::sync::Arc;

use anyhow::Context;
use ripple_config::RippleConfig;
use ripple_engine::{BroadcastSink, ChangeProcessor, FanoutSink, JsonLinesSink};
use ripple_watch::{run_consumer, spawn_watcher};

use super::analysis;

/// Handle `ripple watch`.
pub async fn handle(config: RippleConfig) -> anyhow::Result<()> {
    let broadcast = BroadcastSink::new(config.broadcast.capacity);
    let listener = analysis::spawn_listener(&config.llm, broadcast.subscribe());

    let mut sink = FanoutSink::new();
    if config.broadcast.stdout {
        sink = sink.with(JsonLinesSink::stdout());
    }
    let sink = sink.with(broadcast);

    let processor = Arc::new(ChangeProcessor::from_config(&config, sink)?);
    let worker = Arc::clone(&processor);
    tokio::task::spawn_blocking(move || worker.bootstrap())
        .await
        .context("bootstrap task failed")??;

    let (watcher, rx) = spawn_watcher(&config)?;

    tokio::select! {
        emitted = run_consumer(rx, processor) => {
            tracing::info!(emitted, "processing queue closed");
        }
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for ctrl-c")?;
            tracing::info!("interrupted; shutting down");
        }
    }

    drop(watcher);
    if let Some(listener) = listener {
        listener.abort();
    }
    Ok(())
}
