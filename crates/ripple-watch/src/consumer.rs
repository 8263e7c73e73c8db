//! Single consumer of the processing queue.

use std::path::PathBuf;
use std::sync::Arc;

use ripple_engine::ChangeProcessor;
use tokio::sync::mpsc;

/// Drain `rx` in arrival order, running one blocking processing cycle per
/// path. A failed cycle is logged and abandoned; the loop continues.
///
/// Returns the number of events emitted once the queue closes.
pub async fn run_consumer(mut rx: mpsc::Receiver<PathBuf>, processor: Arc<ChangeProcessor>) -> usize {
    let mut emitted = 0;
    while let Some(path) = rx.recv().await {
        let worker = Arc::clone(&processor);
        let shown = path.display().to_string();
        match tokio::task::spawn_blocking(move || worker.process(&path)).await {
            Ok(Ok(Some(_))) => emitted += 1,
            Ok(Ok(None)) => tracing::debug!(path = %shown, "no change"),
            Ok(Err(e)) => tracing::error!(path = %shown, error = %e, "processing cycle failed"),
            Err(e) => tracing::error!(path = %shown, error = %e, "processing task panicked"),
        }
    }
    tracing::debug!(emitted, "processing queue closed");
    emitted
}
