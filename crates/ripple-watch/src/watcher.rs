//! Native or polling watcher over the corpus root.

use std::path::{Path, PathBuf};

use notify::{Config as NotifyConfig, Event, PollWatcher, RecommendedWatcher, RecursiveMode, Watcher};
use ripple_config::{DocumentMatcher, RippleConfig};
use tokio::sync::mpsc;

use crate::error::WatchError;

/// Keeps the underlying notify watcher alive. Dropping it stops notifications
/// and closes the queue once buffered paths are drained.
pub struct DocumentWatcher {
    root: PathBuf,
    _inner: Box<dyn Watcher + Send>,
}

impl DocumentWatcher {
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl std::fmt::Debug for DocumentWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentWatcher")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Start watching the configured corpus root (non-recursively).
///
/// Create and modify events for files matching the corpus patterns are
/// queued on the returned receiver, bounded by `watch.queue_capacity`.
///
/// # Errors
///
/// - [`WatchError::MissingRoot`] if the root is not a directory
/// - [`WatchError::Config`] if the document patterns are invalid
/// - [`WatchError::Notify`] if the watcher cannot be created or attached
pub fn spawn_watcher(
    config: &RippleConfig,
) -> Result<(DocumentWatcher, mpsc::Receiver<PathBuf>), WatchError> {
    let root = config.corpus.root.clone();
    if !root.is_dir() {
        return Err(WatchError::MissingRoot(root));
    }
    let matcher = config.corpus.matcher()?;
    let (tx, rx) = mpsc::channel(config.watch.queue_capacity);

    let handler = move |res: notify::Result<Event>| match res {
        Ok(event) => {
            for path in relevant_paths(&event, &matcher) {
                tracing::trace!(path = %path.display(), kind = ?event.kind, "queueing change");
                if tx.blocking_send(path).is_err() {
                    tracing::debug!("processing queue closed; dropping notification");
                    return;
                }
            }
        }
        Err(e) => tracing::warn!(error = %e, "watch error"),
    };

    let notify_err = |source: notify::Error| WatchError::Notify {
        path: root.clone(),
        source,
    };
    let mut inner: Box<dyn Watcher + Send> = if config.watch.poll {
        let notify_config = NotifyConfig::default().with_poll_interval(config.watch.poll_interval());
        Box::new(PollWatcher::new(handler, notify_config).map_err(notify_err)?)
    } else {
        Box::new(RecommendedWatcher::new(handler, NotifyConfig::default()).map_err(notify_err)?)
    };
    inner
        .watch(&root, RecursiveMode::NonRecursive)
        .map_err(notify_err)?;

    tracing::info!(
        root = %root.display(),
        poll = config.watch.poll,
        queue = config.watch.queue_capacity,
        "watching corpus"
    );
    Ok((DocumentWatcher { root, _inner: inner }, rx))
}

/// Paths of `event` worth a processing cycle: created or modified files that
/// match the corpus patterns.
fn relevant_paths(event: &Event, matcher: &DocumentMatcher) -> Vec<PathBuf> {
    if !(event.kind.is_create() || event.kind.is_modify()) {
        return Vec::new();
    }
    event
        .paths
        .iter()
        .filter(|p| matcher.is_match(p) && !p.is_dir())
        .cloned()
        .collect()
}
