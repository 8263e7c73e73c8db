use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("corpus root does not exist or is not a directory: {0}")]
    MissingRoot(PathBuf),

    #[error("failed to watch {path}: {source}")]
    Notify {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error(transparent)]
    Config(#[from] ripple_config::ConfigError),
}
