//! # ripple-config
//!
//! Layered configuration loading for Ripple using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RIPPLE_*` prefix, `__` as separator)
//! 2. Project-level `.ripple/config.toml`
//! 3. User-level `~/.config/ripple/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RIPPLE_CORPUS__ROOT` -> `corpus.root`, `RIPPLE_LLM__API_KEY` -> `llm.api_key`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use ripple_config::RippleConfig;
//!
//! let config = RippleConfig::load_with_dotenv().expect("config");
//! println!("watching {}", config.corpus.root.display());
//! ```

mod broadcast;
mod corpus;
mod error;
mod llm;
mod state;
mod watch;

pub use broadcast::BroadcastConfig;
pub use corpus::{CorpusConfig, DocumentMatcher};
pub use error::ConfigError;
pub use llm::LlmConfig;
pub use state::StateConfig;
pub use watch::WatchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RippleConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub watch: WatchConfig,
    #[serde(default)]
    pub broadcast: BroadcastConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

impl RippleConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.env` from the current directory, then [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction or validation fails.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".ripple/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("RIPPLE_").split("__"))
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watch.queue_capacity == 0 {
            return Err(invalid("watch.queue_capacity", "must be at least 1"));
        }
        if self.watch.settle_max_reads == 0 {
            return Err(invalid("watch.settle_max_reads", "must be at least 1"));
        }
        if self.broadcast.capacity == 0 {
            return Err(invalid("broadcast.capacity", "must be at least 1"));
        }
        self.corpus.matcher()?;
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ripple").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
