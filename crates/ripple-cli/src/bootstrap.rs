use anyhow::{Context, bail};
use ripple_config::RippleConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, apply CLI overrides, and check the corpus root.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<RippleConfig> {
    let mut config = RippleConfig::load_with_dotenv().context("failed to load configuration")?;
    apply_overrides(&mut config, flags);

    if !config.corpus.root.is_dir() {
        bail!(
            "corpus root '{}' does not exist or is not a directory",
            config.corpus.root.display()
        );
    }
    Ok(config)
}

fn apply_overrides(config: &mut RippleConfig, flags: &GlobalFlags) {
    if let Some(root) = &flags.root {
        config.corpus.root.clone_from(root);
    }
    if let Some(state) = &flags.state {
        config.state.path.clone_from(state);
    }
}
