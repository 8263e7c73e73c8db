use ripple_config::RippleConfig;

use crate::cli::Commands;

mod analysis;
mod graph;
mod process;
mod scan;
mod watch;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, config: RippleConfig) -> anyhow::Result<()> {
    match command {
        Commands::Watch => watch::handle(config).await,
        Commands::Scan => scan::handle(config).await,
        Commands::Process(args) => process::handle(&args, config).await,
        Commands::Graph => graph::handle(&config).await,
    }
}
