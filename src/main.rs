//! event-fetch CLI - Parallel on-chain event fetcher

mod cli;

use block_event_fetcher::ConfigFile;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(EnvFilter::new(filter))
        .init();

    match &cli.command {
        Commands::Config { action } => cli::config::handle(action),
        Commands::Networks { action } => {
            let config = ConfigFile::load_default()?.unwrap_or_default();
            cli::networks::handle(action, &config)
        }
        Commands::Events { action } => {
            let config = ConfigFile::load_default()?.unwrap_or_default();
            cli::events::handle(action, &config, cli.quiet).await
        }
    }
}
