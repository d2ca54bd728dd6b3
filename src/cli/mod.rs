//! CLI command modules
//!
//! Each subcommand has its own module with argument definitions and handlers.

pub mod config;
pub mod events;
pub mod networks;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "event-fetch")]
#[command(
    version,
    about = "Parallel on-chain event fetcher for Flow access nodes"
)]
#[command(after_help = r#"EXAMPLES:
    # Deposits in the last 100 sealed blocks on mainnet
    event-fetch events get A.1654653399040a61.FlowToken.TokensDeposited --last 100

    # Two event types over an explicit range, 20 workers, sorted JSON
    event-fetch events get A.1654653399040a61.FlowToken.TokensDeposited \
                           A.1654653399040a61.FlowToken.TokensWithdrawn \
                --start 40000000 --end 40010000 -w 20 --sort --format json -o events.json

    # Query the local emulator
    event-fetch events get A.f8d6e0586b0a20c7.Counter.Incremented --network emulator

CONFIG FILE:
    Default: ~/.config/block-event-fetcher/config.toml
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch events from an access node
    Events {
        #[command(subcommand)]
        action: events::EventsCommands,
    },

    /// Show known access node networks
    Networks {
        #[command(subcommand)]
        action: networks::NetworkCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigCommands,
    },
}
