//! Access node network commands

use block_event_fetcher::ConfigFile;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum NetworkCommands {
    /// List all known networks
    List,
}

pub fn handle(action: &NetworkCommands, config: &ConfigFile) -> anyhow::Result<()> {
    match action {
        NetworkCommands::List => {
            let networks = config.all_networks();
            println!("NETWORKS ({})\n", networks.len());

            for network in networks {
                println!(
                    "  {:<12} {}{}",
                    network.name,
                    network.host,
                    network
                        .note
                        .as_ref()
                        .map(|n| format!(" ({})", n))
                        .unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
