//! Configuration management commands

use block_event_fetcher::ConfigFile;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show config file path
    Path,

    /// Add or replace a named network
    SetNetwork {
        /// Network name
        name: String,

        /// REST API base URL
        host: String,
    },

    /// Show current config
    Show,
}

pub fn handle(action: &ConfigCommands) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Path => {
            println!("{}", ConfigFile::default_path().display());
        }

        ConfigCommands::SetNetwork { name, host } => {
            if !(host.starts_with("http://") || host.starts_with("https://")) {
                anyhow::bail!("Host must start with http:// or https://, got {}", host);
            }
            let mut config = ConfigFile::load_default()?.unwrap_or_default();
            config.set_network(name, host);
            config.save_default()?;
            println!("Network {} saved to config file.", name);
        }

        ConfigCommands::Show => {
            let path = ConfigFile::default_path();
            if path.exists() {
                let content = std::fs::read_to_string(&path)?;
                println!("# {}\n", path.display());
                println!("{}", content);
            } else {
                println!("No config file found at: {}", path.display());
                println!("\nCreate one with:");
                println!("  event-fetch config set-network mainnet https://rest-mainnet.onflow.org");
            }
        }
    }

    Ok(())
}
