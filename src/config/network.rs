//! Access node network configuration

use serde::{Deserialize, Serialize};

/// A named access node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Network name used on the command line
    pub name: String,
    /// REST API base URL
    pub host: String,
    /// Optional note about the network
    #[serde(default)]
    pub note: Option<String>,
}

impl NetworkConfig {
    /// Create a new network entry
    pub fn new(name: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            note: None,
        }
    }

    /// Builder-style setter for note
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Public access nodes and the local emulator
pub fn default_networks() -> Vec<NetworkConfig> {
    vec![
        NetworkConfig::new("mainnet", "https://rest-mainnet.onflow.org")
            .with_note("public mainnet access node"),
        NetworkConfig::new("testnet", "https://rest-testnet.onflow.org")
            .with_note("public testnet access node"),
        NetworkConfig::new("emulator", "http://localhost:8888").with_note("local emulator"),
    ]
}
