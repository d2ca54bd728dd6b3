//! Configuration file handling

use super::{default_max_span, default_networks, default_workers, FetchOptions, NetworkConfig};
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Custom or overridden networks
    #[serde(default)]
    pub networks: Vec<NetworkConfig>,
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Default worker count
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Default number of blocks per query
    #[serde(default = "default_max_span")]
    pub batch: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Sort fetched events by height
    #[serde(default)]
    pub sort: bool,
}

fn default_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            batch: default_max_span(),
            timeout_seconds: default_timeout(),
            sort: false,
        }
    }
}

impl Settings {
    /// Fetch options seeded from these settings
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions::new(self.batch, self.workers).sorted(self.sort)
    }

    /// Per-request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ConfigFile {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("block-event-fetcher")
            .join("config.toml")
    }

    /// Load from default path
    pub fn load_default() -> Result<Option<Self>> {
        let path = Self::default_path();
        if path.exists() {
            Ok(Some(Self::load(&path)?))
        } else {
            Ok(None)
        }
    }

    /// Load from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::InvalidFile(format!("{}: {}", path.display(), e)))?;

        let config: Self = toml::from_str(&content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Save to a specific path
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::InvalidFile(format!("Failed to create directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::InvalidFile(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Save to default path
    pub fn save_default(&self) -> Result<()> {
        self.save(&Self::default_path())
    }

    /// Look up a network by name; entries in the file shadow the defaults
    pub fn network(&self, name: &str) -> Option<NetworkConfig> {
        self.networks
            .iter()
            .find(|n| n.name == name)
            .cloned()
            .or_else(|| default_networks().into_iter().find(|n| n.name == name))
    }

    /// All known networks, file entries first
    pub fn all_networks(&self) -> Vec<NetworkConfig> {
        let mut networks = self.networks.clone();
        for network in default_networks() {
            if !networks.iter().any(|n| n.name == network.name) {
                networks.push(network);
            }
        }
        networks
    }

    /// Add or replace a network entry
    pub fn set_network(&mut self, name: &str, host: &str) {
        match self.networks.iter_mut().find(|n| n.name == name) {
            Some(network) => network.host = host.to_string(),
            None => self.networks.push(NetworkConfig::new(name, host)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
[settings]
workers = 4
batch = 250
sort = true

[[networks]]
name = "mainnet"
host = "https://my-node.example.com"

[[networks]]
name = "previewnet"
host = "https://rest-previewnet.onflow.org"
"#;

        let config: ConfigFile = toml::from_str(toml).unwrap();
        assert_eq!(config.settings.workers, 4);
        assert_eq!(config.settings.batch, 250);
        assert_eq!(config.settings.timeout_seconds, 30);
        assert!(config.settings.sort);

        // file entry overrides the default mainnet host
        assert_eq!(
            config.network("mainnet").unwrap().host,
            "https://my-node.example.com"
        );
        assert!(config.network("previewnet").is_some());
        assert!(config.network("emulator").is_some());
        assert!(config.network("nope").is_none());
        assert_eq!(config.all_networks().len(), 4);
    }

    #[test]
    fn test_settings_to_fetch_options() {
        let settings = Settings {
            workers: 2,
            batch: 50,
            timeout_seconds: 5,
            sort: true,
        };
        let options = settings.fetch_options();
        assert_eq!(options.max_span, 50);
        assert_eq!(options.workers, 2);
        assert!(options.sort_by_height);
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ConfigFile::default();
        config.set_network("local", "http://127.0.0.1:8888");
        config.set_network("local", "http://127.0.0.1:9999");
        config.save(&path).unwrap();

        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded.networks.len(), 1);
        assert_eq!(loaded.network("local").unwrap().host, "http://127.0.0.1:9999");
    }

    #[test]
    fn test_default_path() {
        let path = ConfigFile::default_path();
        assert!(path.to_string_lossy().contains("block-event-fetcher"));
    }
}
