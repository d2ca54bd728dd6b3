//! Configuration types

mod file;
mod network;

pub use file::{ConfigFile, Settings};
pub use network::{default_networks, NetworkConfig};

use crate::error::{ConfigError, Result};
use std::time::Duration;

/// Tunables for a single fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Maximum number of blocks covered by one query
    pub max_span: u64,
    /// Number of concurrent workers
    pub workers: usize,
    /// Sort the merged result by block height
    pub sort_by_height: bool,
    /// Abort the whole fetch after this long
    pub timeout: Option<Duration>,
}

pub(crate) fn default_max_span() -> u64 {
    25
}

pub(crate) fn default_workers() -> usize {
    10
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_span: default_max_span(),
            workers: default_workers(),
            sort_by_height: false,
            timeout: None,
        }
    }
}

impl FetchOptions {
    /// Options with the given span and worker count, everything else default
    pub fn new(max_span: u64, workers: usize) -> Self {
        Self {
            max_span,
            workers,
            ..Default::default()
        }
    }

    /// Builder-style setter for max_span
    pub fn with_max_span(mut self, max_span: u64) -> Self {
        self.max_span = max_span;
        self
    }

    /// Builder-style setter for workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Builder-style setter for sort_by_height
    pub fn sorted(mut self, sort: bool) -> Self {
        self.sort_by_height = sort;
        self
    }

    /// Builder-style setter for timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Reject spans and worker counts the pool cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_span < 1 {
            return Err(ConfigError::InvalidMaxSpan(self.max_span).into());
        }
        if self.workers < 1 {
            return Err(ConfigError::InvalidWorkerCount(self.workers).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let options = FetchOptions::default();
        assert_eq!(options.max_span, 25);
        assert_eq!(options.workers, 10);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero() {
        let err = FetchOptions::new(0, 4).validate().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Config(ConfigError::InvalidMaxSpan(0))
        ));

        let err = FetchOptions::new(10, 0).validate().unwrap_err();
        assert!(matches!(
            err,
            crate::Error::Config(ConfigError::InvalidWorkerCount(0))
        ));
    }

    #[test]
    fn test_builder() {
        let options = FetchOptions::default()
            .with_max_span(100)
            .with_workers(3)
            .sorted(true)
            .with_timeout(Duration::from_secs(5));

        assert_eq!(options.max_span, 100);
        assert_eq!(options.workers, 3);
        assert!(options.sort_by_height);
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
    }
}
