//! Error types for block-event-fetcher

use std::time::Duration;
use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// Remote gateway errors
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Output errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// The caller cancelled the fetch before it completed
    #[error("Fetch cancelled")]
    Cancelled,

    /// The fetch did not complete within the configured timeout
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),

    /// A worker task panicked while processing a query
    #[error("Worker panicked: {0}")]
    WorkerPanicked(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the remote gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timeout after {0}s")]
    Timeout(u64),

    #[error("Rate limited by node: {0}")]
    RateLimited(String),

    #[error("Node returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from node: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Max span must be at least 1, got {0}")]
    InvalidMaxSpan(u64),

    #[error("Worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    #[error("At least one event type is required")]
    NoEventTypes,

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("Invalid host URL: {0}")]
    InvalidHost(String),

    #[error("Invalid config file: {0}")]
    InvalidFile(String),

    #[error("Config file parse error: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Output-related errors
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write JSON: {0}")]
    JsonWrite(String),

    #[error("Failed to write CSV: {0}")]
    CsvWrite(String),

    #[error("Failed to create output file: {0}")]
    FileCreate(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for gateway calls
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

impl Error {
    /// Returns the underlying gateway error, if this is one
    pub fn as_gateway(&self) -> Option<&GatewayError> {
        match self {
            Error::Gateway(e) => Some(e),
            _ => None,
        }
    }

    /// Whether this error was caused by invalid configuration
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_keeps_kind() {
        let err: Error = GatewayError::Status {
            status: 503,
            body: "unavailable".into(),
        }
        .into();

        assert!(matches!(
            err.as_gateway(),
            Some(GatewayError::Status { status: 503, .. })
        ));
        assert!(err.to_string().contains("unavailable"));
        assert!(!err.is_config());
    }

    #[test]
    fn test_config_error_message() {
        let err: Error = ConfigError::InvalidWorkerCount(0).into();
        assert!(err.is_config());
        assert!(err.to_string().contains("Worker count"));
    }
}
