//! block-event-fetcher - Fast parallel fetcher for on-chain events
//!
//! Splits a block height range into bounded queries, runs them on a fixed
//! pool of concurrent workers against an access node, and merges the results.
//! The first failing query aborts the whole fetch.
//!
//! # Example
//!
//! ```rust,no_run
//! use block_event_fetcher::{EventFetcher, RestGateway};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = RestGateway::new("https://rest-mainnet.onflow.org", 30)?;
//!     let fetcher = EventFetcher::new(Arc::new(gateway));
//!
//!     let (start, end) = fetcher.calculate_start_end(0, 0, 100).await?;
//!     let types = vec!["A.1654653399040a61.FlowToken.TokensDeposited".to_string()];
//!     let blocks = fetcher.get(&types, start, end, 25, 10).await?;
//!
//!     println!("Fetched events from {} blocks", blocks.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod fetcher;
pub mod gateway;
pub mod output;
pub mod progress;

// Re-exports for convenience
pub use config::{default_networks, ConfigFile, FetchOptions, NetworkConfig, Settings};
pub use error::{ConfigError, Error, GatewayError, GatewayResult, OutputError, Result};
pub use fetcher::{EventFetcher, EventQuery, HeightRange, QueryPlan, WorkerResult};
pub use gateway::{BlockEvents, Event, Gateway, RestGateway};
pub use output::{create_writer, CsvWriter, JsonWriter, OutputFormat, OutputWriter, TextWriter};
pub use progress::{ProgressSink, SpinnerProgress, TracingProgress};
pub use tokio_util::sync::CancellationToken;
