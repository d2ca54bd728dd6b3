//! Gateway over a Flow Access node's REST API
//!
//! Only the two read endpoints the fetcher needs are wrapped:
//! - `GET /v1/blocks?height=sealed` for the chain head
//! - `GET /v1/events?type=..&start_height=..&end_height=..` for event ranges

use super::{BlockEvents, Event, Gateway};
use crate::config::NetworkConfig;
use crate::error::{ConfigError, GatewayError, GatewayResult, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

/// REST client for a single access node
#[derive(Debug, Clone)]
pub struct RestGateway {
    /// Base URL without trailing slash
    host: String,
    /// HTTP client
    http: reqwest::Client,
    /// Request timeout (for error reporting)
    timeout_secs: u64,
}

impl RestGateway {
    /// Create a gateway for the given host
    pub fn new(host: &str, timeout_secs: u64) -> Result<Self> {
        let host = host.trim().trim_end_matches('/');
        if !(host.starts_with("http://") || host.starts_with("https://")) {
            return Err(ConfigError::InvalidHost(host.to_string()).into());
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            host: host.to_string(),
            http,
            timeout_secs,
        })
    }

    /// Create a gateway from a network entry
    pub fn from_network(network: &NetworkConfig, timeout_secs: u64) -> Result<Self> {
        Self::new(&network.host, timeout_secs)
    }

    /// Get the host URL
    pub fn host(&self) -> &str {
        &self.host
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> GatewayResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.host, path);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GatewayError::RateLimited(url));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: truncate(&body, 512),
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.classify(e))?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    fn classify(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout_secs)
        } else if err.is_connect() {
            GatewayError::ConnectionFailed(err.to_string())
        } else {
            GatewayError::Http(err)
        }
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn latest_block_height(&self) -> GatewayResult<u64> {
        let blocks: Vec<RestBlock> = self
            .get_json("/v1/blocks", &[("height", "sealed".to_string())])
            .await?;

        let block = blocks
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::InvalidResponse("empty block list".to_string()))?;

        parse_u64("height", &block.header.height)
    }

    async fn get_events(
        &self,
        event_type: &str,
        start_height: u64,
        end_height: u64,
    ) -> GatewayResult<Vec<BlockEvents>> {
        let blocks: Vec<RestBlockEvents> = self
            .get_json(
                "/v1/events",
                &[
                    ("type", event_type.to_string()),
                    ("start_height", start_height.to_string()),
                    ("end_height", end_height.to_string()),
                ],
            )
            .await?;

        blocks.into_iter().map(BlockEvents::try_from).collect()
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct RestBlock {
    header: RestBlockHeader,
}

#[derive(Debug, Deserialize)]
struct RestBlockHeader {
    height: String,
}

#[derive(Debug, Deserialize)]
struct RestBlockEvents {
    block_id: String,
    block_height: String,
    #[serde(default)]
    block_timestamp: Option<String>,
    #[serde(default)]
    events: Vec<RestEvent>,
}

#[derive(Debug, Deserialize)]
struct RestEvent {
    #[serde(rename = "type")]
    event_type: String,
    transaction_id: String,
    transaction_index: String,
    event_index: String,
    #[serde(default)]
    payload: String,
}

impl TryFrom<RestBlockEvents> for BlockEvents {
    type Error = GatewayError;

    fn try_from(block: RestBlockEvents) -> GatewayResult<Self> {
        let events = block
            .events
            .into_iter()
            .map(|e| {
                Ok(Event {
                    transaction_index: parse_u32("transaction_index", &e.transaction_index)?,
                    event_index: parse_u32("event_index", &e.event_index)?,
                    event_type: e.event_type,
                    transaction_id: e.transaction_id,
                    payload: e.payload,
                })
            })
            .collect::<GatewayResult<Vec<_>>>()?;

        Ok(BlockEvents {
            height: parse_u64("block_height", &block.block_height)?,
            block_id: block.block_id,
            timestamp: block.block_timestamp,
            events,
        })
    }
}

fn parse_u64(field: &str, value: &str) -> GatewayResult<u64> {
    value
        .parse()
        .map_err(|_| GatewayError::InvalidResponse(format!("{} is not a number: {:?}", field, value)))
}

fn parse_u32(field: &str, value: &str) -> GatewayResult<u32> {
    value
        .parse()
        .map_err(|_| GatewayError::InvalidResponse(format!("{} is not a number: {:?}", field, value)))
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
