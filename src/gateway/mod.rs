//! Remote gateway abstraction and its REST implementation

mod model;
mod rest;

use async_trait::async_trait;

use crate::error::GatewayResult;

pub use model::{BlockEvents, Event};
pub use rest::RestGateway;

/// Query interface of a remote chain node.
///
/// Implementations must be safe to call from many workers at once; the
/// fetcher shares a single instance behind an `Arc`. Retries and backoff,
/// if any, belong to the implementation.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Height of the latest sealed block
    async fn latest_block_height(&self) -> GatewayResult<u64>;

    /// Events of one type emitted in blocks `start_height..=end_height`
    async fn get_events(
        &self,
        event_type: &str,
        start_height: u64,
        end_height: u64,
    ) -> GatewayResult<Vec<BlockEvents>>;
}
