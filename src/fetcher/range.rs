//! Resolving user-supplied heights into a concrete range

use crate::error::Result;
use crate::gateway::Gateway;

/// A resolved inclusive height range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightRange {
    pub start: u64,
    pub end: u64,
}

impl HeightRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }
}

/// Resolve `start`/`end`, where zero means "not given".
///
/// - no start: the last `last` blocks up to the chain head
/// - no end: `start` up to the chain head
/// - both: returned as given, without checking `start <= end`
pub async fn resolve<G>(gateway: &G, start: u64, end: u64, last: u64) -> Result<HeightRange>
where
    G: Gateway + ?Sized,
{
    if start == 0 {
        let latest = gateway.latest_block_height().await?;
        let from = match latest.checked_sub(last) {
            Some(from) => from,
            None => {
                tracing::warn!(
                    "Requested last {} blocks but chain head is {}, starting from 0",
                    last,
                    latest
                );
                0
            }
        };
        return Ok(HeightRange::new(from, latest));
    }

    if end == 0 {
        let latest = gateway.latest_block_height().await?;
        return Ok(HeightRange::new(start, latest));
    }

    Ok(HeightRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, GatewayError, GatewayResult};
    use crate::gateway::BlockEvents;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct HeadOnly {
        latest: Option<u64>,
        calls: AtomicUsize,
    }

    impl HeadOnly {
        fn at(latest: u64) -> Self {
            Self {
                latest: Some(latest),
                calls: AtomicUsize::new(0),
            }
        }

        fn broken() -> Self {
            Self {
                latest: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl Gateway for HeadOnly {
        async fn latest_block_height(&self) -> GatewayResult<u64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.latest
                .ok_or_else(|| GatewayError::ConnectionFailed("node down".into()))
        }

        async fn get_events(&self, _: &str, _: u64, _: u64) -> GatewayResult<Vec<BlockEvents>> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_last_blocks_from_head() {
        let gw = HeadOnly::at(100);
        assert_eq!(resolve(&gw, 0, 0, 10).await.unwrap(), HeightRange::new(90, 100));
    }

    #[tokio::test]
    async fn test_open_end_uses_head() {
        let gw = HeadOnly::at(100);
        assert_eq!(resolve(&gw, 5, 0, 10).await.unwrap(), HeightRange::new(5, 100));
    }

    #[tokio::test]
    async fn test_explicit_range_skips_gateway() {
        let gw = HeadOnly::at(100);
        assert_eq!(resolve(&gw, 5, 50, 10).await.unwrap(), HeightRange::new(5, 50));
        // malformed input passes through unchanged
        assert_eq!(resolve(&gw, 50, 5, 10).await.unwrap(), HeightRange::new(50, 5));
        assert_eq!(gw.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_last_beyond_head_clamps_to_zero() {
        let gw = HeadOnly::at(100);
        assert_eq!(resolve(&gw, 0, 0, 500).await.unwrap(), HeightRange::new(0, 100));
    }

    #[tokio::test]
    async fn test_gateway_error_propagates() {
        let gw = HeadOnly::broken();
        let err = resolve(&gw, 0, 0, 10).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Gateway(GatewayError::ConnectionFailed(_))
        ));
    }
}
