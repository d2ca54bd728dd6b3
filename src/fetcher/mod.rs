//! Main event fetcher coordinator
//!
//! A fetch runs in four steps:
//!
//! 1. [`range`] resolves open-ended heights against the chain head
//! 2. [`plan`] splits the range into per-type queries of bounded span
//! 3. the worker pool runs the queries concurrently against the gateway
//! 4. the aggregator merges results, or aborts everything on the first error
//!
//! Partial results are never returned: a fetch either yields the events of
//! every planned query or a single error.

mod aggregate;
pub mod plan;
mod pool;
pub mod range;

pub use plan::{EventQuery, QueryPlan};
pub use pool::WorkerResult;
pub use range::HeightRange;

use crate::config::FetchOptions;
use crate::error::{ConfigError, Result};
use crate::gateway::{BlockEvents, Gateway};
use crate::progress::{ProgressSink, TracingProgress};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Concurrent event fetcher over a shared gateway
pub struct EventFetcher<G: ?Sized> {
    /// Remote gateway, shared by all workers
    gateway: Arc<G>,
    /// Progress sink
    progress: Arc<dyn ProgressSink>,
}

impl<G> EventFetcher<G>
where
    G: Gateway + ?Sized + 'static,
{
    /// Create a fetcher that reports progress through `tracing`
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            progress: Arc::new(TracingProgress),
        }
    }

    /// Set the progress sink
    pub fn with_progress<P>(mut self, progress: P) -> Self
    where
        P: ProgressSink + 'static,
    {
        self.progress = Arc::new(progress);
        self
    }

    /// Resolve `start`/`end`/`last` into a concrete range.
    ///
    /// Zero means "not given" for both `start` and `end`; see
    /// [`range::resolve`].
    pub async fn calculate_start_end(&self, start: u64, end: u64, last: u64) -> Result<(u64, u64)> {
        let range = range::resolve(self.gateway.as_ref(), start, end, last).await?;
        Ok((range.start, range.end))
    }

    /// Fetch all events of `event_types` in `start..=end`.
    ///
    /// Result order is unspecified; use [`EventFetcher::fetch`] with
    /// [`FetchOptions::sorted`] for height order.
    pub async fn get(
        &self,
        event_types: &[String],
        start: u64,
        end: u64,
        max_span: u64,
        worker_count: usize,
    ) -> Result<Vec<BlockEvents>> {
        self.fetch(
            event_types,
            start,
            end,
            &FetchOptions::new(max_span, worker_count),
            CancellationToken::new(),
        )
        .await
    }

    /// Fetch with full control over options and cancellation.
    ///
    /// Cancelling `cancel` stops the pool and makes the call return
    /// [`crate::Error::Cancelled`] once every worker has exited.
    pub async fn fetch(
        &self,
        event_types: &[String],
        start: u64,
        end: u64,
        options: &FetchOptions,
        cancel: CancellationToken,
    ) -> Result<Vec<BlockEvents>> {
        if event_types.is_empty() {
            return Err(ConfigError::NoEventTypes.into());
        }
        options.validate()?;

        let queries = plan::plan(event_types, start, end, options.max_span)?;
        if queries.is_empty() {
            tracing::debug!("Nothing to fetch for blocks {} to {}", start, end);
            return Ok(Vec::new());
        }

        tracing::info!(
            "Fetching {} event type(s) from block {} to {} ({} queries, {} workers)",
            event_types.len(),
            start,
            end,
            queries.len(),
            options.workers
        );

        self.progress.start_progress("Fetching events...");
        let result = self.run(queries, options, cancel).await;
        self.progress.stop_progress();

        result
    }

    async fn run(
        &self,
        queries: QueryPlan,
        options: &FetchOptions,
        cancel: CancellationToken,
    ) -> Result<Vec<BlockEvents>> {
        let expected = queries.len();
        let token = cancel.child_token();
        // stop the pool if this future is dropped mid-fetch
        let _guard = token.clone().drop_guard();

        let results = pool::spawn(
            self.gateway.clone(),
            queries,
            options.workers,
            self.progress.clone(),
            token.clone(),
        );

        let mut events = aggregate::aggregate(
            results,
            expected,
            &token,
            options.timeout,
            self.progress.as_ref(),
        )
        .await?;

        if options.sort_by_height {
            events.sort_by_key(|block| block.height);
        }

        tracing::info!("Fetched events from {} blocks", events.len());
        Ok(events)
    }
}
