//! Fan-in of worker results

use super::pool::WorkerResult;
use crate::error::{Error, Result};
use crate::gateway::BlockEvents;
use crate::progress::ProgressSink;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Merge results until the stream closes.
///
/// The first failure cancels the pool and wins; everything merged so far
/// and everything arriving afterwards is dropped. The stream is always
/// drained to the end so no worker is left waiting on a full channel.
/// Fewer than `expected` successes without a failure means the fetch was
/// cancelled or timed out.
pub(crate) async fn aggregate(
    mut results: mpsc::Receiver<WorkerResult>,
    expected: usize,
    cancel: &CancellationToken,
    timeout: Option<Duration>,
    progress: &dyn ProgressSink,
) -> Result<Vec<BlockEvents>> {
    let deadline = async move {
        match timeout {
            Some(t) => tokio::time::sleep(t).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(deadline);

    let mut merged = Vec::new();
    let mut failure: Option<Error> = None;
    let mut timed_out = false;
    let mut completed = 0usize;
    let mut discarded = 0usize;

    loop {
        tokio::select! {
            biased;
            next = results.recv() => {
                let Some(result) = next else { break };

                if failure.is_some() || timed_out {
                    discarded += 1;
                    continue;
                }

                match result.outcome {
                    Ok(blocks) => {
                        completed += 1;
                        merged.extend(blocks);
                        progress.advance(completed, expected);
                    }
                    Err(err) => {
                        match &result.query {
                            Some(query) => tracing::warn!(query = %query, "Query failed, cancelling fetch: {}", err),
                            None => tracing::warn!("Worker failed, cancelling fetch: {}", err),
                        }
                        cancel.cancel();
                        merged.clear();
                        failure = Some(err);
                    }
                }
            }
            _ = &mut deadline, if !timed_out && failure.is_none() => {
                tracing::warn!("Fetch timed out after {:?}, cancelling", timeout.unwrap_or_default());
                timed_out = true;
                cancel.cancel();
            }
        }
    }

    if discarded > 0 {
        tracing::debug!(discarded, "Dropped results after fetch was aborted");
    }

    if let Some(err) = failure {
        return Err(err);
    }

    if completed < expected {
        return Err(match timeout {
            Some(t) if timed_out => Error::Timeout(t),
            _ => Error::Cancelled,
        });
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::fetcher::plan::EventQuery;
    use crate::progress::TracingProgress;

    fn ok(height: u64) -> WorkerResult {
        WorkerResult {
            query: None,
            outcome: Ok(vec![BlockEvents::new(format!("{:x}", height), height)]),
        }
    }

    fn failed(status: u16) -> WorkerResult {
        WorkerResult {
            query: Some(EventQuery {
                event_type: "A".into(),
                start_height: 1,
                end_height: 1,
            }),
            outcome: Err(GatewayError::Status {
                status,
                body: String::new(),
            }
            .into()),
        }
    }

    #[tokio::test]
    async fn test_merges_all_successes() {
        let (tx, rx) = mpsc::channel(8);
        for h in [3, 1, 2] {
            tx.send(ok(h)).await.unwrap();
        }
        drop(tx);

        let cancel = CancellationToken::new();
        let merged = aggregate(rx, 3, &cancel, None, &TracingProgress)
            .await
            .unwrap();

        assert_eq!(merged.len(), 3);
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test]
    async fn test_first_error_wins_and_stream_is_drained() {
        let (tx, rx) = mpsc::channel(1);
        let cancel = CancellationToken::new();

        // capacity 1: this producer would block forever if the aggregator
        // stopped reading at the first error
        let producer = tokio::spawn(async move {
            tx.send(ok(1)).await.unwrap();
            tx.send(failed(500)).await.unwrap();
            tx.send(failed(502)).await.unwrap();
            for h in 2..10 {
                tx.send(ok(h)).await.unwrap();
            }
        });

        let err = aggregate(rx, 11, &cancel, None, &TracingProgress)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Gateway(GatewayError::Status { status: 500, .. })
        ));
        assert!(cancel.is_cancelled());
        producer.await.unwrap();
    }

    #[tokio::test]
    async fn test_short_stream_is_cancelled() {
        let (tx, rx) = mpsc::channel(4);
        tx.send(ok(1)).await.unwrap();
        drop(tx);

        let err = aggregate(rx, 2, &CancellationToken::new(), None, &TracingProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Cancelled));
    }

    #[tokio::test]
    async fn test_timeout_cancels_and_waits_for_close() {
        let (tx, rx) = mpsc::channel::<WorkerResult>(4);
        let cancel = CancellationToken::new();

        let worker_cancel = cancel.clone();
        let worker = tokio::spawn(async move {
            worker_cancel.cancelled().await;
            drop(tx);
        });

        let err = aggregate(
            rx,
            1,
            &cancel,
            Some(Duration::from_millis(20)),
            &TracingProgress,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Timeout(t) if t == Duration::from_millis(20)));
        worker.await.unwrap();
    }
}
