//! Fixed-size worker pool draining a shared job queue
//!
//! A feeder task pushes the plan into a bounded queue, `workers` tasks pull
//! from it and push one [`WorkerResult`] per query into the result channel.
//! A supervisor joins every task before releasing the last result sender,
//! so the receiver only sees end-of-stream once nothing can write anymore.

use super::plan::{EventQuery, QueryPlan};
use crate::error::{Error, Result};
use crate::gateway::{BlockEvents, Gateway};
use crate::progress::ProgressSink;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Outcome of a single query
#[derive(Debug)]
pub struct WorkerResult {
    /// Query that produced this result, `None` when a worker died
    pub query: Option<EventQuery>,
    pub outcome: Result<Vec<BlockEvents>>,
}

type JobQueue = Arc<Mutex<mpsc::Receiver<EventQuery>>>;

/// Start the pool and return the result stream.
///
/// Workers stop claiming jobs and abandon in-flight calls once `cancel`
/// fires. The caller must drain the returned receiver until it yields `None`.
pub(crate) fn spawn<G>(
    gateway: Arc<G>,
    plan: QueryPlan,
    workers: usize,
    progress: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
) -> mpsc::Receiver<WorkerResult>
where
    G: Gateway + ?Sized + 'static,
{
    // never more workers than queries
    let workers = workers.min(plan.len()).max(1);
    let (job_tx, job_rx) = mpsc::channel(workers);
    let (result_tx, result_rx) = mpsc::channel(workers);
    let jobs: JobQueue = Arc::new(Mutex::new(job_rx));

    let mut tasks = JoinSet::new();
    tasks.spawn(feed(plan, job_tx, cancel.clone()));
    for id in 0..workers {
        tasks.spawn(worker(
            id,
            gateway.clone(),
            jobs.clone(),
            result_tx.clone(),
            progress.clone(),
            cancel.clone(),
        ));
    }
    drop(jobs);

    tokio::spawn(async move {
        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                if err.is_panic() {
                    tracing::error!("Worker panicked: {}", err);
                    let _ = result_tx
                        .send(WorkerResult {
                            query: None,
                            outcome: Err(Error::WorkerPanicked(err.to_string())),
                        })
                        .await;
                }
            }
        }
        tracing::trace!("All workers joined, closing result stream");
    });

    result_rx
}

async fn feed(plan: QueryPlan, jobs: mpsc::Sender<EventQuery>, cancel: CancellationToken) {
    for query in plan {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return,
            sent = jobs.send(query) => {
                // every worker is gone
                if sent.is_err() {
                    return;
                }
            }
        }
    }
}

async fn worker<G>(
    id: usize,
    gateway: Arc<G>,
    jobs: JobQueue,
    results: mpsc::Sender<WorkerResult>,
    progress: Arc<dyn ProgressSink>,
    cancel: CancellationToken,
) where
    G: Gateway + ?Sized,
{
    loop {
        let query = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            next = next_job(&jobs) => match next {
                Some(query) => query,
                None => break,
            },
        };

        progress.debug(&format!("Fetching events {}", query));

        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            fetched = gateway.get_events(&query.event_type, query.start_height, query.end_height) => fetched,
        };

        let failed = fetched.is_err();
        if let Err(e) = &fetched {
            tracing::debug!(worker = id, query = %query, error = %e, "Query failed");
        }

        let result = WorkerResult {
            query: Some(query),
            outcome: fetched.map_err(Error::from),
        };
        if results.send(result).await.is_err() || failed {
            break;
        }
    }

    tracing::trace!(worker = id, "Worker exiting");
}

async fn next_job(jobs: &JobQueue) -> Option<EventQuery> {
    jobs.lock().await.recv().await
}
