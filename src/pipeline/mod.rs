//! Parallel verification of many records.
//!
//! Records are queued up front on a channel sized to hold all of them, a fixed
//! pool of blocking workers drains that queue, and outcomes stream back on a
//! second channel of the same capacity. Outcomes arrive in completion order,
//! not manifest order.

pub mod worker;

use crate::report::{Aggregator, OutcomeSink, RunSummary};
use crate::sfv::ChecksumRecord;
use crate::verify::{Outcome, Polynomial, DEFAULT_BUFFER_SIZE};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Upper bound on workers. tokio's blocking pool holds 512 threads by default.
pub const MAX_WORKERS: usize = 512;

/// Settings fixed for the duration of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of concurrent workers, 1 to [`MAX_WORKERS`]
    pub workers: usize,
    pub polynomial: Polynomial,
    /// Read buffer size per worker, in bytes
    pub buffer_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            polynomial: Polynomial::default(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

/// Number of available processing units, or 1 if unknown.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Fixed-size worker pool over a shared work queue.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    fn worker_count(&self) -> usize {
        self.config.workers.clamp(1, MAX_WORKERS)
    }

    /// Start verifying `records` and return the outcome stream.
    ///
    /// The stream yields exactly one outcome per record and closes once every
    /// worker has exited. Must be called from within a tokio runtime.
    pub fn spawn(&self, records: Vec<ChecksumRecord>) -> mpsc::Receiver<Outcome> {
        let capacity = records.len().max(1);
        let (work_tx, work_rx) = mpsc::channel(capacity);
        let (result_tx, result_rx) = mpsc::channel(capacity);

        for record in records {
            // Capacity covers every record and the receiver is alive, so this cannot fail.
            if work_tx.try_send(record).is_err() {
                tracing::error!("work queue rejected a record");
            }
        }
        drop(work_tx);

        let queue = Arc::new(Mutex::new(work_rx));
        let workers = self.worker_count();
        tracing::debug!(
            "Starting {} worker(s), {} polynomial, {} byte buffers",
            workers,
            self.config.polynomial,
            self.config.buffer_size
        );

        let handles: Vec<JoinHandle<usize>> = (0..workers)
            .map(|id| {
                let queue = Arc::clone(&queue);
                let results = result_tx.clone();
                let config = self.config;
                tokio::task::spawn_blocking(move || worker::run(id, queue, results, config))
            })
            .collect();

        tokio::spawn(coordinate(handles, result_tx));

        result_rx
    }
}

/// Wait for every worker, then close the outcome stream by dropping the last sender.
async fn coordinate(handles: Vec<JoinHandle<usize>>, results: mpsc::Sender<Outcome>) {
    let total = handles.len();
    let mut finished = 0;

    for handle in handles {
        match handle.await {
            Ok(processed) => tracing::debug!("worker exited after {} record(s)", processed),
            Err(e) => tracing::error!("worker failed: {}", e),
        }
        finished += 1;
    }

    tracing::debug!("{}/{} workers finished, closing outcome stream", finished, total);
    drop(results);
}

/// Verify `records` in parallel, feeding each outcome to `sink`.
pub async fn verify_records<S: OutcomeSink>(
    records: Vec<ChecksumRecord>,
    config: PipelineConfig,
    sink: S,
) -> (RunSummary, S) {
    let expected = records.len();
    let outcomes = Pipeline::new(config).spawn(records);
    let mut aggregator = Aggregator::new(sink).expecting(expected);
    let summary = aggregator.consume(outcomes).await;
    (summary, aggregator.into_sink())
}
