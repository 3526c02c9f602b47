//! Worker loop run on the blocking thread pool.

use super::PipelineConfig;
use crate::sfv::ChecksumRecord;
use crate::verify::{Outcome, Verifier};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

pub(crate) type WorkQueue = Arc<Mutex<mpsc::Receiver<ChecksumRecord>>>;

/// Pull records until the queue is drained, pushing one outcome per record.
///
/// Returns how many records this worker handled.
pub(crate) fn run(
    id: usize,
    queue: WorkQueue,
    results: mpsc::Sender<Outcome>,
    config: PipelineConfig,
) -> usize {
    let mut verifier = Verifier::new(config.polynomial, config.buffer_size);
    let mut processed = 0;
    tracing::trace!(
        "worker {}: {} with {} byte buffer",
        id,
        verifier.polynomial(),
        verifier.buffer_size()
    );

    while let Some(record) = next_record(&queue) {
        let outcome = verifier.verify(record);
        processed += 1;

        if results.blocking_send(outcome).is_err() {
            tracing::warn!("worker {}: outcome stream closed early", id);
            break;
        }
    }

    processed
}

fn next_record(queue: &WorkQueue) -> Option<ChecksumRecord> {
    // The queue is filled and closed before workers start, so this never parks
    // for long while holding the lock.
    let mut rx = queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    rx.blocking_recv()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::Polynomial;
    use tempfile::TempDir;

    #[test]
    fn test_worker_drains_queue() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"abc").unwrap();

        let (work_tx, work_rx) = mpsc::channel(3);
        for _ in 0..3 {
            work_tx
                .try_send(ChecksumRecord::new(dir.path(), "a.txt", 0x352441C2))
                .unwrap();
        }
        drop(work_tx);
        let (result_tx, mut result_rx) = mpsc::channel(3);

        let config = PipelineConfig {
            workers: 1,
            polynomial: Polynomial::Ieee,
            buffer_size: 1024,
        };
        let processed = run(0, Arc::new(Mutex::new(work_rx)), result_tx, config);

        assert_eq!(processed, 3);
        let mut received = 0;
        while let Ok(outcome) = result_rx.try_recv() {
            assert!(outcome.matched());
            received += 1;
        }
        assert_eq!(received, 3);
    }

    #[test]
    fn test_worker_stops_when_results_dropped() {
        let (work_tx, work_rx) = mpsc::channel(2);
        work_tx
            .try_send(ChecksumRecord::new(std::path::Path::new("."), "x", 0))
            .unwrap();
        work_tx
            .try_send(ChecksumRecord::new(std::path::Path::new("."), "y", 0))
            .unwrap();
        drop(work_tx);
        let (result_tx, result_rx) = mpsc::channel(2);
        drop(result_rx);

        let config = PipelineConfig {
            workers: 1,
            polynomial: Polynomial::Ieee,
            buffer_size: 1024,
        };
        assert_eq!(run(0, Arc::new(Mutex::new(work_rx)), result_tx, config), 1);
    }
}
