//! Drains the outcome stream and decides the run's status.

use super::{OutcomeKind, OutcomeSink, RunSummary};
use crate::utils::crc_hex;
use crate::verify::Outcome;
use tokio::sync::mpsc;

pub struct Aggregator<S> {
    sink: S,
    summary: RunSummary,
    expected: Option<usize>,
}

impl<S: OutcomeSink> Aggregator<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            summary: RunSummary::default(),
            expected: None,
        }
    }

    /// Number of outcomes the stream should deliver. Any shortfall when it
    /// closes counts as failures.
    pub fn expecting(mut self, count: usize) -> Self {
        self.expected = Some(count);
        self
    }

    /// Classify one outcome and hand it to the sink.
    pub fn accept(&mut self, outcome: Outcome) {
        let kind = OutcomeKind::from(&outcome);
        if kind != OutcomeKind::Match {
            tracing::debug!(
                "{:?}: {} (computed {})",
                kind,
                outcome.record.filename(),
                crc_hex(outcome.computed())
            );
        }
        self.summary.add(kind);
        self.sink.record(outcome);
    }

    /// Consume every outcome until the stream closes. The returned summary is
    /// only final once this returns.
    pub async fn consume(&mut self, mut outcomes: mpsc::Receiver<Outcome>) -> RunSummary {
        while let Some(outcome) = outcomes.recv().await {
            self.accept(outcome);
        }
        if let Some(expected) = self.expected {
            let lost = expected.saturating_sub(self.summary.total);
            if lost > 0 {
                tracing::error!("{} of {} outcome(s) never arrived", lost, expected);
                for _ in 0..lost {
                    self.summary.add(OutcomeKind::Failed);
                }
            }
        }
        self.sink.finish(&self.summary);
        tracing::info!("{}", self.summary);
        self.summary
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
