//! Where per-record outcomes are reported.

use super::RunSummary;
use crate::utils::MessageType;
use crate::verify::Outcome;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Receives each outcome once, after the aggregator has classified it.
pub trait OutcomeSink {
    fn record(&mut self, outcome: Outcome);

    /// Called once after the outcome stream is drained.
    fn finish(&mut self, _summary: &RunSummary) {}
}

impl<S: OutcomeSink + ?Sized> OutcomeSink for Box<S> {
    fn record(&mut self, outcome: Outcome) {
        (**self).record(outcome)
    }

    fn finish(&mut self, summary: &RunSummary) {
        (**self).finish(summary)
    }
}

/// Prints failure lines to stdout, nothing else.
#[derive(Debug, Default)]
pub struct PlainSink;

impl OutcomeSink for PlainSink {
    fn record(&mut self, outcome: Outcome) {
        if let Some(message) = outcome.failure_message() {
            println!("{}", MessageType::Error.colorize(&message));
        }
    }
}

/// Progress bar sized to the manifest, advanced once per outcome.
pub struct ProgressSink {
    progress_bar: ProgressBar,
}

impl ProgressSink {
    pub fn new(total: usize) -> Self {
        let progress_bar = ProgressBar::new(total as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{elapsed_precise} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        progress_bar.enable_steady_tick(Duration::from_millis(200));

        Self { progress_bar }
    }
}

impl OutcomeSink for ProgressSink {
    fn record(&mut self, outcome: Outcome) {
        self.progress_bar.inc(1);

        if let Some(message) = outcome.failure_message() {
            // suspend() still prints when the bar is hidden (no tty)
            self.progress_bar
                .suspend(|| println!("{}", MessageType::Error.colorize(&message)));
        }
    }

    fn finish(&mut self, _summary: &RunSummary) {
        self.progress_bar.finish_and_clear();
    }
}

/// Keeps every outcome in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub outcomes: Vec<Outcome>,
    pub summary: Option<RunSummary>,
}

#[cfg(test)]
impl CollectingSink {
    /// Kind and filename of each non-matching outcome, sorted by filename.
    pub fn failures(&self) -> Vec<(super::OutcomeKind, String)> {
        use super::OutcomeKind;

        let mut failures: Vec<_> = self
            .outcomes
            .iter()
            .map(|o| (OutcomeKind::from(o), o.record.filename().to_string()))
            .filter(|(kind, _)| *kind != OutcomeKind::Match)
            .collect();
        failures.sort_by(|a, b| a.1.cmp(&b.1));
        failures
    }
}

#[cfg(test)]
impl OutcomeSink for CollectingSink {
    fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    fn finish(&mut self, summary: &RunSummary) {
        self.summary = Some(*summary);
    }
}
