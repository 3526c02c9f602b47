//! Outcome classification, progress reporting and run status.

pub mod aggregator;
pub mod sink;
pub mod summary;

pub use aggregator::Aggregator;
#[cfg(test)]
pub use sink::CollectingSink;
pub use sink::{OutcomeSink, PlainSink, ProgressSink};
pub use summary::{OutcomeKind, RunSummary};
