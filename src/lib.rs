//! sfv-verify: parallel CRC32 verification of files listed in SFV manifests.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod sfv;
pub mod utils;
pub mod verify;

// Re-export commonly used types
pub use error::SfvError;
pub use pipeline::{verify_records, Pipeline, PipelineConfig};
pub use report::{Aggregator, OutcomeSink, RunSummary};
pub use sfv::{ChecksumRecord, Manifest};
pub use verify::{Outcome, OutcomeStatus, Polynomial, Verifier};
