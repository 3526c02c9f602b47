//! CRC32 verification of individual records.

pub mod checksum;
pub mod polynomial;

pub use checksum::{
    Outcome, OutcomeStatus, Verifier, DEFAULT_BUFFER_SIZE, MIN_BUFFER_SIZE,
};
pub use polynomial::Polynomial;
