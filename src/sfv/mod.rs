//! SFV (Simple File Verification) manifests.

pub mod manifest;
pub mod parse;
pub mod record;

pub use manifest::{Manifest, MANIFEST_EXTENSION};
pub use parse::{parse_line, parse_manifest};
pub use record::ChecksumRecord;
