//! A single parsed manifest line.

use crate::verify::{Outcome, Polynomial, Verifier};
use std::path::{Path, PathBuf};

/// One filename/checksum pair from an SFV manifest.
///
/// `path` is the filename resolved against the manifest's directory, unless
/// the filename was already absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumRecord {
    filename: String,
    path: PathBuf,
    expected: u32,
}

impl ChecksumRecord {
    pub fn new(dir: &Path, filename: impl Into<String>, expected: u32) -> Self {
        let filename = filename.into();
        let path = dir.join(&filename);
        Self {
            filename,
            path,
            expected,
        }
    }

    /// Filename exactly as written in the manifest.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn expected(&self) -> u32 {
        self.expected
    }

    /// Whether the listed file is present, without reading it.
    pub fn exists(&self) -> bool {
        std::fs::metadata(&self.path).is_ok()
    }

    /// Verify this record with a throwaway buffer.
    pub fn verify(&self, polynomial: Polynomial, buffer_size: usize) -> Outcome {
        Verifier::new(polynomial, buffer_size).verify(self.clone())
    }
}
