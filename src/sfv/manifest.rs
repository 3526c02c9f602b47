//! Manifest loading, discovery and sequential verification.

use super::parse::parse_manifest;
use super::ChecksumRecord;
use crate::error::{Result, SfvError};
use crate::verify::{OutcomeStatus, Polynomial, Verifier};
use std::fs::{self, File};
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Conventional extension used when discovering a manifest in a directory.
pub const MANIFEST_EXTENSION: &str = "sfv";

/// All checksum records read from one SFV file.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    records: Vec<ChecksumRecord>,
}

impl Manifest {
    /// Read and parse the manifest at `path`.
    ///
    /// Succeeds with zero records for a file holding only comments; callers
    /// that need content check [`Manifest::is_empty`].
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SfvError::ManifestNotFound(path.to_path_buf()),
            _ => SfvError::Io(e),
        })?;

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let records = parse_manifest(dir, BufReader::new(file))?;
        tracing::debug!("Parsed {} record(s) from {}", records.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            records,
        })
    }

    /// Locate the first `*.sfv` file in `dir` (by name) and read it.
    pub fn find(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
            ErrorKind::NotFound => SfvError::ManifestNotFound(dir.to_path_buf()),
            _ => SfvError::Io(e),
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && has_manifest_extension(&path) {
                candidates.push(path);
            }
        }
        candidates.sort();

        let first = candidates
            .first()
            .ok_or_else(|| SfvError::NoManifestFound(dir.to_path_buf()))?;
        if candidates.len() > 1 {
            tracing::warn!(
                "{} manifests found in {}, using {}",
                candidates.len(),
                dir.display(),
                first.display()
            );
        }

        Self::read(first)
    }

    /// Read `path` directly, or discover a manifest inside it if it is a directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            Self::find(path)
        } else {
            Self::read(path)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn records(&self) -> &[ChecksumRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fail with [`SfvError::EmptyManifest`] if nothing was parsed.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(SfvError::EmptyManifest(self.path.clone()));
        }
        Ok(())
    }

    /// Verify every record in order, stopping at the first failure.
    pub fn verify_all(&self, polynomial: Polynomial, buffer_size: usize) -> Result<()> {
        self.ensure_not_empty()?;

        let mut verifier = Verifier::new(polynomial, buffer_size);
        for record in &self.records {
            let outcome = verifier.verify(record.clone());
            match outcome.status {
                OutcomeStatus::Matched { .. } => {}
                OutcomeStatus::Mismatched { computed } => {
                    return Err(SfvError::ChecksumMismatch {
                        filename: record.filename().to_string(),
                        expected: record.expected(),
                        computed,
                    });
                }
                OutcomeStatus::Failed(source) => {
                    return Err(SfvError::FileAccess {
                        path: record.path().to_path_buf(),
                        source,
                    });
                }
            }
        }
        Ok(())
    }

    /// Records whose files are absent, in manifest order.
    pub fn missing(&self) -> Vec<&ChecksumRecord> {
        self.records.iter().filter(|r| !r.exists()).collect()
    }

    pub fn into_records(self) -> Vec<ChecksumRecord> {
        self.records
    }
}

fn has_manifest_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
}
