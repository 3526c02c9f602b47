//! Streaming CRC32 computation and per-record outcomes.

use super::Polynomial;
use crate::sfv::ChecksumRecord;
use crate::utils::crc_hex;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

/// Default read buffer size in bytes.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Smallest buffer a verifier will read through.
pub const MIN_BUFFER_SIZE: usize = 512;

/// What happened when a record was checked.
#[derive(Debug)]
pub enum OutcomeStatus {
    /// File read cleanly and its checksum equals the manifest value.
    Matched { computed: u32 },
    /// File read cleanly but its checksum differs.
    Mismatched { computed: u32 },
    /// File could not be opened or read.
    Failed(io::Error),
}

/// Result of verifying one record. Consumed once by the aggregator.
#[derive(Debug)]
pub struct Outcome {
    pub record: ChecksumRecord,
    pub status: OutcomeStatus,
}

impl Outcome {
    pub fn matched(&self) -> bool {
        matches!(self.status, OutcomeStatus::Matched { .. })
    }

    /// Computed checksum, or 0 when the file could not be read.
    pub fn computed(&self) -> u32 {
        match self.status {
            OutcomeStatus::Matched { computed } | OutcomeStatus::Mismatched { computed } => {
                computed
            }
            OutcomeStatus::Failed(_) => 0,
        }
    }

    pub fn error(&self) -> Option<&io::Error> {
        match &self.status {
            OutcomeStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Human-readable report line, or `None` for a silent success.
    pub fn failure_message(&self) -> Option<String> {
        match &self.status {
            OutcomeStatus::Matched { .. } => None,
            OutcomeStatus::Mismatched { computed } => Some(format!(
                "corruption: expected {:x} but computed {:x} for {}",
                self.record.expected(),
                computed,
                self.record.filename()
            )),
            OutcomeStatus::Failed(err) => Some(format!("{}: {}", self.record.filename(), err)),
        }
    }
}

/// Checksums files with one polynomial through a private, reusable buffer.
///
/// Each pipeline worker owns exactly one of these.
pub struct Verifier {
    polynomial: Polynomial,
    buffer: Vec<u8>,
}

impl Verifier {
    pub fn new(polynomial: Polynomial, buffer_size: usize) -> Self {
        Self {
            polynomial,
            buffer: vec![0u8; buffer_size.max(MIN_BUFFER_SIZE)],
        }
    }

    pub fn polynomial(&self) -> Polynomial {
        self.polynomial
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    /// Compute the checksum of everything `reader` yields.
    pub fn checksum_reader<R: Read>(&mut self, mut reader: R) -> io::Result<u32> {
        let mut digest = self.polynomial.crc().digest();
        loop {
            let bytes_read = match reader.read(&mut self.buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            digest.update(&self.buffer[..bytes_read]);
        }
        Ok(digest.finalize())
    }

    pub fn checksum_file(&mut self, path: &Path) -> io::Result<u32> {
        let file = File::open(path)?;
        self.checksum_reader(file)
    }

    /// Verify a record. Open and read failures become `OutcomeStatus::Failed`,
    /// never a mismatch.
    pub fn verify(&mut self, record: ChecksumRecord) -> Outcome {
        let status = match self.checksum_file(record.path()) {
            Ok(computed) if computed == record.expected() => OutcomeStatus::Matched { computed },
            Ok(computed) => OutcomeStatus::Mismatched { computed },
            Err(err) => OutcomeStatus::Failed(err),
        };
        match &status {
            OutcomeStatus::Matched { computed } => {
                tracing::debug!("{}: ok {}", record.filename(), crc_hex(*computed))
            }
            OutcomeStatus::Mismatched { computed } => tracing::debug!(
                "{}: expected {} got {}",
                record.filename(),
                crc_hex(record.expected()),
                crc_hex(*computed)
            ),
            OutcomeStatus::Failed(err) => tracing::debug!("{}: {}", record.filename(), err),
        }
        Outcome { record, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record_for(dir: &TempDir, name: &str, expected: u32) -> ChecksumRecord {
        ChecksumRecord::new(dir.path(), name, expected)
    }

    #[test]
    fn test_matching_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("hello.txt"), b"hello world").unwrap();

        let mut verifier = Verifier::new(Polynomial::Castagnoli, DEFAULT_BUFFER_SIZE);
        let outcome = verifier.verify(record_for(&dir, "hello.txt", 0xC99465AA));

        assert!(outcome.matched());
        assert_eq!(outcome.computed(), 0xC99465AA);
        assert!(outcome.error().is_none());
        assert!(outcome.failure_message().is_none());
    }

    #[test]
    fn test_single_bit_flip_is_detected() {
        let dir = TempDir::new().unwrap();
        let mut data = vec![0u8; 10_000];
        for (i, b) in data.iter_mut().enumerate() {
            *b = (i * 31 % 251) as u8;
        }
        let original = Polynomial::Ieee.crc().checksum(&data);
        data[4321] ^= 0b0000_0100;
        std::fs::write(dir.path().join("blob.bin"), &data).unwrap();

        let mut verifier = Verifier::new(Polynomial::Ieee, DEFAULT_BUFFER_SIZE);
        let outcome = verifier.verify(record_for(&dir, "blob.bin", original));

        assert!(!outcome.matched());
        assert!(outcome.error().is_none());
        assert_ne!(outcome.computed(), original);
        assert_eq!(
            outcome.failure_message().unwrap(),
            format!(
                "corruption: expected {:x} but computed {:x} for blob.bin",
                original,
                outcome.computed()
            )
        );
    }

    #[test]
    fn test_missing_file_is_an_error_not_a_mismatch() {
        let dir = TempDir::new().unwrap();
        let mut verifier = Verifier::new(Polynomial::Castagnoli, DEFAULT_BUFFER_SIZE);
        let outcome = verifier.verify(record_for(&dir, "absent.bin", 0x12345678));

        assert!(!outcome.matched());
        assert_eq!(outcome.computed(), 0);
        assert_eq!(outcome.error().unwrap().kind(), ErrorKind::NotFound);
        assert!(outcome.failure_message().unwrap().starts_with("absent.bin: "));
    }

    #[test]
    fn test_buffer_size_does_not_change_result() {
        let data: Vec<u8> = (0..100_000u32).map(|i| (i % 256) as u8).collect();
        let expected = Polynomial::Koopman.crc().checksum(&data);

        for size in [1, 512, 4096, 1 << 20] {
            let mut verifier = Verifier::new(Polynomial::Koopman, size);
            assert_eq!(verifier.checksum_reader(&data[..]).unwrap(), expected);
        }
    }

    #[test]
    fn test_buffer_reused_across_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("long.txt"), b"hello world").unwrap();
        std::fs::write(dir.path().join("short.txt"), b"abc").unwrap();

        let mut verifier = Verifier::new(Polynomial::Ieee, DEFAULT_BUFFER_SIZE);
        assert!(verifier.verify(record_for(&dir, "long.txt", 0x0D4A1185)).matched());
        assert!(verifier.verify(record_for(&dir, "short.txt", 0x352441C2)).matched());
    }

    #[test]
    fn test_min_buffer_size_enforced() {
        let verifier = Verifier::new(Polynomial::Ieee, 0);
        assert_eq!(verifier.buffer_size(), MIN_BUFFER_SIZE);
    }

    #[test]
    fn test_read_error_propagates() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(ErrorKind::Other, "disk on fire"))
            }
        }

        let mut verifier = Verifier::new(Polynomial::Ieee, DEFAULT_BUFFER_SIZE);
        let err = verifier.checksum_reader(Broken).unwrap_err();
        assert_eq!(err.to_string(), "disk on fire");
    }
}
