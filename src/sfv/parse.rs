//! SFV manifest text parsing.
//!
//! Format, one entry per line:
//!
//! ```text
//! ; comment
//! some file.bin 1A2B3C4D
//! ```
//!
//! The checksum is the last whitespace-separated token; everything before it
//! is the filename, so filenames may contain spaces.

use super::ChecksumRecord;
use crate::error::{Result, SfvError};
use std::io::BufRead;
use std::path::Path;

/// Parse every record in `reader`, resolving filenames against `dir`.
///
/// The first bad line fails the whole parse; no partial list is returned.
pub fn parse_manifest<R: BufRead>(dir: &Path, reader: R) -> Result<Vec<ChecksumRecord>> {
    let mut records = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if let Some(record) = parse_line(dir, index + 1, &line)? {
            records.push(record);
        }
    }

    Ok(records)
}

/// Parse one line. Blank lines and `;` comments yield `Ok(None)`.
pub fn parse_line(dir: &Path, line_number: usize, line: &str) -> Result<Option<ChecksumRecord>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(';') {
        return Ok(None);
    }

    let (filename, token) = line
        .rsplit_once(char::is_whitespace)
        .map(|(name, token)| (name.trim_end(), token))
        .filter(|(name, token)| !name.is_empty() && !token.is_empty())
        .ok_or_else(|| SfvError::MalformedLine {
            line_number,
            line: line.to_string(),
        })?;

    let expected = parse_crc32(token).ok_or_else(|| SfvError::InvalidChecksum {
        line_number,
        token: token.to_string(),
    })?;

    Ok(Some(ChecksumRecord::new(dir, filename, expected)))
}

/// Parse a case-insensitive hex token that must fit in 32 bits.
fn parse_crc32(token: &str) -> Option<u32> {
    // from_str_radix alone would also accept a leading '+'
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(token, 16).ok()
}
