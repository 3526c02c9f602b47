use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SfvError {
    #[error("Manifest not found: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("No sfv manifest found in {}", .0.display())]
    NoManifestFound(PathBuf),

    #[error("Malformed line {line_number}: {line:?}")]
    MalformedLine { line_number: usize, line: String },

    #[error("Invalid checksum on line {line_number}: {token:?}")]
    InvalidChecksum { line_number: usize, token: String },

    #[error("No checksums found in {}", .0.display())]
    EmptyManifest(PathBuf),

    #[error("{}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corruption: expected {expected:x} but computed {computed:x} for {filename}")]
    ChecksumMismatch {
        filename: String,
        expected: u32,
        computed: u32,
    },

    #[error("Unsupported polynomial: {0} (expected crc32c, ieee or koopman)")]
    UnsupportedPolynomial(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SfvError>;
