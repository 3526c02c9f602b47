//! Configuration file schema.
//!
//! ```toml
//! [verify]
//! polynomial = "crc32c"   # crc32c | ieee | koopman
//! jobs = 8
//! memory_kib = 32
//! progress = true
//! ```
//!
//! Every key is optional; absent keys fall through to built-in defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub verify: VerifyConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Polynomial name, validated when settings are merged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polynomial: Option<String>,

    /// Number of parallel workers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    /// Total read buffer budget in KiB, shared evenly between workers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_kib: Option<usize>,

    /// Draw a progress bar while verifying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress: Option<bool>,
}
