//! CLI argument definitions.
//!
//! - [`enums`]: ValueEnum types (OutputFormat)
//! - [`global`]: the top-level `Cli` structure and STYLES constant

mod enums;
mod global;

pub use enums::OutputFormat;
pub use global::{parse_cli, Cli};
