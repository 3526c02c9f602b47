//! ValueEnum types for CLI arguments.

use clap::ValueEnum;

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Failure lines only, plus a count line when something failed
    #[default]
    Text,
    /// Summary counts as a JSON object
    Json,
}
