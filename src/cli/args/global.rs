//! Top-level CLI structure.

use clap::builder::styling::{AnsiColor, Effects};
use clap::builder::Styles;
use clap::{CommandFactory, FromArgMatches, Parser};
use sfv_verify::config::Overrides;
use std::path::PathBuf;

use super::enums::OutputFormat;

// Configures colored help menu colors (similar to uv)
pub const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// A tiny, fast, io-bound tool for verifying sfv files
#[derive(Parser, Debug)]
#[command(name = "sfv-verify")]
#[command(version)]
pub struct Cli {
    /// SFV manifest to verify, or a directory containing one
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// CRC base polynomial: crc32c (Castagnoli), ieee, or koopman
    #[arg(short, long, value_name = "NAME")]
    pub poly: Option<String>,

    /// Number of parallel workers, at most 512 [default: number of CPUs]
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// KiB of memory to use as file buffers, split across workers [default: 4 per worker]
    #[arg(short, long, value_name = "KIB")]
    pub mem: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verify one file at a time and stop at the first failure
    #[arg(long, conflicts_with_all = ["exists_only", "output"])]
    pub sequential: bool,

    /// Only check that every listed file exists, without reading it
    #[arg(long)]
    pub exists_only: bool,

    /// Format of the final summary
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,
}

impl Cli {
    /// Settings given on the command line, for merging with env and config.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            polynomial: self.poly.clone(),
            jobs: self.jobs,
            memory_kib: self.mem,
            progress: self.no_progress.then_some(false),
        }
    }
}

/// Parse CLI with colored styles
pub fn parse_cli() -> Cli {
    let cmd = Cli::command().styles(STYLES).color(clap::ColorChoice::Auto);
    let matches = cmd.get_matches();
    Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit())
}
