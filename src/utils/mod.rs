//! Utility modules for the CLI.

pub mod colors;
pub mod format;

pub use colors::*;
pub use format::*;
