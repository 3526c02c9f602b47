//! Configuration value source tracking.
//!
//! Records where each effective setting came from so that `--verbose` runs
//! can explain, for example, why eight workers were started.

/// Where a configuration value came from.
///
/// The priority order (highest to lowest) is:
/// 1. Command-line arguments (CliArg)
/// 2. Environment variables (Env)
/// 3. Config file (Config)
/// 4. Default values (Default)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlagSource {
    /// Default value (hardcoded in the application)
    Default,
    /// Config file value
    Config,
    /// Environment variable
    Env,
    /// Command-line argument
    CliArg,
}

impl std::fmt::Display for FlagSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlagSource::Default => write!(f, "default"),
            FlagSource::Config => write!(f, "config file"),
            FlagSource::Env => write!(f, "environment variable"),
            FlagSource::CliArg => write!(f, "command-line argument"),
        }
    }
}

/// A configuration value with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedValue<T> {
    /// The configuration value
    pub value: T,
    /// Where this value came from
    pub source: FlagSource,
}

impl<T> SourcedValue<T> {
    pub const fn new(value: T, source: FlagSource) -> Self {
        Self { value, source }
    }

    /// Pick the highest-priority value that is present.
    pub fn resolve(cli: Option<T>, env: Option<T>, config: Option<T>, default: T) -> Self {
        if let Some(value) = cli {
            Self::new(value, FlagSource::CliArg)
        } else if let Some(value) = env {
            Self::new(value, FlagSource::Env)
        } else if let Some(value) = config {
            Self::new(value, FlagSource::Config)
        } else {
            Self::new(default, FlagSource::Default)
        }
    }

    /// Map the value while preserving the source.
    pub fn map<U, F>(self, f: F) -> SourcedValue<U>
    where
        F: FnOnce(T) -> U,
    {
        SourcedValue {
            value: f(self.value),
            source: self.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_source_display() {
        assert_eq!(format!("{}", FlagSource::Default), "default");
        assert_eq!(format!("{}", FlagSource::Config), "config file");
        assert_eq!(format!("{}", FlagSource::Env), "environment variable");
        assert_eq!(format!("{}", FlagSource::CliArg), "command-line argument");
    }

    #[test]
    fn test_flag_source_ordering() {
        assert!(FlagSource::CliArg > FlagSource::Env);
        assert!(FlagSource::Env > FlagSource::Config);
        assert!(FlagSource::Config > FlagSource::Default);
    }

    #[test]
    fn test_resolve_priority() {
        let v = SourcedValue::resolve(Some(1), Some(2), Some(3), 4);
        assert_eq!(v, SourcedValue::new(1, FlagSource::CliArg));

        let v = SourcedValue::resolve(None, Some(2), Some(3), 4);
        assert_eq!(v, SourcedValue::new(2, FlagSource::Env));

        let v = SourcedValue::resolve(None, None, Some(3), 4);
        assert_eq!(v, SourcedValue::new(3, FlagSource::Config));

        let v = SourcedValue::resolve(None, None, None, 4);
        assert_eq!(v, SourcedValue::new(4, FlagSource::Default));
    }

    #[test]
    fn test_sourced_value_map() {
        let val = SourcedValue::new(10, FlagSource::Env);
        let mapped = val.map(|x| x * 2);

        assert_eq!(mapped.value, 20);
        assert_eq!(mapped.source, FlagSource::Env);
    }
}
