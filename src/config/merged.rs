//! Merged configuration from multiple sources with source tracking.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables
//! 3. Config file
//! 4. Default values

use crate::config::source::SourcedValue;
use crate::config::Config;
use crate::error::{Result, SfvError};
use crate::pipeline::{default_workers, PipelineConfig, MAX_WORKERS};
use crate::verify::{Polynomial, MIN_BUFFER_SIZE};
use std::str::FromStr;

pub const POLY_ENV: &str = "SFV_VERIFY_POLY";
pub const JOBS_ENV: &str = "SFV_VERIFY_JOBS";
pub const MEM_ENV: &str = "SFV_VERIFY_MEM";

/// Default buffer budget per worker, in KiB.
const DEFAULT_KIB_PER_WORKER: usize = 4;

/// Raw values from one source, before validation.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub polynomial: Option<String>,
    pub jobs: Option<usize>,
    pub memory_kib: Option<usize>,
    pub progress: Option<bool>,
}

impl Overrides {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            polynomial: lookup(POLY_ENV),
            jobs: parse_env(JOBS_ENV, lookup(JOBS_ENV))?,
            memory_kib: parse_env(MEM_ENV, lookup(MEM_ENV))?,
            progress: None,
        })
    }
}

fn parse_env<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>> {
    value
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| SfvError::Config(format!("{} must be a number, got {:?}", key, v)))
        })
        .transpose()
}

/// Effective settings for one run, each tagged with its origin.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub polynomial: SourcedValue<Polynomial>,
    pub jobs: SourcedValue<usize>,
    pub memory_kib: SourcedValue<usize>,
    pub progress: SourcedValue<bool>,
}

impl MergedConfig {
    /// Merge and validate. Fails before any verification starts on an unknown
    /// polynomial, a zero job count, or a memory budget that is zero or does
    /// not fit in bytes. Job counts above [`MAX_WORKERS`] are capped.
    pub fn merge(cli: Overrides, env: Overrides, config: &Config) -> Result<Self> {
        let file = &config.verify;

        let polynomial = SourcedValue::resolve(
            cli.polynomial,
            env.polynomial,
            file.polynomial.clone(),
            Polynomial::default().to_string(),
        );
        let polynomial = SourcedValue::new(polynomial.value.parse::<Polynomial>()?, polynomial.source);

        let jobs = SourcedValue::resolve(cli.jobs, env.jobs, file.jobs, default_workers());
        if jobs.value == 0 {
            return Err(SfvError::Config(format!(
                "worker count must be at least 1 (from {})",
                jobs.source
            )));
        }
        if jobs.value > MAX_WORKERS {
            tracing::warn!(
                "{} workers requested (from {}), using {}",
                jobs.value,
                jobs.source,
                MAX_WORKERS
            );
        }
        let jobs = jobs.map(|n| n.min(MAX_WORKERS));

        let memory_kib = SourcedValue::resolve(
            cli.memory_kib,
            env.memory_kib,
            file.memory_kib,
            jobs.value * DEFAULT_KIB_PER_WORKER,
        );
        if memory_kib.value == 0 {
            return Err(SfvError::Config(format!(
                "memory budget must be at least 1 KiB (from {})",
                memory_kib.source
            )));
        }
        if memory_kib.value.checked_mul(1024).is_none() {
            return Err(SfvError::Config(format!(
                "memory budget too large: {} KiB (from {})",
                memory_kib.value, memory_kib.source
            )));
        }

        let progress = SourcedValue::resolve(cli.progress, env.progress, file.progress, true);

        Ok(Self {
            polynomial,
            jobs,
            memory_kib,
            progress,
        })
    }

    /// Read buffer size for each worker: the memory budget split evenly.
    pub fn buffer_size(&self) -> usize {
        let budget = self.memory_kib.value.saturating_mul(1024);
        (budget / self.jobs.value.max(1)).max(MIN_BUFFER_SIZE)
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            workers: self.jobs.value,
            polynomial: self.polynomial.value,
            buffer_size: self.buffer_size(),
        }
    }

    /// One line per setting, for debug logging.
    pub fn display_sources(&self) -> String {
        format!(
            "polynomial = {} ({})\njobs = {} ({})\nmemory_kib = {} ({})\nprogress = {} ({})",
            self.polynomial.value,
            self.polynomial.source,
            self.jobs.value,
            self.jobs.source,
            self.memory_kib.value,
            self.memory_kib.source,
            self.progress.value,
            self.progress.source,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::FlagSource;
    use crate::config::VerifyConfig;
    use std::collections::HashMap;

    fn file_config(polynomial: Option<&str>, jobs: Option<usize>) -> Config {
        Config {
            verify: VerifyConfig {
                polynomial: polynomial.map(String::from),
                jobs,
                memory_kib: None,
                progress: Some(false),
            },
        }
    }

    #[test]
    fn test_merge_cli_priority() {
        let cli = Overrides {
            polynomial: Some("koop".into()),
            jobs: Some(2),
            ..Default::default()
        };
        let env = Overrides {
            polynomial: Some("ieee".into()),
            jobs: Some(3),
            ..Default::default()
        };
        let merged = MergedConfig::merge(cli, env, &file_config(Some("crc32c"), Some(4))).unwrap();

        assert_eq!(merged.polynomial.value, Polynomial::Koopman);
        assert_eq!(merged.polynomial.source, FlagSource::CliArg);
        assert_eq!(merged.jobs.value, 2);
        assert_eq!(merged.jobs.source, FlagSource::CliArg);
    }

    #[test]
    fn test_merge_env_priority() {
        let env = Overrides {
            polynomial: Some("ieee".into()),
            ..Default::default()
        };
        let merged =
            MergedConfig::merge(Overrides::default(), env, &file_config(Some("koopman"), None))
                .unwrap();

        assert_eq!(merged.polynomial.value, Polynomial::Ieee);
        assert_eq!(merged.polynomial.source, FlagSource::Env);
    }

    #[test]
    fn test_merge_config_priority() {
        let merged = MergedConfig::merge(
            Overrides::default(),
            Overrides::default(),
            &file_config(Some("koopman"), Some(6)),
        )
        .unwrap();

        assert_eq!(merged.polynomial.value, Polynomial::Koopman);
        assert_eq!(merged.polynomial.source, FlagSource::Config);
        assert_eq!(merged.jobs.value, 6);
        assert!(!merged.progress.value);
        assert_eq!(merged.progress.source, FlagSource::Config);
    }

    #[test]
    fn test_merge_default_fallback() {
        let merged =
            MergedConfig::merge(Overrides::default(), Overrides::default(), &Config::default())
                .unwrap();

        assert_eq!(merged.polynomial.value, Polynomial::Castagnoli);
        assert_eq!(merged.polynomial.source, FlagSource::Default);
        assert_eq!(merged.jobs.value, default_workers());
        assert_eq!(merged.memory_kib.value, merged.jobs.value * 4);
        assert!(merged.progress.value);
        assert_eq!(merged.buffer_size(), 4096);
    }

    #[test]
    fn test_unsupported_polynomial() {
        let cli = Overrides {
            polynomial: Some("adler".into()),
            ..Default::default()
        };
        let err = MergedConfig::merge(cli, Overrides::default(), &Config::default()).unwrap_err();
        assert!(matches!(err, SfvError::UnsupportedPolynomial(name) if name == "adler"));
    }

    #[test]
    fn test_zero_jobs_rejected() {
        let cli = Overrides {
            jobs: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            MergedConfig::merge(cli, Overrides::default(), &Config::default()),
            Err(SfvError::Config(_))
        ));
    }

    #[test]
    fn test_zero_memory_rejected() {
        let env = Overrides {
            memory_kib: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            MergedConfig::merge(Overrides::default(), env, &Config::default()),
            Err(SfvError::Config(_))
        ));
    }

    #[test]
    fn test_oversized_memory_rejected() {
        let cli = Overrides {
            jobs: Some(1),
            memory_kib: Some(usize::MAX / 512),
            ..Default::default()
        };
        let err = MergedConfig::merge(cli, Overrides::default(), &Config::default()).unwrap_err();
        assert!(matches!(err, SfvError::Config(msg) if msg.contains("memory budget too large")));
    }

    #[test]
    fn test_huge_job_count_capped() {
        let env = Overrides {
            jobs: Some(usize::MAX / 2),
            ..Default::default()
        };
        let merged = MergedConfig::merge(Overrides::default(), env, &Config::default()).unwrap();

        assert_eq!(merged.jobs.value, MAX_WORKERS);
        assert_eq!(merged.jobs.source, FlagSource::Env);
        assert_eq!(merged.memory_kib.value, MAX_WORKERS * 4);
        assert_eq!(merged.buffer_size(), 4096);
    }

    #[test]
    fn test_buffer_split_between_workers() {
        let cli = Overrides {
            jobs: Some(4),
            memory_kib: Some(64),
            ..Default::default()
        };
        let merged = MergedConfig::merge(cli, Overrides::default(), &Config::default()).unwrap();
        assert_eq!(merged.buffer_size(), 16 * 1024);

        let config = merged.pipeline_config();
        assert_eq!(config.workers, 4);
        assert_eq!(config.buffer_size, 16 * 1024);
    }

    #[test]
    fn test_tiny_budget_clamped() {
        let cli = Overrides {
            jobs: Some(64),
            memory_kib: Some(1),
            ..Default::default()
        };
        let merged = MergedConfig::merge(cli, Overrides::default(), &Config::default()).unwrap();
        assert_eq!(merged.buffer_size(), MIN_BUFFER_SIZE);
    }

    #[test]
    fn test_env_lookup() {
        let vars: HashMap<&str, &str> =
            [(POLY_ENV, "ieee"), (JOBS_ENV, " 3 "), (MEM_ENV, "48")].into();
        let env = Overrides::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();

        assert_eq!(env.polynomial.as_deref(), Some("ieee"));
        assert_eq!(env.jobs, Some(3));
        assert_eq!(env.memory_kib, Some(48));
    }

    #[test]
    fn test_env_lookup_bad_number() {
        let result = Overrides::from_lookup(|k| (k == JOBS_ENV).then(|| "lots".to_string()));
        assert!(matches!(result, Err(SfvError::Config(msg)) if msg.contains(JOBS_ENV)));
    }

    #[test]
    fn test_display_sources() {
        let merged =
            MergedConfig::merge(Overrides::default(), Overrides::default(), &Config::default())
                .unwrap();
        let display = merged.display_sources();
        assert!(display.contains("polynomial = crc32c (default)"));
        assert!(display.contains("progress = true (default)"));
    }
}
