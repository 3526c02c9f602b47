use crate::config::Config;
use crate::error::Result;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV: &str = "SFV_VERIFY_CONFIG";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Get the default config directory path
    pub fn config_dir() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            return path.parent().map(|p| p.to_path_buf());
        }

        ProjectDirs::from("", "", "sfv-verify").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }

        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load config from file, or return default if not found
    pub fn load() -> Result<Config> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        tracing::debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
