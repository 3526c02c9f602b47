use crate::cli::Cli;
use sfv_verify::config::{ConfigLoader, MergedConfig, Overrides};
use sfv_verify::error::Result;
use sfv_verify::utils::human_bytes;

/// Run settings combined from CLI arguments, environment variables and the config file
pub struct RunContext {
    pub settings: MergedConfig,
}

impl RunContext {
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = ConfigLoader::load()?;
        let env = Overrides::from_env()?;
        let settings = MergedConfig::merge(cli.overrides(), env, &config)?;

        tracing::debug!("Effective settings:\n{}", settings.display_sources());
        tracing::debug!(
            "Read buffer: {} per worker",
            human_bytes(settings.buffer_size() as u64)
        );

        Ok(Self { settings })
    }
}
