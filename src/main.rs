// Binary-specific modules
mod cli;
mod context;

use cli::parse_cli;
use context::RunContext;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = parse_cli();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Load context
    let ctx = RunContext::new(&cli)?;

    let code = cli::commands::run_verify(cli, ctx).await?;
    Ok(ExitCode::from(code))
}
