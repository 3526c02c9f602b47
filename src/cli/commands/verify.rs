//! Verify command implementation.

use crate::cli::args::{Cli, OutputFormat};
use crate::context::RunContext;
use sfv_verify::error::{Result, SfvError};
use sfv_verify::pipeline::verify_records;
use sfv_verify::report::{OutcomeKind, OutcomeSink, PlainSink, ProgressSink, RunSummary};
use sfv_verify::sfv::Manifest;
use sfv_verify::utils::{self, MessageType};

/// Load the manifest and verify it. Returns the process exit code.
pub async fn run_verify(cli: Cli, ctx: RunContext) -> Result<u8> {
    let manifest = Manifest::open(&cli.manifest)?;
    manifest.ensure_not_empty()?;

    tracing::info!(
        "Verifying {} file(s) from {} with {}",
        manifest.len(),
        manifest.path().display(),
        ctx.settings.polynomial.value
    );

    if cli.exists_only {
        let summary = check_existence(&manifest);
        return Ok(report(&summary, cli.output));
    }

    if cli.sequential {
        return run_sequential(manifest, &ctx).await;
    }

    let total = manifest.len();
    let sink: Box<dyn OutcomeSink + Send> = if ctx.settings.progress.value {
        Box::new(ProgressSink::new(total))
    } else {
        Box::new(PlainSink)
    };

    let (summary, _) = verify_records(
        manifest.into_records(),
        ctx.settings.pipeline_config(),
        sink,
    )
    .await;

    Ok(report(&summary, cli.output))
}

/// Stat every listed file and report the absent ones.
fn check_existence(manifest: &Manifest) -> RunSummary {
    let missing = manifest.missing();
    for record in &missing {
        println!(
            "{}",
            MessageType::Error.colorize(&format!("missing: {}", record.filename()))
        );
    }

    let mut summary = RunSummary::default();
    for _ in missing.len()..manifest.len() {
        summary.add(OutcomeKind::Match);
    }
    for _ in &missing {
        summary.add(OutcomeKind::Failed);
    }
    summary
}

/// Short-circuiting path: the first mismatch or unreadable file ends the run.
async fn run_sequential(manifest: Manifest, ctx: &RunContext) -> Result<u8> {
    let polynomial = ctx.settings.polynomial.value;
    let buffer_size = ctx.settings.buffer_size();

    let result =
        tokio::task::spawn_blocking(move || manifest.verify_all(polynomial, buffer_size))
            .await
            .map_err(|e| SfvError::Io(std::io::Error::other(e)))?;

    match result {
        Ok(()) => Ok(0),
        Err(e @ (SfvError::ChecksumMismatch { .. } | SfvError::FileAccess { .. })) => {
            println!("{}", MessageType::Error.colorize(&e.to_string()));
            Ok(1)
        }
        Err(e) => Err(e),
    }
}

fn report(summary: &RunSummary, output: OutputFormat) -> u8 {
    match output {
        OutputFormat::Json => match serde_json::to_string(summary) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("Failed to serialize summary: {}", e),
        },
        OutputFormat::Text => {
            if !summary.is_success() {
                utils::status(MessageType::Error, &summary.to_string());
            }
        }
    }
    summary.exit_code()
}
