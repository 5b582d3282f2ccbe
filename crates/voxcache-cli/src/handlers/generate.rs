//! Generate command handler.
//!
//! Runs a batch over a corpus. Ctrl-C stops new work; phrases already being
//! synthesized finish and are kept.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use voxcache_batch::{BatchConfig, BatchRunner, CancellationToken};
use voxcache_core::{Corpus, SettingsUpdate, VoiceGender, VoiceParams, validate_settings};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{BatchProgressPrinter, display_batch_summary};

/// Arguments for the generate command.
pub struct GenerateArgs<'a> {
    pub corpus: &'a Path,
    pub concurrency: Option<usize>,
    pub gender: Option<VoiceGender>,
    pub voice: Option<String>,
    pub dry_run: bool,
}

/// Execute the generate command.
///
/// Fails when the provider is unreachable, or when any phrase failed or
/// was skipped.
pub async fn execute(ctx: &CliContext, args: GenerateArgs<'_>) -> Result<()> {
    let config = batch_config(ctx, &args)?;
    let corpus = Corpus::load(args.corpus).map_err(CliError::from)?;

    let runner = BatchRunner::new(Arc::clone(&ctx.orchestrator), config);
    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));
    let printer = tokio::spawn(BatchProgressPrinter::new().follow(runner.subscribe()));

    let result = runner.run(&corpus, cancel).await;
    drop(runner);
    interrupt.abort();
    finish_progress(printer).await;

    let summary = result.map_err(CliError::from)?;
    display_batch_summary(&summary);

    if summary.dry_run || summary.is_success() {
        Ok(())
    } else if summary.cancelled {
        Err(CliError::Core(format!("Cancelled; {} phrase(s) not attempted", summary.skipped)).into())
    } else {
        Err(CliError::Core(format!("{} phrase(s) failed", summary.totals.failed)).into())
    }
}

fn batch_config(ctx: &CliContext, args: &GenerateArgs<'_>) -> Result<BatchConfig, CliError> {
    let mut settings = ctx.settings.clone();
    if let Some(concurrency) = args.concurrency {
        settings.merge(&SettingsUpdate {
            max_concurrency: Some(Some(u32::try_from(concurrency).unwrap_or(u32::MAX))),
            ..Default::default()
        });
        validate_settings(&settings)?;
    }

    let mut voice = VoiceParams::gender(args.gender.unwrap_or_else(|| settings.effective_default_gender()));
    if let Some(name) = args.voice.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        voice = voice.with_voice_name(name);
    }

    Ok(BatchConfig::from_settings(&settings)
        .with_voice(voice)
        .with_dry_run(args.dry_run))
}

/// Wait for the progress display to drain. Returns `false` if it died.
async fn finish_progress(printer: JoinHandle<()>) -> bool {
    match printer.await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Progress display task failed");
            false
        }
    }
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if tokio::signal::ctrl_c().await.is_ok() {
        eprintln!("\nInterrupted: finishing in-flight phrases...");
        tracing::warn!("Batch cancelled by user");
        cancel.cancel();
    }
}
