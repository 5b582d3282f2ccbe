//! Verify command handler.
//!
//! Read-only audit of a corpus against the store.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use voxcache_core::{Corpus, ReconciliationEngine, VoiceGender};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::display_report;

/// Arguments for the verify command.
pub struct VerifyArgs<'a> {
    pub corpus: &'a Path,
    pub report: Option<&'a Path>,
    pub gender: Option<VoiceGender>,
    pub show_missing: bool,
}

/// Execute the verify command.
///
/// Missing assets are reported, not treated as failure.
pub fn execute(ctx: &CliContext, args: &VerifyArgs<'_>) -> Result<()> {
    let corpus = Corpus::load(args.corpus).map_err(CliError::from)?;
    println!(
        "Verifying {} entries in {} categories under {}",
        corpus.len(),
        corpus.category_count(),
        ctx.store.root().display()
    );

    let report = ReconciliationEngine::new(Arc::clone(&ctx.store))
        .with_gender(args.gender)
        .verify(&corpus);

    display_report(&report, args.show_missing);

    if let Some(path) = args.report {
        report
            .write_json(path)
            .map_err(CliError::from)
            .with_context(|| format!("writing report to {}", path.display()))?;
        println!();
        println!("Report written to {}", path.display());
    }
    Ok(())
}
