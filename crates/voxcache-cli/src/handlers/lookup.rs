//! Lookup command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::commands::PhraseArgs;
use crate::error::CliError;
use crate::presentation::display_asset;

/// Execute the lookup command.
///
/// Reports the stored asset for a phrase, searching every layout
/// generation. Never calls the speech service. A miss exits non-zero.
pub fn execute(ctx: &CliContext, phrase: &PhraseArgs) -> Result<()> {
    let request = phrase.to_request().map_err(CliError::from)?;
    let record = ctx
        .orchestrator
        .lookup(&request)
        .map_err(|e| CliError::Arguments(e.to_string()))?;

    match record {
        Some(record) => {
            println!("Found ({}):", request.language);
            display_asset(&record);
            Ok(())
        }
        None => Err(CliError::Core(format!(
            "No cached asset for '{}' ({})",
            request.text, request.language
        ))
        .into()),
    }
}
