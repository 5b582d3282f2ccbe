//! Ensure command handler.

use anyhow::Result;
use serde_json::json;

use crate::bootstrap::CliContext;
use crate::commands::PhraseArgs;
use crate::error::CliError;
use crate::presentation::display_asset;

/// Execute the ensure command.
///
/// Returns the cached asset or synthesizes it. With `--json` the record is
/// printed together with the request-surface status code (200 existing,
/// 201 created).
pub async fn execute(ctx: &CliContext, phrase: &PhraseArgs, as_json: bool) -> Result<()> {
    let request = phrase.to_request().map_err(CliError::from)?;
    let outcome = ctx
        .orchestrator
        .ensure(&request)
        .await
        .map_err(CliError::from)?;

    if as_json {
        let body = json!({
            "status": outcome.status_code(),
            "record": outcome.record(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if outcome.was_created() {
        println!("✓ Generated:");
    } else {
        println!("✓ Already cached:");
    }
    display_asset(outcome.record());
    Ok(())
}
