//! Config command handler.
//!
//! Prints the effective settings after `.env`, environment and flags.

use anyhow::Result;
use voxcache_core::settings::{AUDIO_DIR_ENV, LEGACY_AUDIO_DIR_ENV};

use crate::bootstrap::CliContext;
use crate::presentation::{format_optional, print_separator};

/// Execute the config command.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let settings = &ctx.settings;

    println!("Effective settings");
    print_separator(50);
    println!("Audio root:        {}", ctx.store.root().display());
    println!(
        "  configured:      {}",
        format_optional(settings.audio_root.as_ref(), "(platform default)")
    );
    println!(
        "Request delay:     {} ms",
        settings.effective_request_delay().as_millis()
    );
    println!("Max concurrency:   {}", settings.effective_max_concurrency());
    println!("Default gender:    {}", settings.effective_default_gender());
    println!("Speech endpoint:   {}", ctx.endpoint);
    println!("Voices:            {}", ctx.catalog().entries().count());
    println!();
    println!("Audio root is read from {AUDIO_DIR_ENV} (or {LEGACY_AUDIO_DIR_ENV}).");
    Ok(())
}
