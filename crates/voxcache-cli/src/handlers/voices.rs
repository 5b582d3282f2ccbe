//! Voices command handler.

use anyhow::Result;
use voxcache_core::{Language, VoiceGender};

use crate::bootstrap::CliContext;
use crate::presentation::print_separator;

/// Execute the voices command.
pub fn execute(ctx: &CliContext, language: Option<Language>, gender: Option<VoiceGender>) -> Result<()> {
    let catalog = ctx.catalog();
    let entries: Vec<_> = catalog
        .entries()
        .filter(|e| language.is_none_or(|l| e.language == l))
        .filter(|e| gender.is_none_or(|g| e.gender == g))
        .collect();

    if entries.is_empty() {
        println!("No voices match.");
        return Ok(());
    }

    println!("{:<10} {:<8} {:<6} Voice", "Language", "Gender", "Rate");
    print_separator(50);
    for entry in entries {
        println!(
            "{:<10} {:<8} {:<6.2} {}",
            entry.language.code(),
            entry.gender.as_str(),
            catalog.rate(entry.language),
            entry.name
        );
    }
    Ok(())
}
