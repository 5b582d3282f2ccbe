//! Rendering of asset records, reconciliation reports and batch summaries.

use voxcache_batch::BatchSummary;
use voxcache_core::{AssetRecord, Language, ReconciliationReport};

use super::tables::{percent, print_separator, truncate_string};

const PHRASE_WIDTH: usize = 40;

/// Print one asset record.
pub fn display_asset(record: &AssetRecord) {
    println!("  Path:       {}", record.path.display());
    println!("  Size:       {} bytes", record.size_bytes);
    println!("  Generation: {}", record.schema_generation);
    if !record.schema_generation.is_current() {
        println!("  (stored under a legacy layout)");
    }
}

/// Print a reconciliation report.
pub fn display_report(report: &ReconciliationReport, show_missing: bool) {
    println!();
    println!("Verification report ({})", report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    print_separator(60);
    println!(
        "Expected: {}   Found: {}   Missing: {}",
        report.total_expected,
        report.total_found,
        report.total_missing()
    );

    for language in Language::ALL {
        if let Some(tally) = report.per_language.get(&language) {
            println!(
                "  {language}: {} found, {} missing ({})",
                tally.found,
                tally.missing,
                percent(tally.coverage_percent())
            );
        }
    }

    if !report.per_category.is_empty() {
        println!();
        println!("{:<24} {:>8} {:>8} {:>8}", "Category", "Expected", "Found", "Missing");
        print_separator(60);
        for (category, tally) in &report.per_category {
            println!(
                "{:<24} {:>8} {:>8} {:>8}",
                truncate_string(category, 24),
                tally.expected,
                tally.found,
                tally.missing
            );
        }
    }

    let legacy = report.legacy_found();
    if legacy > 0 {
        println!();
        println!("{legacy} asset(s) are stored under legacy layouts:");
        for (generation, count) in &report.per_generation {
            if !generation.is_current() {
                println!("  {generation}: {count}");
            }
        }
    }

    if !report.invalid.is_empty() {
        println!();
        println!("Skipped {} field(s) with no speakable text:", report.invalid.len());
        for field in &report.invalid {
            println!(
                "  [{}] {} {:?}: {}",
                field.category, field.language, field.phrase, field.reason
            );
        }
    }

    if show_missing && !report.missing.is_empty() {
        println!();
        println!("Missing:");
        for missing in &report.missing {
            println!(
                "  [{}] {} {:<width$} {}",
                missing.category,
                missing.language,
                truncate_string(&missing.phrase, PHRASE_WIDTH),
                missing.expected_path.display(),
                width = PHRASE_WIDTH
            );
        }
    }
}

/// Print the result of a batch run.
pub fn display_batch_summary(summary: &BatchSummary) {
    println!();
    if summary.dry_run {
        println!("Dry run: {} asset(s) would be generated", summary.planned);
    } else if summary.cancelled {
        println!("Batch cancelled after {:.1}s", summary.elapsed.as_secs_f64());
    } else {
        println!("Batch finished in {:.1}s", summary.elapsed.as_secs_f64());
    }
    print_separator(60);
    println!(
        "Expected: {}   Present before: {}   Planned: {}",
        summary.expected, summary.found_before, summary.planned
    );

    if !summary.dry_run {
        println!(
            "Generated: {}   Already present: {}   Failed: {}   Skipped: {}",
            summary.totals.generated,
            summary.totals.already_present,
            summary.totals.failed,
            summary.skipped
        );

        if summary.per_category.values().any(|c| c.attempted() > 0) {
            println!();
            println!("{:<24} {:>9} {:>9} {:>8}", "Category", "Generated", "Existing", "Failed");
            print_separator(60);
            for (category, counts) in &summary.per_category {
                if counts.attempted() == 0 {
                    continue;
                }
                println!(
                    "{:<24} {:>9} {:>9} {:>8}",
                    truncate_string(category, 24),
                    counts.generated,
                    counts.already_present,
                    counts.failed
                );
            }
        }
    }

    if !summary.failed.is_empty() {
        println!();
        println!("Failed:");
        for item in &summary.failed {
            println!(
                "  [{}] {} {}: {}",
                item.category,
                item.language,
                truncate_string(&item.phrase, PHRASE_WIDTH),
                item.error
            );
        }
    }
    println!();
    println!("Run ID: {}", summary.run_id);
}
