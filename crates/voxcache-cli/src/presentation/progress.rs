//! Terminal progress for batch runs.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::sync::watch;
use voxcache_batch::BatchProgress;

/// Renders [`BatchProgress`] snapshots.
///
/// Draws a bar on a terminal and stays silent otherwise; the final summary
/// is printed either way.
pub struct BatchProgressPrinter {
    bar: ProgressBar,
}

impl BatchProgressPrinter {
    /// Create a printer, auto-detecting terminal capability.
    pub fn new() -> Self {
        let target = if io::stdout().is_terminal() {
            ProgressDrawTarget::stdout()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(0), target);
        bar.set_style(Self::bar_style());
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar }
    }

    /// Update the display with one snapshot.
    pub fn update(&self, progress: &BatchProgress) {
        self.bar.set_length(progress.total as u64);
        self.bar.set_position(progress.completed as u64);
        self.bar.set_message(format!(
            "{} new, {} existing, {} failed",
            progress.generated, progress.already_present, progress.failed
        ));
    }

    /// Follow a progress channel until the sender is dropped.
    pub async fn follow(self, mut rx: watch::Receiver<BatchProgress>) {
        loop {
            let snapshot = rx.borrow_and_update().clone();
            self.update(&snapshot);
            if rx.changed().await.is_err() {
                break;
            }
        }
        self.finish();
    }

    /// Finish and clear the progress display.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("🔊 {bar:28.cyan/blue} {pos:>5}/{len:<5} {msg} ETA {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Default for BatchProgressPrinter {
    fn default() -> Self {
        Self::new()
    }
}
