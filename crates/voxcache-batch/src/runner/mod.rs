//! Batch runner: reconcile, then generate what is missing.

mod worker;

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{Mutex, mpsc, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use voxcache_core::{Corpus, GenerationOrchestrator, ReconciliationEngine, ReconciliationReport};

use crate::config::BatchConfig;
use crate::error::BatchError;
use crate::job::GenerationJob;
use crate::progress::BatchProgress;
use crate::summary::{BatchSummary, SummaryBuilder};

use worker::{WorkerDeps, run_worker};

/// Drives a batch run over a bounded worker pool.
///
/// Throughput is bounded both by the worker count and by the orchestrator's
/// per-call delay.
pub struct BatchRunner {
    orchestrator: Arc<GenerationOrchestrator>,
    config: BatchConfig,
    progress_tx: watch::Sender<BatchProgress>,
}

impl BatchRunner {
    /// Create a runner.
    pub fn new(orchestrator: Arc<GenerationOrchestrator>, config: BatchConfig) -> Self {
        let (progress_tx, _) = watch::channel(BatchProgress::default());
        Self {
            orchestrator,
            config,
            progress_tx,
        }
    }

    /// Subscribe to progress snapshots.
    pub fn subscribe(&self) -> watch::Receiver<BatchProgress> {
        self.progress_tx.subscribe()
    }

    /// Configuration in use.
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Reconcile the corpus against the store for the configured gender.
    pub fn plan(&self, corpus: &Corpus) -> ReconciliationReport {
        ReconciliationEngine::new(Arc::clone(self.orchestrator.store()))
            .with_gender(self.config.voice.gender)
            .verify(corpus)
    }

    /// Load a corpus file and run.
    pub async fn run_file(
        &self,
        path: &Path,
        cancel: CancellationToken,
    ) -> Result<BatchSummary, BatchError> {
        let corpus = Corpus::load(path)?;
        self.run(&corpus, cancel).await
    }

    /// Generate every missing asset of `corpus`.
    ///
    /// Per-item failures are recorded in the summary and never abort the run.
    /// An unreachable provider aborts before any item is attempted.
    pub async fn run(
        &self,
        corpus: &Corpus,
        cancel: CancellationToken,
    ) -> Result<BatchSummary, BatchError> {
        let started = Instant::now();
        let run_id = Uuid::new_v4();

        if !self.config.dry_run {
            self.orchestrator
                .provider()
                .check_connectivity()
                .await
                .map_err(BatchError::ProviderUnavailable)?;
        }

        let report = self.plan(corpus);
        let mut summary = SummaryBuilder::new(
            run_id,
            report.total_expected,
            report.total_found,
            report.total_missing(),
        );
        for category in report.per_category.keys() {
            summary.category(category);
        }

        let jobs: VecDeque<GenerationJob> = report
            .missing
            .into_iter()
            .enumerate()
            .map(|(index, missing)| GenerationJob::from_missing(index, missing))
            .collect();
        let planned = jobs.len();
        self.progress_tx.send_replace(BatchProgress::started(planned));

        tracing::info!(
            target: "voxcache.batch",
            %run_id,
            expected = report.total_expected,
            found = report.total_found,
            planned,
            workers = self.config.concurrency,
            dry_run = self.config.dry_run,
            "Batch run starting"
        );

        if self.config.dry_run || planned == 0 {
            return Ok(summary.finish(started.elapsed(), false, self.config.dry_run));
        }

        let (results_tx, mut results_rx) = mpsc::unbounded_channel();
        let deps = WorkerDeps {
            orchestrator: Arc::clone(&self.orchestrator),
            voice: self.config.voice.clone(),
            queue: Arc::new(Mutex::new(jobs)),
            cancel: cancel.clone(),
            results: results_tx,
        };

        let mut workers = JoinSet::new();
        for worker_id in 0..self.config.concurrency.clamp(1, planned) {
            workers.spawn(run_worker(worker_id, deps.clone()));
        }
        drop(deps);

        while let Some(result) = results_rx.recv().await {
            let outcome = result.outcome;
            summary.record(result);
            self.progress_tx.send_modify(|p| p.record(outcome));
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!(target: "voxcache.batch", error = %e, "Worker task failed");
            }
        }

        let summary = summary.finish(started.elapsed(), cancel.is_cancelled(), false);
        tracing::info!(
            target: "voxcache.batch",
            %run_id,
            generated = summary.totals.generated,
            already_present = summary.totals.already_present,
            failed = summary.totals.failed,
            skipped = summary.skipped,
            cancelled = summary.cancelled,
            elapsed_ms = summary.elapsed.as_millis(),
            "Batch run finished"
        );
        Ok(summary)
    }
}
