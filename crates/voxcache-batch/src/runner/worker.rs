//! Batch worker loop.
//!
//! Workers share a job queue and a cancellation token. Each worker checks the
//! token before taking a job; a job already started runs to completion, so
//! cancellation never interrupts a provider call or a commit.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;
use voxcache_core::{GenerationOrchestrator, VoiceParams};

use crate::job::{GenerationJob, ItemOutcome, JobResult};

/// Dependencies for a worker, all cheap to clone.
#[derive(Clone)]
pub(crate) struct WorkerDeps {
    pub orchestrator: Arc<GenerationOrchestrator>,
    pub voice: VoiceParams,
    pub queue: Arc<Mutex<VecDeque<GenerationJob>>>,
    pub cancel: CancellationToken,
    pub results: mpsc::UnboundedSender<JobResult>,
}

/// Pull jobs until the queue is empty or the run is cancelled.
pub(crate) async fn run_worker(worker_id: usize, deps: WorkerDeps) {
    loop {
        if deps.cancel.is_cancelled() {
            tracing::debug!(target: "voxcache.batch", worker_id, "Worker stopping: cancelled");
            break;
        }
        let Some(job) = deps.queue.lock().await.pop_front() else {
            break;
        };

        let result = run_job(job, &deps.orchestrator, &deps.voice).await;
        if deps.results.send(result).is_err() {
            break;
        }
    }
}

/// Ensure one phrase. Failures become data, never errors.
pub(crate) async fn run_job(
    job: GenerationJob,
    orchestrator: &GenerationOrchestrator,
    voice: &VoiceParams,
) -> JobResult {
    match orchestrator.ensure_key(&job.key, voice).await {
        Ok(outcome) => {
            let outcome = if outcome.was_created() {
                ItemOutcome::Generated
            } else {
                ItemOutcome::AlreadyPresent
            };
            JobResult {
                job,
                outcome,
                error: None,
            }
        }
        Err(e) => {
            tracing::warn!(
                target: "voxcache.batch",
                category = %job.category,
                language = %job.language,
                phrase = %job.phrase,
                error = %e,
                "Generation failed"
            );
            JobResult {
                job,
                outcome: ItemOutcome::Failed,
                error: Some(e.to_string()),
            }
        }
    }
}
