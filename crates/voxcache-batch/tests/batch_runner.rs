//! Integration tests for `BatchRunner`.
//!
//! Runs go against a real temporary store and a scripted provider.
//!
//! # What is tested
//!
//! - Missing assets are generated and the store is complete afterwards
//! - A failing phrase is recorded and the rest of the run continues
//! - An unreachable provider aborts before any synthesis
//! - Cancellation stops new work while the started job completes
//! - Dry runs plan without calling the provider
//! - Duplicate phrases are generated once

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use voxcache_batch::{BatchConfig, BatchRunner, CancellationToken, ItemOutcome};
use voxcache_core::{
    AssetStore, Corpus, GenerationOrchestrator, Language, ProviderError, SpeechProvider,
    VoiceGender, VoiceParams,
};

const CORPUS: &str = r#"{
    "greetings": [
        {"target": "Hello", "native": "Привет"},
        {"target": "Goodbye", "native": "Пока"}
    ],
    "numbers": [
        {"target": "One", "native": "Один"},
        {"target": "fail here", "native": "Два"}
    ]
}"#;

// ── Scripted provider ──────────────────────────────────────────────

/// Fails on phrases containing "fail", otherwise returns canned audio.
#[derive(Default)]
struct ScriptedProvider {
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
    offline: bool,
    cancel_on_first: Option<CancellationToken>,
}

impl ScriptedProvider {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechProvider for ScriptedProvider {
    async fn synthesize(
        &self,
        text: &str,
        _language: Language,
        _voice: &VoiceParams,
    ) -> Result<Vec<u8>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.texts.lock().unwrap().push(text.to_string());
        if let Some(token) = &self.cancel_on_first {
            token.cancel();
        }
        if text.contains("fail") {
            return Err(ProviderError::Service {
                message: "synthesis rejected".to_string(),
                status: Some(500),
            });
        }
        Ok(b"ID3 audio".to_vec())
    }

    async fn check_connectivity(&self) -> Result<(), ProviderError> {
        if self.offline {
            Err(ProviderError::unavailable("network unreachable"))
        } else {
            Ok(())
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn runner(
    root: &std::path::Path,
    provider: ScriptedProvider,
    config: BatchConfig,
) -> (BatchRunner, Arc<ScriptedProvider>) {
    let provider = Arc::new(provider);
    let orchestrator = GenerationOrchestrator::new(
        Arc::new(AssetStore::new(root)),
        Arc::clone(&provider) as Arc<dyn SpeechProvider>,
    )
    .with_request_delay(Duration::ZERO);
    (BatchRunner::new(Arc::new(orchestrator), config), provider)
}

fn female(concurrency: usize) -> BatchConfig {
    BatchConfig::default()
        .with_concurrency(concurrency)
        .with_voice(VoiceParams::gender(VoiceGender::Female))
}

fn corpus() -> Corpus {
    Corpus::from_json_str(CORPUS).unwrap()
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_run_generates_missing_and_records_failures() {
    let dir = tempfile::tempdir().unwrap();
    let (runner, provider) = runner(dir.path(), ScriptedProvider::default(), female(3));

    let summary = runner.run(&corpus(), CancellationToken::new()).await.unwrap();

    assert_eq!(summary.expected, 8);
    assert_eq!(summary.found_before, 0);
    assert_eq!(summary.planned, 8);
    assert_eq!(summary.totals.generated, 7);
    assert_eq!(summary.totals.failed, 1);
    assert_eq!(summary.skipped, 0);
    assert!(!summary.cancelled);
    assert!(!summary.is_success());
    assert_eq!(provider.calls(), 8);

    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].category, "numbers");
    assert_eq!(summary.failed[0].phrase, "fail here");
    assert!(summary.failed[0].error.contains("synthesis rejected"));

    let categories: Vec<_> = summary.per_category.keys().map(String::as_str).collect();
    assert_eq!(categories, vec!["greetings", "numbers"]);
    assert_eq!(summary.per_category["greetings"].generated, 4);
    assert_eq!(summary.per_category["numbers"].failed, 1);

    let progress = runner.subscribe().borrow().clone();
    assert_eq!(progress.total, 8);
    assert!(progress.is_done());
    assert_eq!(progress.failed, 1);

    // Only the failed phrase is still missing.
    let report = runner.plan(&corpus());
    assert_eq!(report.total_found, 7);
    assert_eq!(report.missing.len(), 1);
    assert_eq!(report.missing[0].phrase, "fail here");
}

#[tokio::test]
async fn test_second_run_has_nothing_to_do() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = Corpus::from_json_str(r#"{"a": [{"target": "Hello", "native": "Привет"}]}"#)
        .unwrap();
    let (runner, provider) = runner(dir.path(), ScriptedProvider::default(), female(2));

    let first = runner.run(&corpus, CancellationToken::new()).await.unwrap();
    assert!(first.is_success());
    assert_eq!(provider.calls(), 2);

    let second = runner.run(&corpus, CancellationToken::new()).await.unwrap();
    assert_eq!(second.planned, 0);
    assert_eq!(second.found_before, 2);
    assert!(second.is_success());
    assert_eq!(provider.calls(), 2);
    assert_ne!(first.run_id, second.run_id);
}

#[tokio::test]
async fn test_unreachable_provider_aborts_before_synthesis() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider {
        offline: true,
        ..ScriptedProvider::default()
    };
    let (runner, provider) = runner(dir.path(), provider, female(3));

    let err = runner
        .run(&corpus(), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_unavailable());
    assert_eq!(provider.calls(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_cancellation_stops_new_work() {
    let dir = tempfile::tempdir().unwrap();
    let cancel = CancellationToken::new();
    let provider = ScriptedProvider {
        cancel_on_first: Some(cancel.clone()),
        ..ScriptedProvider::default()
    };
    let (runner, provider) = runner(dir.path(), provider, female(1));

    let summary = runner.run(&corpus(), cancel).await.unwrap();

    // The in-flight job finished and was committed; nothing else started.
    assert!(summary.cancelled);
    assert_eq!(provider.calls(), 1);
    assert_eq!(summary.totals.generated, 1);
    assert_eq!(summary.skipped, 7);
    assert_eq!(runner.plan(&corpus()).total_found, 1);
}

#[tokio::test]
async fn test_dry_run_calls_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let provider = ScriptedProvider {
        offline: true,
        ..ScriptedProvider::default()
    };
    let (runner, provider) = runner(dir.path(), provider, female(3).with_dry_run(true));

    let summary = runner.run(&corpus(), CancellationToken::new()).await.unwrap();

    assert!(summary.dry_run);
    assert_eq!(summary.planned, 8);
    assert_eq!(summary.totals.attempted(), 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(provider.calls(), 0);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_duplicate_phrases_generate_once() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = Corpus::from_json_str(
        r#"{"a": [{"target": "Hello", "native": ""}, {"target": "  hello ", "native": ""}]}"#,
    )
    .unwrap();
    let (runner, provider) = runner(dir.path(), ScriptedProvider::default(), female(1));

    let summary = runner.run(&corpus, CancellationToken::new()).await.unwrap();

    assert_eq!(summary.planned, 2);
    assert_eq!(summary.totals.generated, 1);
    assert_eq!(summary.totals.already_present, 1);
    assert_eq!(provider.calls(), 1);
    assert_eq!(provider.texts.lock().unwrap().as_slice(), ["hello"]);
}

#[tokio::test]
async fn test_run_file_reports_unreadable_corpus() {
    let dir = tempfile::tempdir().unwrap();
    let (runner, _) = runner(dir.path(), ScriptedProvider::default(), female(1));
    let err = runner
        .run_file(&dir.path().join("missing.json"), CancellationToken::new())
        .await
        .unwrap_err();
    assert!(!err.is_unavailable());
    assert!(matches!(err, voxcache_batch::BatchError::Corpus(_)));
}

#[test]
fn test_item_outcome_serializes_snake_case() {
    assert_eq!(
        serde_json::to_string(&ItemOutcome::AlreadyPresent).unwrap(),
        "\"already_present\""
    );
}
