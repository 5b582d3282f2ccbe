//! Integration tests for `GenerationOrchestrator::ensure`.
//!
//! These drive the orchestrator against a real temporary store and a
//! counting mock provider. No network access is required.
//!
//! # What is tested
//!
//! - First call creates, second call reuses with zero extra provider calls
//! - N concurrent callers for one key collapse into one provider call
//! - Distinct keys are synthesized independently
//! - Empty audio is a generation error and leaves no file behind
//! - An asset placed in a legacy layout is served without generation
//! - The request delay follows successful calls only and does not hold
//!   waiters for the same key

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use voxcache_core::{
    AssetStore, EnsureError, GenerationOrchestrator, Language, ProviderError, SchemaGeneration,
    SpeechProvider, VoiceGender, VoiceParams, key_for,
};

// ── Mock provider ──────────────────────────────────────────────────

/// Returns canned audio after an optional delay and counts its calls.
struct CountingProvider {
    calls: AtomicUsize,
    audio: Vec<u8>,
    latency: Duration,
    fail: bool,
}

impl CountingProvider {
    fn new(audio: &[u8]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            audio: audio.to_vec(),
            latency: Duration::ZERO,
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(b"")
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechProvider for CountingProvider {
    async fn synthesize(
        &self,
        _text: &str,
        _language: Language,
        _voice: &VoiceParams,
    ) -> Result<Vec<u8>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail {
            return Err(ProviderError::service("synthesis failed"));
        }
        Ok(self.audio.clone())
    }

    async fn check_connectivity(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn setup(
    root: &std::path::Path,
    provider: CountingProvider,
) -> (Arc<GenerationOrchestrator>, Arc<CountingProvider>) {
    setup_with_delay(root, provider, Duration::ZERO)
}

fn setup_with_delay(
    root: &std::path::Path,
    provider: CountingProvider,
    delay: Duration,
) -> (Arc<GenerationOrchestrator>, Arc<CountingProvider>) {
    let provider = Arc::new(provider);
    let orch = GenerationOrchestrator::new(
        Arc::new(AssetStore::new(root)),
        Arc::clone(&provider) as Arc<dyn SpeechProvider>,
    )
    .with_request_delay(delay);
    (Arc::new(orch), provider)
}

const DELAY: Duration = Duration::from_secs(2);

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_second_ensure_skips_provider() {
    let dir = tempfile::tempdir().unwrap();
    let (orch, provider) = setup(dir.path(), CountingProvider::new(b"ID3"));
    let voice = VoiceParams::gender(VoiceGender::Female);

    let first = orch.ensure_text("Thank you", Language::En, &voice).await.unwrap();
    assert!(!first.record().already_existed);
    assert_eq!(provider.calls(), 1);

    let second = orch.ensure_text("thank   YOU", Language::En, &voice).await.unwrap();
    assert!(second.record().already_existed);
    assert_eq!(second.record().path, first.record().path);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_ensure_is_single_flight() {
    let dir = tempfile::tempdir().unwrap();
    let (orch, provider) = setup(
        dir.path(),
        CountingProvider::new(b"audio").with_latency(Duration::from_millis(50)),
    );

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let orch = Arc::clone(&orch);
            tokio::spawn(async move {
                orch.ensure_text("Спасибо", Language::Ru, &VoiceParams::default())
                    .await
            })
        })
        .collect();

    let mut records = Vec::new();
    for handle in handles {
        records.push(handle.await.unwrap().unwrap().into_record());
    }

    assert_eq!(provider.calls(), 1);
    assert_eq!(records.iter().filter(|r| !r.already_existed).count(), 1);
    let path = &records[0].path;
    assert!(records.iter().all(|r| &r.path == path && r.size_bytes == 5));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_keys_each_synthesize() {
    let dir = tempfile::tempdir().unwrap();
    let (orch, provider) = setup(
        dir.path(),
        CountingProvider::new(b"audio").with_latency(Duration::from_millis(20)),
    );

    let phrases = ["one", "two", "three", "four"];
    let handles: Vec<_> = phrases
        .iter()
        .map(|p| {
            let orch = Arc::clone(&orch);
            let p = (*p).to_string();
            tokio::spawn(async move {
                orch.ensure_text(&p, Language::En, &VoiceParams::default())
                    .await
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.await.unwrap().unwrap().was_created());
    }
    assert_eq!(provider.calls(), phrases.len());
}

#[tokio::test]
async fn test_empty_audio_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let (orch, provider) = setup(dir.path(), CountingProvider::new(b""));

    let err = orch
        .ensure_text("silence", Language::En, &VoiceParams::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        EnsureError::Generation {
            source: ProviderError::EmptyAudio,
            ..
        }
    ));
    assert_eq!(provider.calls(), 1);

    let key = key_for(
        "silence",
        Language::En,
        voxcache_core::VoiceAttributes::with_gender(VoiceGender::Female),
    )
    .unwrap();
    let canonical = orch.store().canonical_path(&key).unwrap();
    assert!(!canonical.exists());
    assert!(!canonical.parent().unwrap().exists());
}

#[tokio::test]
async fn test_legacy_asset_is_served_without_generation() {
    let dir = tempfile::tempdir().unwrap();
    let (orch, provider) = setup(dir.path(), CountingProvider::new(b"new"));

    // Per-category layout, hashed on the phrase as typed.
    let category_dir = dir.path().join("travel");
    std::fs::create_dir_all(&category_dir).unwrap();
    let legacy_path =
        category_dir.join(voxcache_core::store::asset_file_name(Language::En, "Where is the station?"));
    std::fs::write(&legacy_path, b"old audio").unwrap();

    let key = key_for(
        "Where is the station?",
        Language::En,
        voxcache_core::VoiceAttributes::with_gender(VoiceGender::Female),
    )
    .unwrap()
    .with_category("travel");

    let found = orch.store().lookup(&key).unwrap();
    assert_eq!(found.schema_generation, SchemaGeneration::PerCategory);
    assert_eq!(found.path, legacy_path);

    let outcome = orch
        .ensure_key(&key, &VoiceParams::default())
        .await
        .unwrap();
    assert_eq!(outcome.status_code(), 200);
    assert_eq!(outcome.record().schema_generation, SchemaGeneration::PerCategory);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_successful_generation_waits_out_request_delay() {
    let dir = tempfile::tempdir().unwrap();
    let (orch, _) = setup_with_delay(dir.path(), CountingProvider::new(b"ID3"), DELAY);

    let start = tokio::time::Instant::now();
    let outcome = orch
        .ensure_text("good night", Language::En, &VoiceParams::default())
        .await
        .unwrap();
    assert!(outcome.was_created());
    assert!(start.elapsed() >= DELAY);

    // A cache hit never sleeps.
    let start = tokio::time::Instant::now();
    let outcome = orch
        .ensure_text("good night", Language::En, &VoiceParams::default())
        .await
        .unwrap();
    assert!(!outcome.was_created());
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_provider_error_returns_without_delay() {
    let dir = tempfile::tempdir().unwrap();
    let (orch, provider) = setup_with_delay(dir.path(), CountingProvider::failing(), DELAY);

    let start = tokio::time::Instant::now();
    let err = orch
        .ensure_text("good night", Language::En, &VoiceParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EnsureError::Generation { .. }));
    assert_eq!(provider.calls(), 1);
    assert!(start.elapsed() < DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_waiter_is_not_held_behind_request_delay() {
    let dir = tempfile::tempdir().unwrap();
    let latency = Duration::from_millis(100);
    let (orch, provider) = setup_with_delay(
        dir.path(),
        CountingProvider::new(b"ID3").with_latency(latency),
        DELAY,
    );
    let start = tokio::time::Instant::now();

    let first = {
        let orch = Arc::clone(&orch);
        tokio::spawn(async move {
            orch.ensure_text("see you", Language::En, &VoiceParams::default())
                .await
        })
    };
    while provider.calls() == 0 {
        tokio::task::yield_now().await;
    }

    let second = orch
        .ensure_text("see you", Language::En, &VoiceParams::default())
        .await
        .unwrap();
    assert!(!second.was_created());
    assert!(start.elapsed() < DELAY);
    assert!(!first.is_finished());

    let first = first.await.unwrap().unwrap();
    assert!(first.was_created());
    assert!(start.elapsed() >= latency + DELAY);
    assert_eq!(provider.calls(), 1);
}
