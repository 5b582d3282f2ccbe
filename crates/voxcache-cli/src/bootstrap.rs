//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter. The asset store, the HTTP speech provider and the
//! generation orchestrator are instantiated here; command handlers receive
//! the composed [`CliContext`].

use std::sync::Arc;

use voxcache_core::{AssetStore, GenerationOrchestrator, Settings, SettingsUpdate, SpeechProvider};
use voxcache_provider::{DefaultSpeechProvider, HttpProviderConfig, VoiceCatalog};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Settings after environment and command-line overrides.
    pub settings: Settings,
    /// Speech service connection.
    pub provider: HttpProviderConfig,
}

impl CliConfig {
    /// Read settings from the environment and apply global flags.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let settings = Settings::from_env()?;
        Ok(Self::with_settings(settings, cli))
    }

    /// Apply global flags on top of `settings`.
    pub fn with_settings(mut settings: Settings, cli: &Cli) -> Self {
        if let Some(dir) = &cli.audio_dir {
            settings.merge(&SettingsUpdate {
                audio_root: Some(Some(dir.clone())),
                ..Default::default()
            });
        }

        let mut provider = HttpProviderConfig::new()
            .with_optional_api_key(cli.api_key.clone())
            .with_optional_probe_url(cli.probe_url.clone());
        if let Some(endpoint) = &cli.endpoint {
            provider = provider.with_endpoint(endpoint.clone());
        }

        Self { settings, provider }
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// Effective settings.
    pub settings: Settings,
    /// The audio store.
    pub store: Arc<AssetStore>,
    /// The HTTP provider (kept concrete for its voice catalog).
    pub provider: Arc<DefaultSpeechProvider>,
    /// The single write path into the store.
    pub orchestrator: Arc<GenerationOrchestrator>,
    /// Speech service endpoint in use.
    pub endpoint: String,
}

impl CliContext {
    /// Voices available to the provider.
    pub fn catalog(&self) -> &VoiceCatalog {
        self.provider.catalog()
    }
}

/// Wire the store, provider and orchestrator together.
pub fn bootstrap(config: CliConfig) -> Result<CliContext, CliError> {
    voxcache_core::validate_settings(&config.settings)?;
    let root = config.settings.effective_audio_root()?;

    let store = Arc::new(
        AssetStore::new(&root).with_default_gender(config.settings.effective_default_gender()),
    );
    let provider = Arc::new(DefaultSpeechProvider::new(
        &config.provider,
        VoiceCatalog::standard(),
    )?);
    let orchestrator = Arc::new(GenerationOrchestrator::from_settings(
        Arc::clone(&store),
        Arc::clone(&provider) as Arc<dyn SpeechProvider>,
        &config.settings,
    ));

    tracing::debug!(
        root = %root.display(),
        endpoint = config.provider.endpoint(),
        "CLI context ready"
    );

    Ok(CliContext {
        endpoint: config.provider.endpoint().to_string(),
        settings: config.settings,
        store,
        provider,
        orchestrator,
    })
}
