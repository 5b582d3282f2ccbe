//! `SpeechProvider` implementation over HTTP.

use async_trait::async_trait;
use serde::Serialize;
use url::Url;
use voxcache_core::{Language, ProviderError, SpeechProvider, VoiceParams};

use crate::catalog::VoiceCatalog;
use crate::config::HttpProviderConfig;
use crate::error::HttpResult;
use crate::http::{HttpBackend, ReqwestBackend};

/// Default provider using the reqwest HTTP backend.
pub type DefaultSpeechProvider = HttpSpeechProvider<ReqwestBackend>;

/// JSON body sent to the synthesis endpoint.
#[derive(Debug, Serialize)]
struct SynthesisBody<'a> {
    text: &'a str,
    language: Language,
    voice: &'a str,
    rate: f32,
}

/// Speech provider that posts JSON to an HTTP synthesis service.
///
/// The service is expected to answer with encoded audio bytes. Voice
/// selection happens here, against the catalog supplied at construction.
pub struct HttpSpeechProvider<B: HttpBackend> {
    backend: B,
    catalog: VoiceCatalog,
    endpoint: Url,
    probe_url: Url,
    probe_timeout: std::time::Duration,
}

impl DefaultSpeechProvider {
    /// Create a provider with the given configuration and voices.
    pub fn new(config: &HttpProviderConfig, catalog: VoiceCatalog) -> Result<Self, ProviderError> {
        let backend = ReqwestBackend::new(config)?;
        Self::with_backend(backend, config, catalog).map_err(Into::into)
    }
}

impl<B: HttpBackend> HttpSpeechProvider<B> {
    /// Create a provider over an arbitrary backend.
    pub(crate) fn with_backend(
        backend: B,
        config: &HttpProviderConfig,
        catalog: VoiceCatalog,
    ) -> HttpResult<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let probe_url = match config.probe_url.as_deref() {
            Some(url) => Url::parse(url)?,
            None => origin_root(&endpoint),
        };
        Ok(Self {
            backend,
            catalog,
            endpoint,
            probe_url,
            probe_timeout: config.probe_timeout,
        })
    }

    /// Voices available to this provider.
    pub const fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }
}

/// Root path of the endpoint's origin, e.g. `http://tts:5050/` for
/// `http://tts:5050/v1/synthesize?fmt=mp3`.
fn origin_root(endpoint: &Url) -> Url {
    let mut root = endpoint.clone();
    root.set_path("/");
    root.set_query(None);
    root.set_fragment(None);
    root
}

#[async_trait]
impl<B: HttpBackend> SpeechProvider for HttpSpeechProvider<B> {
    async fn synthesize(
        &self,
        text: &str,
        language: Language,
        voice: &VoiceParams,
    ) -> Result<Vec<u8>, ProviderError> {
        let gender = voice.gender.unwrap_or_default();
        let Some(voice_name) = self
            .catalog
            .resolve(language, gender, voice.voice_name.as_deref())
        else {
            return Err(ProviderError::service(format!(
                "no voice configured for {language}/{gender}"
            )));
        };

        let body = SynthesisBody {
            text,
            language,
            voice: voice_name,
            rate: voice.rate.unwrap_or_else(|| self.catalog.rate(language)),
        };
        let body = serde_json::to_value(&body).map_err(|e| ProviderError::service(e.to_string()))?;

        tracing::debug!(
            target: "voxcache.provider",
            voice = voice_name,
            language = %language,
            chars = text.chars().count(),
            "Posting synthesis request"
        );

        let audio = self.backend.post_json(&self.endpoint, &body).await?;
        if audio.is_empty() {
            return Err(ProviderError::EmptyAudio);
        }
        Ok(audio)
    }

    async fn check_connectivity(&self) -> Result<(), ProviderError> {
        self.backend
            .probe(&self.probe_url, self.probe_timeout)
            .await
            .map_err(|e| ProviderError::unavailable(e.to_string()))?;
        tracing::debug!(target: "voxcache.provider", url = %self.probe_url, "Connectivity ok");
        Ok(())
    }
}
