//! Batch run configuration.

use voxcache_core::{Settings, VoiceParams};

/// How a batch run behaves.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of concurrent workers (at least 1).
    pub concurrency: usize,
    /// Voice parameters applied to every generated phrase.
    pub voice: VoiceParams,
    /// Reconcile and plan only; call nothing.
    pub dry_run: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: voxcache_core::DEFAULT_MAX_CONCURRENCY as usize,
            voice: VoiceParams::default(),
            dry_run: false,
        }
    }
}

impl BatchConfig {
    /// Configuration taken from settings.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            concurrency: settings.effective_max_concurrency(),
            voice: VoiceParams::gender(settings.effective_default_gender()),
            dry_run: false,
        }
    }

    /// Set the worker count.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Set the voice parameters.
    #[must_use]
    pub fn with_voice(mut self, voice: VoiceParams) -> Self {
        self.voice = voice;
        self
    }

    /// Enable or disable dry-run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxcache_core::VoiceGender;

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            max_concurrency: Some(7),
            default_gender: Some(VoiceGender::Male),
            ..Settings::with_defaults()
        };
        let config = BatchConfig::from_settings(&settings);
        assert_eq!(config.concurrency, 7);
        assert_eq!(config.voice.gender, Some(VoiceGender::Male));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_concurrency_is_at_least_one() {
        assert_eq!(BatchConfig::default().with_concurrency(0).concurrency, 1);
    }
}
