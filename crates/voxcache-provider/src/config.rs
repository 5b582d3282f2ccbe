//! Public configuration for the HTTP speech provider.

use std::time::Duration;

/// Configuration for [`crate::HttpSpeechProvider`].
///
/// Use the builder pattern methods to customize the provider.
///
/// # Example
///
/// ```
/// use voxcache_provider::HttpProviderConfig;
/// use std::time::Duration;
///
/// let config = HttpProviderConfig::new()
///     .with_endpoint("http://tts.internal:5050/synthesize")
///     .with_timeout(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Synthesis endpoint (POST, JSON body, audio response)
    pub(crate) endpoint: String,
    /// URL fetched by the connectivity check (endpoint origin when unset)
    pub(crate) probe_url: Option<String>,
    /// User agent string for HTTP requests
    pub(crate) user_agent: String,
    /// Synthesis request timeout
    pub(crate) timeout: Duration,
    /// Connectivity check timeout
    pub(crate) probe_timeout: Duration,
    /// Optional bearer token
    pub(crate) api_key: Option<String>,
    /// Maximum number of retry attempts for transient errors
    pub(crate) max_retries: u8,
    /// Base delay for exponential backoff
    pub(crate) retry_base_delay: Duration,
}

impl Default for HttpProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5050/synthesize".to_string(),
            probe_url: None,
            user_agent: concat!("voxcache/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(5),
            api_key: None,
            max_retries: 2,
            retry_base_delay: Duration::from_millis(500),
        }
    }
}

impl HttpProviderConfig {
    /// Create a new configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the synthesis endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the URL used by the connectivity check.
    ///
    /// Defaults to the root of the synthesis endpoint's origin.
    #[must_use]
    pub fn with_probe_url(mut self, url: impl Into<String>) -> Self {
        self.probe_url = Some(url.into());
        self
    }

    /// Set or clear the connectivity check URL. Blank values clear it.
    #[must_use]
    pub fn with_optional_probe_url(mut self, url: Option<String>) -> Self {
        self.probe_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// Set the user agent string for HTTP requests.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the synthesis request timeout.
    ///
    /// Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connectivity check timeout.
    ///
    /// Defaults to 5 seconds.
    #[must_use]
    pub const fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    /// Set an optional bearer token.
    #[must_use]
    pub fn with_optional_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    /// Set the maximum number of retry attempts for transient errors.
    ///
    /// Defaults to 2 retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u8) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay for exponential backoff retries.
    #[must_use]
    pub const fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// The synthesis endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The explicit connectivity check URL, if one was set.
    #[must_use]
    pub fn probe_url(&self) -> Option<&str> {
        self.probe_url.as_deref()
    }
}
