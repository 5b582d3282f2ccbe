//! HTTP backend abstraction for the speech service.
//!
//! The provider talks to the service through a small trait so it can be
//! tested against a fake. The production implementation uses reqwest with
//! retry for transient errors.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::config::HttpProviderConfig;
use crate::error::{HttpError, HttpResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that can post a synthesis request.
///
/// This is an implementation detail - external code should use the
/// `SpeechProvider` port.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// POST a JSON body and return the raw response bytes.
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> HttpResult<Vec<u8>>;

    /// GET a URL and succeed on any non-5xx answer within `timeout`.
    async fn probe(&self, url: &Url, timeout: Duration) -> HttpResult<()>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest with retry logic.
///
/// Implements exponential backoff for server errors (5xx) and network
/// errors. Client errors (4xx) fail immediately.
pub struct ReqwestBackend {
    client: reqwest::Client,
    max_retries: u8,
    retry_base_delay: Duration,
    api_key: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &HttpProviderConfig) -> HttpResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            max_retries: config.max_retries,
            retry_base_delay: config.retry_base_delay,
            api_key: config.api_key.clone(),
        })
    }

    fn build_request(&self, url: &Url, body: &serde_json::Value) -> reqwest::RequestBuilder {
        let mut request = self.client.post(url.as_str()).json(body);
        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("Bearer {key}"));
        }
        request
    }

    /// Post with automatic retry for transient errors.
    async fn post_with_retry(
        &self,
        url: &Url,
        body: &serde_json::Value,
    ) -> HttpResult<reqwest::Response> {
        let mut last_error: Option<HttpError> = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                let delay = self.retry_base_delay * 2u32.pow(u32::from(attempt) - 1);
                tracing::debug!(
                    target: "voxcache.provider",
                    attempt,
                    delay_ms = delay.as_millis(),
                    "Retrying synthesis request"
                );
                tokio::time::sleep(delay).await;
            }

            match self.build_request(url, body).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(response);
                    }

                    let err = HttpError::Status {
                        status: status.as_u16(),
                        url: url.to_string(),
                    };
                    // 5xx errors are retryable (server-side issues)
                    if status.is_server_error() && attempt < self.max_retries {
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                }
                Err(e) => {
                    if attempt < self.max_retries {
                        last_error = Some(e.into());
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }

        Err(last_error.unwrap_or_else(|| HttpError::Connect("no attempt was made".to_string())))
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> HttpResult<Vec<u8>> {
        let response = self.post_with_retry(url, body).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    async fn probe(&self, url: &Url, timeout: Duration) -> HttpResult<()> {
        let response = self
            .client
            .get(url.as_str())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| HttpError::Connect(e.to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = HttpProviderConfig::default();
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.max_retries, 2);
        assert_eq!(backend.retry_base_delay, Duration::from_millis(500));
        assert!(backend.api_key.is_none());
    }

    #[test]
    fn test_reqwest_backend_with_key() {
        let config = HttpProviderConfig::default().with_optional_api_key(Some("k".to_string()));
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn test_unreachable_probe_is_connect_error() {
        let config = HttpProviderConfig::default();
        let backend = ReqwestBackend::new(&config).unwrap();
        // Port 9 (discard) on localhost is closed in test environments.
        let url = Url::parse("http://127.0.0.1:9/").unwrap();
        let result = tokio_test::block_on(backend.probe(&url, Duration::from_millis(500)));
        assert!(matches!(result, Err(HttpError::Connect(_))));
    }
}
