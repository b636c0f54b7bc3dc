use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::app::Result;
use crate::config::HttpConfig;
use crate::transport::{Request, Response, Transport};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts allowed after the first one
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each one after it
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for RetryConfig {
    fn from(config: &HttpConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            base_delay: config.base_delay(),
        }
    }
}

impl RetryConfig {
    fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(1 << attempt.min(16))
    }
}

/// Wraps a transport with bounded exponential-backoff retries.
///
/// Requests not marked [`Request::retryable`] go out exactly once. Retryable
/// ones are repeated on transient errors and on 429/5xx responses; when the
/// budget runs out the last response (or error) is returned unchanged.
pub struct RetryingTransport {
    inner: Arc<dyn Transport + Send + Sync>,
    config: RetryConfig,
}

impl RetryingTransport {
    pub fn new(inner: Arc<dyn Transport + Send + Sync>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

fn should_retry(result: &Result<Response>) -> bool {
    match result {
        Ok(response) => response.status == 429 || response.status >= 500,
        Err(e) => e.is_transient(),
    }
}

#[async_trait]
impl Transport for RetryingTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        if !request.retryable {
            return self.inner.send(request).await;
        }

        let mut attempt = 0;
        loop {
            let result = self.inner.send(request.clone()).await;

            if attempt >= self.config.max_retries || !should_retry(&result) {
                return result;
            }

            let delay = self.config.delay_for(attempt);
            match &result {
                Ok(response) => tracing::warn!(
                    "{} returned {}, retrying in {:?} ({}/{})",
                    request.url,
                    response.status,
                    delay,
                    attempt + 1,
                    self.config.max_retries
                ),
                Err(e) => tracing::warn!(
                    "{} failed: {}, retrying in {:?} ({}/{})",
                    request.url,
                    e,
                    delay,
                    attempt + 1,
                    self.config.max_retries
                ),
            }

            sleep(delay).await;
            attempt += 1;
        }
    }
}
