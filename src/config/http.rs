use serde::Deserialize;
use std::time::Duration;

/// Settings shared by every outbound HTTP call
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds (default: 30)
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Extra attempts after the first for retryable requests (default: 2)
    pub max_retries: u32,

    /// Delay before the first retry in milliseconds, doubled each attempt (default: 500)
    pub base_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("feedcaster/", env!("CARGO_PKG_VERSION")).to_string(),
            max_retries: 2,
            base_delay_ms: 500,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}
