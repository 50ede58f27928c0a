use std::time::Duration;

use jsp_common::Secret;

pub const DEFAULT_API_URL: &str = "https://api.razorpay.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the Razorpay API. The `key_id` doubles as the public key the checkout
/// widget needs; `key_secret` must never leave the server. Both are injected at construction —
/// this crate never reads the environment itself.
#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: Secret<String>,
    pub api_url: String,
    /// Outbound calls carry a bounded timeout; after this the call fails and the caller may retry
    /// order creation from scratch.
    pub timeout: Duration,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self {
            key_id: String::default(),
            key_secret: Secret::default(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RazorpayConfig {
    pub fn new(key_id: String, key_secret: Secret<String>) -> Self {
        Self { key_id, key_secret, ..Default::default() }
    }

    pub fn with_api_url<S: Into<String>>(mut self, api_url: S) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
