//! Gateway client configuration.

use std::time::Duration;

/// Default gateway base URL.
pub const DEFAULT_GATEWAY_URL: &str = "https://api.learnforge.app";

/// Default idle timeout between stream reads, in seconds.
const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 90;

/// Configuration for the lesson gateway client.
///
/// # Example
///
/// ```ignore
/// use learnforge::config::GatewayConfig;
///
/// let config = GatewayConfig::default()
///     .with_base_url("http://localhost:54321")
///     .with_api_key("anon-key");
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the lesson gateway.
    pub base_url: String,
    /// Bearer token sent with each request, if any.
    pub api_key: Option<String>,
    /// Maximum wait between stream reads; `None` disables the bound.
    pub idle_timeout: Option<Duration>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            api_key: None,
            idle_timeout: Some(Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS)),
        }
    }
}

impl GatewayConfig {
    /// Create a new GatewayConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gateway base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the bearer token.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set or disable the idle timeout.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Create config from `LEARNFORGE_*` environment variables.
    ///
    /// `LEARNFORGE_GATEWAY_URL` overrides the base URL,
    /// `LEARNFORGE_API_KEY` sets the bearer token, and
    /// `LEARNFORGE_IDLE_TIMEOUT_SECS` adjusts the idle bound (0 disables
    /// it). Blank or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("LEARNFORGE_GATEWAY_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        if let Ok(key) = std::env::var("LEARNFORGE_API_KEY") {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }
        if let Ok(secs) = std::env::var("LEARNFORGE_IDLE_TIMEOUT_SECS") {
            if let Ok(secs) = secs.trim().parse::<u64>() {
                config.idle_timeout = (secs > 0).then(|| Duration::from_secs(secs));
            }
        }

        config
    }
}
