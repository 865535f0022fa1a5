//! Client configuration: the public [`Config`] and the internal [`ClientOptions`].

use std::fmt;
use std::time::Duration;

use crate::retry::{RetryPolicy, DEFAULT_MAX_RETRIES, DEFAULT_RETRY_DELAY};

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.posty5.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Public configuration for an [`crate::HttpClient`].
#[derive(Clone)]
pub struct Config {
    /// Base URL for the API. Defaults to `https://api.posty5.com`.
    pub base_url: String,
    /// Sent as `X-API-Key` on every metadata call when set.
    pub api_key: Option<String>,
    /// Log every request and response at debug level.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            debug: false,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("debug", &self.debug)
            .finish()
    }
}

impl Config {
    /// Configuration for the production API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Points the client at a different base URL. Used for testing with wiremock.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Reads `POSTY5_API_KEY`, `POSTY5_BASE_URL` and `POSTY5_DEBUG`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env_string("POSTY5_BASE_URL").unwrap_or(defaults.base_url),
            api_key: env_string("POSTY5_API_KEY"),
            debug: env_string("POSTY5_DEBUG")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        }
    }
}

/// Knobs that are fixed defaults for most callers.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Default timeout applied to every call without a per-call override.
    pub timeout: Duration,
    /// Default retry policy applied to every call without a per-call override.
    pub retry: RetryPolicy,
    /// Extra headers sent with every metadata call.
    pub headers: Vec<(String, String)>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
            headers: Vec::new(),
        }
    }
}

impl ClientOptions {
    /// Reads `POSTY5_TIMEOUT_SECS`, `POSTY5_MAX_RETRIES` and `POSTY5_RETRY_DELAY_MS`.
    pub fn from_env() -> Self {
        Self {
            timeout: Duration::from_secs(env_u64("POSTY5_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())),
            retry: RetryPolicy::new(
                env_u64("POSTY5_MAX_RETRIES", DEFAULT_MAX_RETRIES as u64) as u32,
                Duration::from_millis(env_u64(
                    "POSTY5_RETRY_DELAY_MS",
                    DEFAULT_RETRY_DELAY.as_millis() as u64,
                )),
            ),
            headers: Vec::new(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}
