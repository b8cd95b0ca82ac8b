//! Client configuration for the HausPet API.
//!
//! Provides a `ClientConfig` used by the CLI (and any other front end) to
//! locate the pets backend and tune the shared transport's retry budget.

use std::time::Duration;

use thiserror::Error;

use crate::util::{has_http_scheme, normalize_text_option};

/// Environment variable consulted by [`ClientConfig::from_env`].
pub const API_URL_ENV: &str = "HAUSPET_API_URL";

/// Production API base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://hauspet-api-production.up.railway.app";

const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_BASE_DELAY_MS: u64 = 300;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("API base URL must not be empty")]
    EmptyBaseUrl,
    #[error("API base URL must include http:// or https://: {0}")]
    InvalidBaseUrl(String),
}

/// Retry budget applied to transient server errors (500, 502, 503, 504).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: Duration::from_millis(DEFAULT_BASE_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    /// Backoff before retrying after the zero-based `attempt` failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Disable retries entirely.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    api_base_url: String,
    pub retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url.into())?,
            retry: RetryPolicy::default(),
        })
    }

    /// Resolve the base URL from `HAUSPET_API_URL`, falling back to the
    /// production default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(None, None)
    }

    /// Pick the base URL by precedence: `explicit`, then `HAUSPET_API_URL`,
    /// then `configured`, then the production default. Blank values are
    /// skipped.
    pub fn resolve(explicit: Option<&str>, configured: Option<&str>) -> Result<Self, ConfigError> {
        Self::resolve_with_env(explicit, std::env::var(API_URL_ENV).ok(), configured)
    }

    fn resolve_with_env(
        explicit: Option<&str>,
        env: Option<String>,
        configured: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let url = normalize_text_option(explicit.map(str::to_string))
            .or_else(|| normalize_text_option(env))
            .or_else(|| normalize_text_option(configured.map(str::to_string)))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self::new(url)
    }

    #[must_use]
    pub const fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Join an endpoint path (starting with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

pub fn normalize_base_url(raw: String) -> Result<String, ConfigError> {
    let url = normalize_text_option(Some(raw)).ok_or(ConfigError::EmptyBaseUrl)?;
    if has_http_scheme(&url) {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(ConfigError::InvalidBaseUrl(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_base_url_rejects_invalid_values() {
        assert_eq!(
            normalize_base_url("  ".to_string()),
            Err(ConfigError::EmptyBaseUrl)
        );
        assert!(matches!(
            normalize_base_url("api.hauspet.net".to_string()),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        let config = ClientConfig::new(" https://api.hauspet.net/ ").unwrap();
        assert_eq!(config.api_base_url(), "https://api.hauspet.net");
        assert_eq!(
            config.endpoint("/api/v1/pets"),
            "https://api.hauspet.net/api/v1/pets"
        );
    }

    #[test]
    fn resolve_prefers_explicit_then_env_then_configured() {
        let env = || Some("https://env.example.com".to_string());

        let config =
            ClientConfig::resolve_with_env(Some("https://flag.example.com/"), env(), None).unwrap();
        assert_eq!(config.api_base_url(), "https://flag.example.com");

        let config =
            ClientConfig::resolve_with_env(Some("  "), env(), Some("https://file.example.com"))
                .unwrap();
        assert_eq!(config.api_base_url(), "https://env.example.com");

        let config =
            ClientConfig::resolve_with_env(None, None, Some("https://file.example.com")).unwrap();
        assert_eq!(config.api_base_url(), "https://file.example.com");

        let config = ClientConfig::resolve_with_env(None, Some(" ".to_string()), None).unwrap();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn resolve_rejects_invalid_configured_url() {
        assert_eq!(
            ClientConfig::resolve_with_env(None, None, Some("api.hauspet.net")),
            Err(ConfigError::InvalidBaseUrl("api.hauspet.net".to_string()))
        );
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn from_env_reads_variable_then_falls_back_to_default() {
        std::env::set_var(API_URL_ENV, "http://localhost:5000/");
        let from_variable = ClientConfig::from_env();
        std::env::remove_var(API_URL_ENV);
        let from_default = ClientConfig::from_env();

        assert_eq!(
            from_variable.unwrap().api_base_url(),
            "http://localhost:5000"
        );
        assert_eq!(from_default.unwrap().api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn retry_delay_doubles_per_attempt() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_millis(300));
        assert_eq!(policy.delay_for(1), Duration::from_millis(600));
        assert_eq!(policy.delay_for(2), Duration::from_millis(1200));
    }
}
