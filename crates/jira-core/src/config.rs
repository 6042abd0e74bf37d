//! Configuration structures for Jira clients.
//!
//! This module provides the connection configuration (base URL, credentials,
//! page size) and the HTTP transport tuning shared by every request.

use crate::Error;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Path prefix prepended to every REST request.
pub const REST_PATH: &str = "/rest/api/2/";

/// Page size used for searches when the caller does not pick one.
pub const DEFAULT_MAX_RESULTS: i32 = 200;

/// Sentinel accepted at construction meaning "use [`DEFAULT_MAX_RESULTS`]".
pub const USE_DEFAULT_MAX_RESULTS: i32 = -1;

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Default connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default idle timeout for the connection pool in seconds
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Resolve the page-size sentinel into a concrete limit.
#[must_use]
pub const fn resolve_max_results(max_results: i32) -> i32 {
    if max_results == USE_DEFAULT_MAX_RESULTS {
        DEFAULT_MAX_RESULTS
    } else {
        max_results
    }
}

/// HTTP transport configuration.
///
/// The request timeout doubles as the per-call deadline: a blocking call that
/// exceeds it fails with a timed-out [`Error::TransportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpConfig {
    /// Total request timeout
    pub timeout: Duration,

    /// TCP connect timeout
    pub connect_timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable gzip response decompression
    pub enable_compression: bool,
}

impl HttpConfig {
    /// Create a new transport configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for a Jira client instance.
///
/// Deserializable so callers can load it from their own config files; the
/// library itself never reads files or environment variables.
#[derive(Debug, Deserialize, Validate)]
pub struct JiraConfig {
    /// Jira site base URL (e.g. "https://example.atlassian.net")
    #[validate(url)]
    pub base_url: String,

    /// Basic-auth username
    pub username: String,

    /// Basic-auth password or API token
    #[serde(deserialize_with = "deserialize_secret")]
    pub password: SecretString,

    /// Page size for searches, `-1` selects the default
    #[validate(range(min = -1))]
    #[serde(default = "default_max_results")]
    pub max_results: i32,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connect timeout in seconds
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

const fn default_max_results() -> i32 {
    DEFAULT_MAX_RESULTS
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT
}

const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl JiraConfig {
    /// Create a new client configuration with required parameters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the base URL is invalid.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            max_results: DEFAULT_MAX_RESULTS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT,
        };

        config.validate()?;

        Ok(config)
    }

    /// Set the search page size (`-1` selects the default).
    #[must_use]
    pub const fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set connect timeout in seconds.
    #[must_use]
    pub const fn with_connect_timeout(mut self, seconds: u64) -> Self {
        self.connect_timeout_secs = seconds;
        self
    }

    /// Re-run validation, e.g. after deserializing or using the `with_*` setters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing every failed rule.
    pub fn ensure_valid(&self) -> Result<(), Error> {
        self.validate()?;
        Ok(())
    }

    /// Page size with the `-1` sentinel resolved.
    #[must_use]
    pub const fn resolved_max_results(&self) -> i32 {
        resolve_max_results(self.max_results)
    }

    /// Transport settings derived from the configured timeouts.
    #[must_use]
    pub const fn http_config(&self) -> HttpConfig {
        HttpConfig::new()
            .with_timeout(Duration::from_secs(self.request_timeout_secs))
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }

    /// Parse and validate the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or cannot carry a path.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        parse_base_url(&self.base_url)
    }
}

/// Parse a base URL, rejecting URLs that cannot carry a path (e.g. `mailto:`).
///
/// # Errors
///
/// Returns [`Error::ConfigError`] on any parse failure.
pub fn parse_base_url(base_url: &str) -> Result<Url, Error> {
    let url = Url::parse(base_url)?;
    if url.cannot_be_a_base() {
        return Err(Error::ConfigError(format!(
            "Base URL cannot carry a path: {base_url}"
        )));
    }
    Ok(url)
}
