//! HTTP transport seam and the reqwest-backed implementation.
//!
//! The [`Transport`] trait is the only place network IO happens. The
//! production implementation wraps a blocking `reqwest` client whose
//! connection pool is internally synchronized, so one transport can serve
//! concurrent calls from many threads.

use crate::config::HttpConfig;
use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jira-core/", env!("CARGO_PKG_VERSION"));

/// HTTP methods used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

impl Method {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
        }
    }
}

/// A fully prepared request handed to a [`Transport`].
#[derive(Debug)]
pub struct HttpRequest {
    /// Request method
    pub method: Method,
    /// Absolute request URL
    pub url: String,
    /// Extra headers
    pub headers: Vec<(&'static str, String)>,
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password
    pub password: SecretString,
    /// Encoded request body, if any
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Returns the value of the first header with the given name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A response whose body has already been read in full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Complete response body
    pub body: Vec<u8>,
}

/// Blocking HTTP transport.
///
/// Implementations must read the whole response body before returning and
/// must not keep per-call state between invocations.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    /// Dispatch the request and wait for the complete response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TransportError`] when no response could be obtained.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// [`Transport`] backed by `reqwest::blocking::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Build a transport from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the underlying client cannot be built.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .gzip(config.enable_compression)
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .http
            .request(request.method.into(), request.url.as_str())
            .basic_auth(&request.username, Some(request.password.expose_secret()));

        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        // `bytes` consumes the response, so the connection goes back to the
        // pool whether or not reading succeeds.
        let body = response.bytes()?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
