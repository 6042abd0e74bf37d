//! Error types for Jira client operations.
//!
//! Every failure in the request pipeline maps onto one of five variants, one
//! per stage: configuration, body encoding, transport, HTTP status and
//! response decoding.

use thiserror::Error;

/// Main error type for Jira client operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The base URL or client configuration is invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The request body could not be serialized to JSON
    #[error("Failed to encode request body: {0}")]
    EncodingError(String),

    /// The request never produced a response (connect, DNS, timeout, IO)
    #[error("HTTP request failed: {message}")]
    TransportError {
        /// Transport error message
        message: String,
        /// Whether the failure was the request deadline elapsing
        timeout: bool,
    },

    /// The server answered with a status code of 400 or above
    #[error("HTTP status {code}")]
    HttpStatusError {
        /// Status code returned by the server
        code: u16,
        /// Response body, lossily decoded as UTF-8
        body: String,
    },

    /// The response body did not match the expected JSON shape
    #[error("Failed to decode response: {message}")]
    DecodingError {
        /// Raw response bytes as received
        raw: Vec<u8>,
        /// Underlying deserializer message
        message: String,
    },
}

/// Specialized result type for Jira client operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::EncodingError(_) => "ENCODING_ERROR",
            Self::TransportError { .. } => "TRANSPORT_ERROR",
            Self::HttpStatusError { .. } => "HTTP_STATUS_ERROR",
            Self::DecodingError { .. } => "DECODING_ERROR",
        }
    }

    /// Returns the HTTP status code carried by an [`Error::HttpStatusError`].
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatusError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Returns true if the request deadline elapsed before a response arrived.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TransportError { timeout: true, .. })
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::TransportError {
            timeout: err.is_timeout(),
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::ConfigError(format!("Invalid base URL: {err}"))
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(format!("Invalid configuration: {err}"))
    }
}
