//! Authenticated request execution and status classification.

use crate::transport::{HttpRequest, Method, Transport};
use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

const CONTENT_TYPE_JSON: &str = "application/json";

/// HTTP Basic credentials attached to every request.
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password (or API token).
    #[must_use]
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the password.
    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Executes requests against a [`Transport`] with the client's credentials.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
    credentials: Arc<Credentials>,
}

impl RequestExecutor {
    /// Create an executor over the given transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, credentials: Credentials) -> Self {
        Self {
            transport,
            credentials: Arc::new(credentials),
        }
    }

    /// Returns the credentials attached to every request.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Execute a request and return the raw response body.
    ///
    /// For [`Method::Post`], `params` is encoded as the JSON body. For
    /// [`Method::Get`] no body is sent and `params` is ignored. Statuses below
    /// 400 (including redirects that reach this point) are returned as-is.
    ///
    /// # Errors
    ///
    /// - [`Error::EncodingError`] if `params` cannot be serialized
    /// - [`Error::TransportError`] if no response was received
    /// - [`Error::HttpStatusError`] if the status is 400 or above
    pub fn execute<B>(&self, method: Method, url: &str, params: Option<&B>) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let body = match (method, params) {
            (Method::Post, Some(params)) => Some(
                serde_json::to_vec(params).map_err(|err| Error::EncodingError(err.to_string()))?,
            ),
            _ => None,
        };

        let request = HttpRequest {
            method,
            url: url.to_string(),
            headers: vec![
                ("Content-Type", CONTENT_TYPE_JSON.to_string()),
                ("Accept", CONTENT_TYPE_JSON.to_string()),
            ],
            username: self.credentials.username.clone(),
            password: SecretString::from(self.credentials.password.expose_secret().to_owned()),
            body,
        };

        debug!(%method, url, "Sending Jira request");
        let response = self.transport.send(request)?;
        debug!(%method, url, status = response.status, "Jira response");
        trace!(bytes = response.body.len(), "Jira response body");

        if response.status >= 400 {
            return Err(Error::HttpStatusError {
                code: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(response.body)
    }
}
