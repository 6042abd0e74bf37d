//! Blocking Jira client implementation.
//!
//! Each operation runs the same fixed sequence: build the field selector,
//! build the URL, execute the authenticated request, decode the body.

use crate::jql::issue_id_query;
use crate::models::{Issue, IssueList, TransitionList, TransitionRequest};
use crate::Result;
use jira_core::config::{parse_base_url, resolve_max_results};
use jira_core::{
    build_url, decode, field_selector, Credentials, HttpConfig, JiraConfig, Method, QueryParams,
    RequestExecutor, ReqwestTransport, Transport, USE_DEFAULT_MAX_RESULTS,
};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

const TRANSITION_EXPAND: &str = "transitions.fields";

/// Builder for [`JiraClient`].
pub struct JiraClientBuilder {
    base_url: String,
    credentials: Credentials,
    max_results: i32,
    http_config: HttpConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl JiraClientBuilder {
    /// Create a builder for the given site and basic-auth credentials.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: Credentials::new(username, SecretString::from(password.into())),
            max_results: USE_DEFAULT_MAX_RESULTS,
            http_config: HttpConfig::new(),
            transport: None,
        }
    }

    /// Create a builder from a [`JiraConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`jira_core::Error::ConfigError`] if the configuration is invalid.
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        config.ensure_valid()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            credentials: Credentials::new(
                config.username.clone(),
                SecretString::from(config.password.expose_secret().to_owned()),
            ),
            max_results: config.max_results,
            http_config: config.http_config(),
            transport: None,
        })
    }

    /// Set the search page size; `-1` selects the default of 200.
    #[must_use]
    pub const fn with_max_results(mut self, max_results: i32) -> Self {
        self.max_results = max_results;
        self
    }

    /// Override the HTTP transport configuration.
    #[must_use]
    pub const fn with_http_config(mut self, config: HttpConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Use a custom transport instead of the reqwest-backed default.
    ///
    /// The HTTP configuration is ignored when a transport is supplied.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`jira_core::Error::ConfigError`] if the base URL is invalid or
    /// the HTTP client cannot be built.
    pub fn build(self) -> Result<JiraClient> {
        parse_base_url(&self.base_url)?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.http_config)?),
        };

        Ok(JiraClient {
            base_url: self.base_url,
            max_results: resolve_max_results(self.max_results),
            executor: RequestExecutor::new(transport, self.credentials),
        })
    }
}

/// Blocking Jira REST client.
///
/// Cloning is cheap and clones share the connection pool, so one client can
/// serve concurrent calls from many threads.
#[derive(Clone)]
pub struct JiraClient {
    base_url: String,
    max_results: i32,
    executor: RequestExecutor,
}

impl JiraClient {
    /// Construct a client with default transport settings.
    ///
    /// Pass [`USE_DEFAULT_MAX_RESULTS`] (`-1`) to use the default page size.
    ///
    /// # Errors
    ///
    /// Returns [`jira_core::Error::ConfigError`] if the base URL is invalid.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        max_results: i32,
    ) -> Result<Self> {
        JiraClientBuilder::new(base_url, username, password)
            .with_max_results(max_results)
            .build()
    }

    /// Start a builder for the given site and credentials.
    #[must_use]
    pub fn builder(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> JiraClientBuilder {
        JiraClientBuilder::new(base_url, username, password)
    }

    /// Construct a client directly from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`jira_core::Error::ConfigError`] if the configuration is invalid.
    pub fn from_config(config: &JiraConfig) -> Result<Self> {
        JiraClientBuilder::from_config(config)?.build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Return the page size sent with searches.
    #[must_use]
    pub const fn max_results(&self) -> i32 {
        self.max_results
    }

    /// Search issues with the default field selector.
    ///
    /// # Errors
    ///
    /// Returns any error from the request pipeline.
    pub fn search(&self, query: &str) -> Result<Vec<Issue>> {
        self.search_with_fields(query, &[])
    }

    /// Search issues, requesting the given fields.
    ///
    /// Issues come back in server order. The query is not validated locally.
    ///
    /// # Errors
    ///
    /// Returns any error from the request pipeline.
    pub fn search_with_fields(&self, query: &str, fields: &[&str]) -> Result<Vec<Issue>> {
        Ok(self.search_list_with_fields(query, fields)?.issues)
    }

    /// Search issues and return the whole page, including pagination metadata.
    ///
    /// # Errors
    ///
    /// Returns any error from the request pipeline.
    pub fn search_list_with_fields(&self, query: &str, fields: &[&str]) -> Result<IssueList> {
        let params = QueryParams::new()
            .with("jql", query)
            .with("validateQuery", "true")
            .with("fields", field_selector(fields))
            .with("maxResults", self.max_results);

        let list: IssueList = self.get_json("search", &params)?;
        debug!(
            total = list.total,
            returned = list.issues.len(),
            "Jira search complete"
        );
        Ok(list)
    }

    /// Fetch a single issue by key.
    ///
    /// # Errors
    ///
    /// Returns any error from the request pipeline.
    pub fn issue(&self, key: &str, fields: &[&str]) -> Result<Issue> {
        let params = QueryParams::new().with("fields", field_selector(fields));
        self.get_json(&format!("issue/{key}"), &params)
    }

    /// Fetch several issues by key with a single search.
    ///
    /// An empty `keys` slice produces an empty query which is still sent.
    ///
    /// # Errors
    ///
    /// Returns any error from the request pipeline.
    pub fn issues(&self, keys: &[&str], fields: &[&str]) -> Result<Vec<Issue>> {
        let query = issue_id_query(keys);
        debug!(keys = keys.len(), "Fetching Jira issues by key");
        self.search_with_fields(&query, fields)
    }

    /// List the transitions available for an issue, including their fields.
    ///
    /// # Errors
    ///
    /// Returns any error from the request pipeline.
    pub fn get_transitions(&self, key: &str) -> Result<TransitionList> {
        let params = QueryParams::new().with("expand", TRANSITION_EXPAND);
        self.get_json(&format!("issue/{key}/transitions"), &params)
    }

    /// Execute a transition on an issue.
    ///
    /// Returns the raw response body, which is empty on the usual `204`.
    ///
    /// # Errors
    ///
    /// Returns any error from the request pipeline.
    pub fn transition(&self, key: &str, transition_id: &str) -> Result<Vec<u8>> {
        let payload = TransitionRequest::new(transition_id);
        self.api_request(
            Method::Post,
            &format!("issue/{key}/transitions"),
            Some(&payload),
        )
    }

    /// Issue an arbitrary request against `REST_PATH + path`.
    ///
    /// For `POST`, `params` is sent as the JSON body; for `GET` it is ignored.
    ///
    /// # Errors
    ///
    /// Returns any error from the request pipeline.
    pub fn api_request<B>(&self, method: Method, path: &str, params: Option<&B>) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let url = build_url(&self.base_url, path, &QueryParams::new())?;
        self.executor.execute(method, &url, params)
    }

    fn get_json<T>(&self, path: &str, params: &QueryParams) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = build_url(&self.base_url, path, params)?;
        let body = self.executor.execute::<()>(Method::Get, &url, None)?;
        decode(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jira_core::{Error, HttpRequest, HttpResponse};
    use mockall::mock;
    use serde_json::json;

    mock! {
        pub Transport {}

        impl Transport for Transport {
            fn send(&self, request: HttpRequest) -> jira_core::Result<HttpResponse>;
        }
    }

    const BASE: &str = "http://test.example.com";

    fn client_with(mock: MockTransport) -> JiraClient {
        JiraClient::builder(BASE, "foo", "bar")
            .with_transport(Arc::new(mock))
            .build()
            .unwrap()
    }

    fn respond(status: u16, body: &serde_json::Value) -> jira_core::Result<HttpResponse> {
        Ok(HttpResponse {
            status,
            body: serde_json::to_vec(body).unwrap(),
        })
    }

    #[test]
    fn defaults_max_results() {
        let client = client_with(MockTransport::new());
        assert_eq!(client.max_results(), 200);
        assert_eq!(client.base_url(), BASE);

        let client = JiraClient::builder(BASE, "foo", "bar")
            .with_max_results(100)
            .with_transport(Arc::new(MockTransport::new()))
            .build()
            .unwrap();
        assert_eq!(client.max_results(), 100);
    }

    #[test]
    fn rejects_invalid_base_url() {
        let result = JiraClient::new("not a url", "foo", "bar", -1);
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }

    #[test]
    fn from_config_uses_configured_values() {
        let config = JiraConfig::new(BASE, "foo", "bar")
            .unwrap()
            .with_max_results(50);
        let client = JiraClient::from_config(&config).unwrap();
        assert_eq!(client.max_results(), 50);

        let invalid = JiraConfig::new(BASE, "foo", "bar")
            .unwrap()
            .with_max_results(-5);
        assert!(matches!(
            JiraClient::from_config(&invalid),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn search_builds_canonical_url() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.method == Method::Get
                    && req.body.is_none()
                    && req.url
                        == "http://test.example.com/rest/api/2/search?fields=id%2Csummary&jql=status%3Dreviewed&maxResults=200&validateQuery=true"
            })
            .times(1)
            .returning(|_| {
                respond(
                    200,
                    &json!({"total": 1, "issues": [{"id": "1", "key": "ABC-01"}]}),
                )
            });

        let issues = client_with(mock).search("status=reviewed").unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "ABC-01");
    }

    #[test]
    fn search_list_keeps_pagination() {
        let mut mock = MockTransport::new();
        mock.expect_send().times(1).returning(|_| {
            respond(
                200,
                &json!({"expand": "schema,names", "startAt": 0, "maxResults": 100, "total": 250, "issues": []}),
            )
        });

        let list = client_with(mock)
            .search_list_with_fields("project = ABC", &["id"])
            .unwrap();
        assert_eq!(list.total, 250);
        assert_eq!(list.max_results, 100);
        assert!(list.issues.is_empty());
    }

    #[test]
    fn issue_requests_selected_fields() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.url
                    == "http://test.example.com/rest/api/2/issue/ABC-1?fields=id%2Csummary%2Cproject"
            })
            .times(1)
            .returning(|_| {
                respond(
                    200,
                    &json!({"id": "1234", "key": "ABC-1", "fields": {"summary": "s", "project": {"key": "ABC"}}}),
                )
            });

        let issue = client_with(mock)
            .issue("ABC-1", &["id", "summary", "project"])
            .unwrap();
        assert_eq!(issue.id, "1234");
        assert_eq!(issue.field("project").unwrap()["key"], "ABC");
    }

    #[test]
    fn issues_with_no_keys_sends_empty_query() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.url
                    == "http://test.example.com/rest/api/2/search?fields=id%2Csummary&jql=&maxResults=200&validateQuery=true"
            })
            .times(1)
            .returning(|_| respond(200, &json!({})));

        let issues = client_with(mock).issues(&[], &[]).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn get_transitions_expands_fields() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.url
                    == "http://test.example.com/rest/api/2/issue/ABC-1/transitions?expand=transitions.fields"
            })
            .times(1)
            .returning(|_| {
                respond(
                    200,
                    &json!({"transitions": [{"id": "21", "name": "In Progress", "to": {"name": "In Progress"}}]}),
                )
            });

        let list = client_with(mock).get_transitions("ABC-1").unwrap();
        assert_eq!(list.transitions.len(), 1);
        assert_eq!(list.transitions[0].id, "21");
    }

    #[test]
    fn transition_posts_fixed_payload() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                let body: serde_json::Value =
                    serde_json::from_slice(req.body.as_deref().unwrap_or_default()).unwrap_or_default();
                req.method == Method::Post
                    && req.url == "http://test.example.com/rest/api/2/issue/ABC-1/transitions"
                    && body
                        == json!({
                            "transition": {"id": "31"},
                            "update": {"comment": [{"add": {"body": "releasebot transition"}}]}
                        })
            })
            .times(1)
            .returning(|_| {
                Ok(HttpResponse {
                    status: 204,
                    body: Vec::new(),
                })
            });

        let body = client_with(mock).transition("ABC-1", "31").unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn api_request_forwards_post_body() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .withf(|req| {
                req.url == "http://test.example.com/rest/api/2/issue/ABC-1/comment"
                    && req.body.as_deref() == Some(br#"{"body":"hello"}"#.as_slice())
            })
            .times(1)
            .returning(|_| respond(201, &json!({"id": "10000"})));

        let body = client_with(mock)
            .api_request(
                Method::Post,
                "issue/ABC-1/comment",
                Some(&json!({"body": "hello"})),
            )
            .unwrap();
        assert_eq!(body, br#"{"id":"10000"}"#);
    }

    #[test]
    fn status_error_wins_over_valid_body() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| respond(404, &json!({"id": "1", "key": "ABC-01"})));

        let err = client_with(mock).issue("ABC-01", &[]).unwrap_err();
        assert_eq!(err.status_code(), Some(404));
    }

    #[test]
    fn shape_mismatch_is_decoding_error() {
        let mut mock = MockTransport::new();
        mock.expect_send()
            .times(1)
            .returning(|_| respond(200, &json!([{"key": "ABC-01"}])));

        let err = client_with(mock).search("status=reviewed").unwrap_err();
        assert!(matches!(err, Error::DecodingError { .. }));
    }
}
