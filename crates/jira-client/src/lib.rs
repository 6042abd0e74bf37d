//! Blocking Jira REST API client.
//!
//! Search, fetch and transition issues over the `/rest/api/2/` API with HTTP
//! Basic authentication.
//!
//! ```no_run
//! use jira_client::JiraClient;
//!
//! let client = JiraClient::new("https://example.atlassian.net", "user", "token", 100)?;
//! for issue in client.search("status=reviewed")? {
//!     println!("Issue: {issue}");
//! }
//! # Ok::<(), jira_client::Error>(())
//! ```

#![cfg_attr(not(test), deny(missing_docs))]

pub mod client;
pub mod jql;
pub mod models;

pub use client::{JiraClient, JiraClientBuilder};
pub use jira_core::{
    Error, HttpConfig, JiraConfig, Method, DEFAULT_MAX_RESULTS, USE_DEFAULT_MAX_RESULTS,
};
pub use models::{
    CommentBody, CommentOperation, Issue, IssueList, Transition, TransitionId, TransitionList,
    TransitionRequest, TransitionUpdate, TRANSITION_COMMENT,
};

/// Convenient result alias that reuses the shared Jira error type.
pub type Result<T> = jira_core::Result<T>;
