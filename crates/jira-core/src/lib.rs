//! # jira-core
//!
//! Request plumbing for the Jira REST API client.
//!
//! Every operation runs the same pipeline: build a field selector, build the
//! absolute URL, execute the authenticated request, decode the JSON body.
//!
//! ## Modules
//!
//! - [`error`] - Error taxonomy shared by the whole pipeline
//! - [`config`] - Connection configuration, transport tuning and constants
//! - [`query`] - Query parameters with canonical ordering
//! - [`endpoint`] - Absolute URL construction
//! - [`fields`] - Field selector strings
//! - [`transport`] - HTTP transport seam and blocking reqwest implementation
//! - [`executor`] - Authenticated request execution and status classification
//! - [`decode`] - JSON response decoding

#![cfg_attr(not(test), deny(missing_docs))]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod fields;
pub mod query;
pub mod transport;

// Re-export commonly used types
pub use config::{HttpConfig, JiraConfig, DEFAULT_MAX_RESULTS, REST_PATH, USE_DEFAULT_MAX_RESULTS};
pub use decode::decode;
pub use endpoint::build_url;
pub use error::{Error, Result};
pub use executor::{Credentials, RequestExecutor};
pub use fields::{field_selector, DEFAULT_FIELDS};
pub use query::QueryParams;
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
