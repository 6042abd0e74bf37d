//! Jira models for issues, search results and transitions.
//!
//! Issue and transition field sets depend on the query and on the server's
//! configuration, so they are kept as open JSON maps rather than fixed
//! structs.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Comment text attached to every transition request.
pub const TRANSITION_COMMENT: &str = "releasebot transition";

/// Jira sends `null` for unset values; treat it like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A single Jira issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Issue {
    /// Numeric issue id (as a string).
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub id: String,
    /// Issue key (e.g. `ABC-123`).
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub key: String,
    /// REST link to the issue.
    #[serde(
        rename = "self",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub self_link: String,
    /// Expansions available for the issue.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub expand: String,
    /// Requested fields keyed by field name.
    #[serde(
        skip_serializing_if = "Map::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub fields: Map<String, Value>,
}

impl Issue {
    /// Returns the value of a field, if the server sent it.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Returns the `summary` field when it is a string.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.field("summary").and_then(Value::as_str)
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id: {} Key: {} self: {}", self.id, self.key, self.self_link)
    }
}

const fn is_zero(value: &i64) -> bool {
    *value == 0
}

/// One page of search results.
///
/// `issues.len() <= max_results` is whatever the server sends; it is not
/// checked. A body carrying both spellings of a paging key (`startAt` and
/// `starts_at`) is rejected as a duplicate field.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IssueList {
    /// Expansions applied to the result.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub expand: String,
    /// Offset of the first issue in the page.
    #[serde(
        rename = "starts_at",
        alias = "startAt",
        skip_serializing_if = "is_zero",
        deserialize_with = "null_as_default"
    )]
    pub start_at: i64,
    /// Page size the server applied.
    #[serde(
        rename = "max_results",
        alias = "maxResults",
        skip_serializing_if = "is_zero",
        deserialize_with = "null_as_default"
    )]
    pub max_results: i64,
    /// Total number of matching issues.
    #[serde(
        skip_serializing_if = "is_zero",
        deserialize_with = "null_as_default"
    )]
    pub total: i64,
    /// Issues in server order.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub issues: Vec<Issue>,
}

/// A transition available for an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Transition {
    /// Transition id.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub id: String,
    /// Display name (e.g. "Done").
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub name: String,
    /// Destination status descriptor.
    #[serde(
        skip_serializing_if = "Map::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub to: Map<String, Value>,
    /// Fields shown on the transition screen.
    #[serde(
        skip_serializing_if = "Map::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub fields: Map<String, Value>,
}

/// Transitions available for an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionList {
    /// Expansions applied to the result.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub expand: String,
    /// Transitions in server order.
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_default"
    )]
    pub transitions: Vec<Transition>,
}

impl TransitionList {
    /// Find a transition by its display name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.name == name)
    }
}

/// Represents a transition request payload
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransitionRequest {
    /// Transition to execute.
    pub transition: TransitionId,
    /// Updates applied while transitioning.
    pub update: TransitionUpdate,
}

impl TransitionRequest {
    /// Build the payload for the given transition id, with the fixed comment.
    #[must_use]
    pub fn new(transition_id: impl Into<String>) -> Self {
        Self {
            transition: TransitionId {
                id: transition_id.into(),
            },
            update: TransitionUpdate {
                comment: vec![CommentOperation {
                    add: CommentBody {
                        body: TRANSITION_COMMENT.to_string(),
                    },
                }],
            },
        }
    }
}

/// Represents a transition ID for the request
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransitionId {
    /// Transition id.
    pub id: String,
}

/// Field updates applied alongside a transition.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TransitionUpdate {
    /// Comment operations.
    pub comment: Vec<CommentOperation>,
}

/// A single comment operation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentOperation {
    /// Comment to add.
    pub add: CommentBody,
}

/// Comment text.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentBody {
    /// Comment text.
    pub body: String,
}
