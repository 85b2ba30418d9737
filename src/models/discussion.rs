//! Discussion model shared by live responses and the guest reshape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Comment, Label};

/// Login name and avatar of whoever wrote a post. GitHub reports deleted
/// accounts as a null author, so holders keep this in an `Option`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub login: String,
    pub avatar_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Category as embedded in a discussion record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRef {
    /// The detail query does not select the id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub emoji: String,
}

/// A `{ totalCount }` selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TotalCount {
    #[serde(default)]
    pub total_count: i64,
}

/// A `{ nodes [...] }` selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

/// Comments of a discussion: the total count plus whatever nodes were fetched.
/// `nodes` is always present; list queries and guest records leave it empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentThread {
    #[serde(default)]
    pub total_count: i64,
    #[serde(default)]
    pub nodes: Vec<Comment>,
}

impl CommentThread {
    /// A thread known only by its count.
    pub fn count_only(total_count: i64) -> Self {
        Self {
            total_count,
            nodes: Vec::new(),
        }
    }
}

/// A discussion thread. `number` is the stable external lookup key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: String,
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub author: Option<Author>,
    pub category: CategoryRef,
    #[serde(default)]
    pub labels: Connection<Label>,
    #[serde(default)]
    pub comments: CommentThread,
    #[serde(default)]
    pub reactions: TotalCount,
}

impl Discussion {
    /// Case-insensitive substring match against title and body.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.body.to_lowercase().contains(needle)
    }
}
