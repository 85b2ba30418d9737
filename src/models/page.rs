//! Result shapes returned by listing and search operations.

use serde::{Deserialize, Serialize};

use super::Discussion;

/// One page of discussions.
///
/// Guest mode always answers with the whole snapshot as a single page, so
/// `has_next_page` is `false` and `next_cursor` is `None` there regardless of
/// the requested page size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionPage {
    pub items: Vec<Discussion>,
    pub has_next_page: bool,
    pub next_cursor: Option<String>,
}

impl DiscussionPage {
    pub fn last(items: Vec<Discussion>) -> Self {
        Self {
            items,
            has_next_page: false,
            next_cursor: None,
        }
    }
}

/// Search hits plus the total number of matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub total_count: i64,
    pub items: Vec<Discussion>,
}
