//! Static snapshot document model.
//!
//! The snapshot is produced out-of-band by a batch job and mirrors a bounded
//! subset of the live data. Its discussion records carry only comment counts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Author, Category, CategoryRef, CommentThread, Connection, Discussion, Label, TotalCount};

/// Header describing when the snapshot was generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub last_updated: DateTime<Utc>,
    #[serde(default)]
    pub total_discussions: i64,
}

/// Discussion as captured in the snapshot: comments are a bare count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDiscussion {
    pub id: String,
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub body: String,
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
    pub comments: TotalCount,
    #[serde(default)]
    pub reactions: TotalCount,
}

impl SnapshotDiscussion {
    /// Reshape into the live discussion shape with an empty comment list.
    pub fn to_discussion(&self) -> Discussion {
        Discussion {
            id: self.id.clone(),
            number: self.number,
            title: self.title.clone(),
            body: self.body.clone(),
            body_html: None,
            url: self.url.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            author: self.author.clone(),
            category: self.category.clone(),
            labels: self.labels.clone(),
            comments: CommentThread::count_only(self.comments.total_count),
            reactions: self.reactions,
        }
    }
}

/// The whole snapshot document. Every collection defaults to empty so a
/// partial document still decodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub metadata: Option<SnapshotMetadata>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub discussions: Vec<SnapshotDiscussion>,
}

impl Snapshot {
    /// The structurally valid stand-in used when the document cannot be loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn find(&self, number: i64) -> Option<&SnapshotDiscussion> {
        self.discussions.iter().find(|d| d.number == number)
    }
}
