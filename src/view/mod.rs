//! Display structures built from repository output.
//!
//! No markup is produced here; the frontend turns these into HTML.

mod format;
mod labels;

pub use format::*;
pub use labels::*;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{Author, Comment, Discussion, DiscussionPage, Label, Reply, SearchResults};

/// Maximum characters of body text shown on a card.
pub const EXCERPT_CHARS: usize = 160;

const GHOST_LOGIN: &str = "ghost";
const GHOST_AVATAR: &str = "https://avatars.githubusercontent.com/u/10137?v=4";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub login: String,
    pub avatar_url: String,
}

impl AuthorView {
    fn from_author(author: Option<&Author>) -> Self {
        match author {
            Some(author) => Self {
                login: author.login.clone(),
                avatar_url: author.avatar_url.clone(),
            },
            None => Self {
                login: GHOST_LOGIN.to_string(),
                avatar_url: GHOST_AVATAR.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LabelBadge {
    pub name: String,
    pub color: String,
}

impl LabelBadge {
    fn from_label(label: &Label) -> Self {
        Self {
            name: translate_label(&label.name),
            color: label_color(&label.color),
        }
    }
}

/// Summary entry in a list or search result.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionCard {
    pub id: String,
    pub number: i64,
    pub title: String,
    pub excerpt: String,
    pub author: AuthorView,
    pub category: String,
    pub labels: Vec<LabelBadge>,
    pub comments: String,
    pub reactions: String,
    pub created: String,
    pub updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReplyView {
    pub id: String,
    pub author: AuthorView,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    pub created: String,
    pub reactions: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub author: AuthorView,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    pub created: String,
    pub reactions: String,
    pub replies: Vec<ReplyView>,
}

/// Full discussion page.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionView {
    #[serde(flatten)]
    pub card: DiscussionCard,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_html: Option<String>,
    pub comment_count: i64,
    pub comment_list: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub items: Vec<DiscussionCard>,
    pub has_next_page: bool,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub total_count: i64,
    pub items: Vec<DiscussionCard>,
}

/// Builds display structures relative to a fixed "now".
pub struct Renderer {
    now: DateTime<Utc>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    fn age(&self, at: DateTime<Utc>) -> String {
        relative_time(at, self.now)
    }

    pub fn card(&self, discussion: &Discussion) -> DiscussionCard {
        DiscussionCard {
            id: discussion.id.clone(),
            number: discussion.number,
            title: discussion.title.clone(),
            excerpt: truncate(discussion.body.trim(), EXCERPT_CHARS),
            author: AuthorView::from_author(discussion.author.as_ref()),
            category: format!("{} {}", discussion.category.emoji, discussion.category.name)
                .trim()
                .to_string(),
            labels: discussion
                .labels
                .nodes
                .iter()
                .map(LabelBadge::from_label)
                .collect(),
            comments: format_number(discussion.comments.total_count),
            reactions: format_number(discussion.reactions.total_count),
            created: self.age(discussion.created_at),
            updated: self.age(discussion.updated_at),
            url: discussion.url.clone(),
        }
    }

    pub fn page(&self, page: &DiscussionPage) -> PageView {
        PageView {
            items: page.items.iter().map(|d| self.card(d)).collect(),
            has_next_page: page.has_next_page,
            next_cursor: page.next_cursor.clone(),
        }
    }

    pub fn search(&self, results: &SearchResults) -> SearchView {
        SearchView {
            total_count: results.total_count,
            items: results.items.iter().map(|d| self.card(d)).collect(),
        }
    }

    pub fn detail(&self, discussion: &Discussion) -> DiscussionView {
        DiscussionView {
            card: self.card(discussion),
            body: discussion.body.clone(),
            body_html: discussion.body_html.clone(),
            comment_count: discussion.comments.total_count,
            comment_list: discussion
                .comments
                .nodes
                .iter()
                .map(|c| self.comment(c))
                .collect(),
        }
    }

    fn comment(&self, comment: &Comment) -> CommentView {
        CommentView {
            id: comment.id.clone(),
            author: AuthorView::from_author(comment.author.as_ref()),
            body: comment.body.clone(),
            body_html: comment.body_html.clone(),
            created: self.age(comment.created_at),
            reactions: format_number(comment.reactions.total_count),
            replies: comment.replies.nodes.iter().map(|r| self.reply(r)).collect(),
        }
    }

    fn reply(&self, reply: &Reply) -> ReplyView {
        ReplyView {
            id: reply.id.clone(),
            author: AuthorView::from_author(reply.author.as_ref()),
            body: reply.body.clone(),
            body_html: reply.body_html.clone(),
            created: self.age(reply.created_at),
            reactions: format_number(reply.reactions.total_count),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
