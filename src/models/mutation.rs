//! Inputs and results of write operations.

use serde::{Deserialize, Serialize};

use super::Label;

/// Reaction kinds accepted by GitHub.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionContent {
    #[default]
    ThumbsUp,
    ThumbsDown,
    Laugh,
    Hooray,
    Confused,
    Heart,
    Rocket,
    Eyes,
}

impl ReactionContent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionContent::ThumbsUp => "THUMBS_UP",
            ReactionContent::ThumbsDown => "THUMBS_DOWN",
            ReactionContent::Laugh => "LAUGH",
            ReactionContent::Hooray => "HOORAY",
            ReactionContent::Confused => "CONFUSED",
            ReactionContent::Heart => "HEART",
            ReactionContent::Rocket => "ROCKET",
            ReactionContent::Eyes => "EYES",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "THUMBS_UP" => Some(ReactionContent::ThumbsUp),
            "THUMBS_DOWN" => Some(ReactionContent::ThumbsDown),
            "LAUGH" => Some(ReactionContent::Laugh),
            "HOORAY" => Some(ReactionContent::Hooray),
            "CONFUSED" => Some(ReactionContent::Confused),
            "HEART" => Some(ReactionContent::Heart),
            "ROCKET" => Some(ReactionContent::Rocket),
            "EYES" => Some(ReactionContent::Eyes),
            _ => None,
        }
    }
}

/// Request body for creating a new discussion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscussion {
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Identity of a freshly created discussion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedDiscussion {
    pub id: String,
    pub number: i64,
}

/// Identity of a freshly created comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentRef {
    pub id: String,
}

/// A reaction as echoed back by add/remove.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reaction {
    pub id: String,
    #[serde(default)]
    pub content: Option<ReactionContent>,
}

/// Pin state after pin/unpin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PinState {
    pub id: String,
    pub is_pinned: bool,
}

/// Labels now attached to a discussion after `addLabels`.
pub type AppliedLabels = Vec<Label>;
