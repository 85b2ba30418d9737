//! Typed GitHub Discussions operations over a `QueryExecutor`.
//!
//! Each operation is one query or mutation scoped to the configured
//! repository. Mutations refuse to run without a token before anything
//! reaches the executor.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::OnceCell;

use super::queries;
use super::QueryExecutor;
use crate::errors::ForumError;
use crate::models::{
    AppliedLabels, Category, CommentRef, Connection, CreatedDiscussion, Discussion,
    DiscussionPage, Label, NewDiscussion, PinState, Reaction, ReactionContent, SearchResults,
    Viewer,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    has_next_page: bool,
    #[serde(default)]
    end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscussionConnection {
    page_info: PageInfo,
    #[serde(default)]
    nodes: Vec<Discussion>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchConnection {
    discussion_count: i64,
    #[serde(default)]
    nodes: Vec<Discussion>,
}

/// GitHub Discussions API for one repository.
pub struct GithubApi {
    executor: Arc<dyn QueryExecutor>,
    owner: String,
    repo: String,
    repository_id: OnceCell<String>,
}

impl GithubApi {
    pub fn new(
        executor: Arc<dyn QueryExecutor>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            owner: owner.into(),
            repo: repo.into(),
            repository_id: OnceCell::new(),
        }
    }

    fn repo_vars(&self) -> Value {
        json!({ "owner": self.owner, "repo": self.repo })
    }

    /// List discussions, most recently updated first.
    pub async fn list_discussions(
        &self,
        first: u32,
        after: Option<&str>,
        token: Option<&str>,
    ) -> Result<DiscussionPage, ForumError> {
        let variables = json!({
            "owner": self.owner,
            "repo": self.repo,
            "first": first,
            "after": after,
        });
        let data = self
            .executor
            .execute(queries::LIST_DISCUSSIONS, variables, token)
            .await?;
        let connection: DiscussionConnection = extract(data, "/repository/discussions")?;

        Ok(DiscussionPage {
            items: connection.nodes,
            has_next_page: connection.page_info.has_next_page,
            next_cursor: connection.page_info.end_cursor,
        })
    }

    /// Fetch one discussion with its comments and replies.
    pub async fn get_discussion(
        &self,
        number: i64,
        token: Option<&str>,
    ) -> Result<Discussion, ForumError> {
        let variables = json!({ "owner": self.owner, "repo": self.repo, "number": number });
        let data = self
            .executor
            .execute(queries::GET_DISCUSSION, variables, token)
            .await?;
        let discussion: Option<Discussion> = extract(data, "/repository/discussion")?;

        discussion.ok_or(ForumError::NotFound(number))
    }

    /// List discussion categories. Also remembers the repository node id.
    pub async fn list_categories(&self, token: Option<&str>) -> Result<Vec<Category>, ForumError> {
        let mut data = self
            .executor
            .execute(queries::LIST_CATEGORIES, self.repo_vars(), token)
            .await?;

        if let Some(Value::String(id)) = data.pointer_mut("/repository/id").map(Value::take) {
            // Already set is fine: the id never changes
            let _ = self.repository_id.set(id);
        }

        let categories: Connection<Category> =
            extract(data, "/repository/discussionCategories")?;
        Ok(categories.nodes)
    }

    pub async fn list_labels(&self, token: Option<&str>) -> Result<Vec<Label>, ForumError> {
        let data = self
            .executor
            .execute(queries::LIST_LABELS, self.repo_vars(), token)
            .await?;
        let labels: Connection<Label> = extract(data, "/repository/labels")?;
        Ok(labels.nodes)
    }

    /// Full-text search over title and body, scoped to this repository.
    pub async fn search(
        &self,
        text: &str,
        first: u32,
        token: Option<&str>,
    ) -> Result<SearchResults, ForumError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ForumError::EmptyQuery);
        }

        let variables = json!({
            "query": format!("repo:{}/{} {} in:title,body", self.owner, self.repo, text),
            "first": first,
        });
        let data = self
            .executor
            .execute(queries::SEARCH_DISCUSSIONS, variables, token)
            .await?;
        let connection: SearchConnection = extract(data, "/search")?;

        Ok(SearchResults {
            total_count: connection.discussion_count,
            items: connection.nodes,
        })
    }

    /// Repository node id, looked up once per process.
    async fn repository_id(&self, token: &str) -> Result<&str, ForumError> {
        let id = self
            .repository_id
            .get_or_try_init(|| async {
                let data = self
                    .executor
                    .execute(queries::REPOSITORY_ID, self.repo_vars(), Some(token))
                    .await?;
                extract::<String>(data, "/repository/id")
            })
            .await?;
        Ok(id.as_str())
    }

    pub async fn create_discussion(
        &self,
        input: &NewDiscussion,
        token: Option<&str>,
    ) -> Result<CreatedDiscussion, ForumError> {
        let token = require_token(token, "createDiscussion")?;
        let repository_id = self.repository_id(token).await?;

        let variables = json!({
            "repositoryId": repository_id,
            "categoryId": input.category_id,
            "title": input.title,
            "body": input.body,
        });
        let data = self
            .executor
            .execute(queries::CREATE_DISCUSSION, variables, Some(token))
            .await?;
        extract(data, "/createDiscussion/discussion")
    }

    pub async fn add_comment(
        &self,
        discussion_id: &str,
        body: &str,
        token: Option<&str>,
    ) -> Result<CommentRef, ForumError> {
        let token = require_token(token, "addComment")?;
        let variables = json!({ "discussionId": discussion_id, "body": body });
        let data = self
            .executor
            .execute(queries::ADD_COMMENT, variables, Some(token))
            .await?;
        extract(data, "/addDiscussionComment/comment")
    }

    /// React to a discussion or a comment; both are reaction subjects.
    pub async fn add_reaction(
        &self,
        subject_id: &str,
        content: ReactionContent,
        token: Option<&str>,
    ) -> Result<Reaction, ForumError> {
        let token = require_token(token, "react")?;
        let variables = json!({ "subjectId": subject_id, "content": content });
        let data = self
            .executor
            .execute(queries::ADD_REACTION, variables, Some(token))
            .await?;
        extract(data, "/addReaction/reaction")
    }

    pub async fn remove_reaction(
        &self,
        subject_id: &str,
        content: ReactionContent,
        token: Option<&str>,
    ) -> Result<Reaction, ForumError> {
        let token = require_token(token, "unreact")?;
        let variables = json!({ "subjectId": subject_id, "content": content });
        let data = self
            .executor
            .execute(queries::REMOVE_REACTION, variables, Some(token))
            .await?;
        extract(data, "/removeReaction/reaction")
    }

    pub async fn pin(&self, discussion_id: &str, token: Option<&str>) -> Result<PinState, ForumError> {
        let token = require_token(token, "pin")?;
        let data = self
            .executor
            .execute(
                queries::PIN_DISCUSSION,
                json!({ "discussionId": discussion_id }),
                Some(token),
            )
            .await?;
        extract(data, "/pinDiscussion/discussion")
    }

    pub async fn unpin(
        &self,
        discussion_id: &str,
        token: Option<&str>,
    ) -> Result<PinState, ForumError> {
        let token = require_token(token, "unpin")?;
        let data = self
            .executor
            .execute(
                queries::UNPIN_DISCUSSION,
                json!({ "discussionId": discussion_id }),
                Some(token),
            )
            .await?;
        extract(data, "/unpinDiscussion/discussion")
    }

    pub async fn add_labels(
        &self,
        discussion_id: &str,
        label_ids: &[String],
        token: Option<&str>,
    ) -> Result<AppliedLabels, ForumError> {
        let token = require_token(token, "addLabels")?;
        let variables = json!({ "labelableId": discussion_id, "labelIds": label_ids });
        let data = self
            .executor
            .execute(queries::ADD_LABELS, variables, Some(token))
            .await?;
        let labels: Connection<Label> = extract(data, "/addLabelsToLabelable/labelable/labels")?;
        Ok(labels.nodes)
    }

    /// The identity behind `token`.
    pub async fn viewer(&self, token: &str) -> Result<Viewer, ForumError> {
        let data = self
            .executor
            .execute(queries::VIEWER, json!({}), Some(token))
            .await?;
        extract(data, "/viewer")
    }
}

fn require_token<'a>(token: Option<&'a str>, operation: &str) -> Result<&'a str, ForumError> {
    match token {
        Some(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ForumError::auth_required(operation)),
    }
}

/// Pull the value at `pointer` out of a `data` payload and decode it.
fn extract<T: DeserializeOwned>(mut data: Value, pointer: &str) -> Result<T, ForumError> {
    let value = data
        .pointer_mut(pointer)
        .map(Value::take)
        .ok_or_else(|| ForumError::Decode(format!("Response is missing {}", pointer)))?;
    Ok(serde_json::from_value(value)?)
}
