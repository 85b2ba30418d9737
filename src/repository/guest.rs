//! Guest backend: read-only answers computed from the cached snapshot.

use async_trait::async_trait;

use super::{Backend, Mode};
use crate::errors::ForumError;
use crate::models::{
    AppliedLabels, Category, CommentRef, CreatedDiscussion, Discussion, DiscussionPage, Label,
    NewDiscussion, PinState, Reaction, ReactionContent, SearchResults, SnapshotDiscussion, Viewer,
};
use crate::snapshot::SnapshotLoader;

pub struct GuestBackend<'a> {
    loader: &'a SnapshotLoader,
}

impl<'a> GuestBackend<'a> {
    pub fn new(loader: &'a SnapshotLoader) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl Backend for GuestBackend<'_> {
    fn mode(&self) -> Mode {
        Mode::Guest
    }

    /// The whole snapshot as one final page; paging arguments are ignored.
    async fn list_discussions(
        &self,
        _first: u32,
        _after: Option<&str>,
    ) -> Result<DiscussionPage, ForumError> {
        let snapshot = self.loader.load().await;
        let items = snapshot
            .discussions
            .iter()
            .map(SnapshotDiscussion::to_discussion)
            .collect();
        Ok(DiscussionPage::last(items))
    }

    async fn get_discussion(&self, number: i64) -> Result<Discussion, ForumError> {
        let snapshot = self.loader.load().await;
        snapshot
            .find(number)
            .map(SnapshotDiscussion::to_discussion)
            .ok_or(ForumError::NotFound(number))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ForumError> {
        Ok(self.loader.load().await.categories.clone())
    }

    async fn list_labels(&self) -> Result<Vec<Label>, ForumError> {
        Ok(self.loader.load().await.labels.clone())
    }

    /// Case-insensitive substring filter over title and body, using the text
    /// as given. Blank text matches everything. `total_count` counts every
    /// match; `items` holds at most `limit` of them.
    async fn search(&self, text: &str, limit: u32) -> Result<SearchResults, ForumError> {
        let snapshot = self.loader.load().await;
        let blank = text.trim().is_empty();
        let needle = text.to_lowercase();

        let hits: Vec<Discussion> = snapshot
            .discussions
            .iter()
            .map(SnapshotDiscussion::to_discussion)
            .filter(|d| blank || d.matches_lowercase(&needle))
            .collect();

        Ok(SearchResults {
            total_count: hits.len() as i64,
            items: hits.into_iter().take(limit as usize).collect(),
        })
    }

    async fn create_discussion(
        &self,
        _input: &NewDiscussion,
    ) -> Result<CreatedDiscussion, ForumError> {
        Err(ForumError::auth_required("createDiscussion"))
    }

    async fn add_comment(
        &self,
        _discussion_id: &str,
        _body: &str,
    ) -> Result<CommentRef, ForumError> {
        Err(ForumError::auth_required("addComment"))
    }

    async fn react(
        &self,
        _subject_id: &str,
        _content: ReactionContent,
    ) -> Result<Reaction, ForumError> {
        Err(ForumError::auth_required("react"))
    }

    async fn unreact(
        &self,
        _subject_id: &str,
        _content: ReactionContent,
    ) -> Result<Reaction, ForumError> {
        Err(ForumError::auth_required("unreact"))
    }

    async fn pin(&self, _discussion_id: &str) -> Result<PinState, ForumError> {
        Err(ForumError::auth_required("pin"))
    }

    async fn unpin(&self, _discussion_id: &str) -> Result<PinState, ForumError> {
        Err(ForumError::auth_required("unpin"))
    }

    async fn add_labels(
        &self,
        _discussion_id: &str,
        _label_ids: &[String],
    ) -> Result<AppliedLabels, ForumError> {
        Err(ForumError::auth_required("addLabels"))
    }

    async fn current_user(&self) -> Result<Option<Viewer>, ForumError> {
        Ok(None)
    }
}
