//! Live backend: every operation goes to the GraphQL API with the stored token.

use async_trait::async_trait;

use super::{Backend, Mode};
use crate::errors::ForumError;
use crate::graphql::GithubApi;
use crate::models::{
    AppliedLabels, Category, CommentRef, CreatedDiscussion, Discussion, DiscussionPage, Label,
    NewDiscussion, PinState, Reaction, ReactionContent, SearchResults, Viewer,
};

pub struct LiveBackend<'a> {
    api: &'a GithubApi,
    token: String,
}

impl<'a> LiveBackend<'a> {
    pub fn new(api: &'a GithubApi, token: String) -> Self {
        Self { api, token }
    }

    fn token(&self) -> Option<&str> {
        Some(self.token.as_str())
    }
}

#[async_trait]
impl Backend for LiveBackend<'_> {
    fn mode(&self) -> Mode {
        Mode::Live
    }

    async fn list_discussions(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> Result<DiscussionPage, ForumError> {
        self.api.list_discussions(first, after, self.token()).await
    }

    async fn get_discussion(&self, number: i64) -> Result<Discussion, ForumError> {
        self.api.get_discussion(number, self.token()).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ForumError> {
        self.api.list_categories(self.token()).await
    }

    async fn list_labels(&self) -> Result<Vec<Label>, ForumError> {
        self.api.list_labels(self.token()).await
    }

    async fn search(&self, text: &str, limit: u32) -> Result<SearchResults, ForumError> {
        self.api.search(text, limit, self.token()).await
    }

    async fn create_discussion(
        &self,
        input: &NewDiscussion,
    ) -> Result<CreatedDiscussion, ForumError> {
        self.api.create_discussion(input, self.token()).await
    }

    async fn add_comment(&self, discussion_id: &str, body: &str) -> Result<CommentRef, ForumError> {
        self.api.add_comment(discussion_id, body, self.token()).await
    }

    async fn react(
        &self,
        subject_id: &str,
        content: ReactionContent,
    ) -> Result<Reaction, ForumError> {
        self.api.add_reaction(subject_id, content, self.token()).await
    }

    async fn unreact(
        &self,
        subject_id: &str,
        content: ReactionContent,
    ) -> Result<Reaction, ForumError> {
        self.api.remove_reaction(subject_id, content, self.token()).await
    }

    async fn pin(&self, discussion_id: &str) -> Result<PinState, ForumError> {
        self.api.pin(discussion_id, self.token()).await
    }

    async fn unpin(&self, discussion_id: &str) -> Result<PinState, ForumError> {
        self.api.unpin(discussion_id, self.token()).await
    }

    async fn add_labels(
        &self,
        discussion_id: &str,
        label_ids: &[String],
    ) -> Result<AppliedLabels, ForumError> {
        self.api
            .add_labels(discussion_id, label_ids, self.token())
            .await
    }

    async fn current_user(&self) -> Result<Option<Viewer>, ForumError> {
        self.api.viewer(&self.token).await.map(Some)
    }
}
