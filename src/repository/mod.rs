//! Dual-mode discussion repository.
//!
//! Callers see one API. On every call the repository checks whether a
//! credential is stored: if so the call goes to the live GraphQL backend,
//! otherwise to the guest backend built on the static snapshot. The choice is
//! never cached, so logging in or out takes effect on the next call.
//!
//! Guest mode is read-only and coarser than live mode:
//! - `list_discussions` returns the whole snapshot as the final page.
//! - `get_discussion` only knows numbers present in the snapshot and returns
//!   comment counts without comment bodies.
//! - `search` accepts blank text and matches everything.
//! - every mutation fails with `AuthRequired`.

mod guest;
mod live;

pub use guest::GuestBackend;
pub use live::LiveBackend;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ForumError;
use crate::graphql::GithubApi;
use crate::models::{
    AppliedLabels, Category, CommentRef, CreatedDiscussion, Discussion, DiscussionPage, Label,
    NewDiscussion, PinState, Reaction, ReactionContent, SearchResults, Viewer,
};
use crate::snapshot::SnapshotLoader;
use crate::store::{Storage, VIEWER_KEY};

/// Which backend served a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Live,
    Guest,
}

/// The operations both backends implement.
#[async_trait]
pub trait Backend: Send + Sync {
    fn mode(&self) -> Mode;

    async fn list_discussions(
        &self,
        first: u32,
        after: Option<&str>,
    ) -> Result<DiscussionPage, ForumError>;
    async fn get_discussion(&self, number: i64) -> Result<Discussion, ForumError>;
    async fn list_categories(&self) -> Result<Vec<Category>, ForumError>;
    async fn list_labels(&self) -> Result<Vec<Label>, ForumError>;
    async fn search(&self, text: &str, limit: u32) -> Result<SearchResults, ForumError>;

    async fn create_discussion(&self, input: &NewDiscussion)
        -> Result<CreatedDiscussion, ForumError>;
    async fn add_comment(&self, discussion_id: &str, body: &str) -> Result<CommentRef, ForumError>;
    async fn react(&self, subject_id: &str, content: ReactionContent)
        -> Result<Reaction, ForumError>;
    async fn unreact(
        &self,
        subject_id: &str,
        content: ReactionContent,
    ) -> Result<Reaction, ForumError>;
    async fn pin(&self, discussion_id: &str) -> Result<PinState, ForumError>;
    async fn unpin(&self, discussion_id: &str) -> Result<PinState, ForumError>;
    async fn add_labels(
        &self,
        discussion_id: &str,
        label_ids: &[String],
    ) -> Result<AppliedLabels, ForumError>;

    async fn current_user(&self) -> Result<Option<Viewer>, ForumError>;
}

/// Source-agnostic entry point for all discussion data.
pub struct DiscussionRepository {
    storage: Storage,
    api: GithubApi,
    loader: SnapshotLoader,
}

impl DiscussionRepository {
    pub fn new(storage: Storage, api: GithubApi, loader: SnapshotLoader) -> Self {
        Self {
            storage,
            api,
            loader,
        }
    }

    /// Mode the next call will run in.
    pub async fn mode(&self) -> Mode {
        self.dispatch().await.mode()
    }

    /// Pick the backend for one request from the stored credential.
    ///
    /// Callers run the operation on the returned backend and report its
    /// `mode()`, so the reported mode is the one that served the call.
    pub async fn dispatch(&self) -> Box<dyn Backend + '_> {
        match self.storage.credential().await {
            Some(token) => {
                tracing::debug!("Dispatching to live backend");
                Box::new(LiveBackend::new(&self.api, token))
            }
            None => {
                tracing::debug!("Dispatching to guest backend");
                Box::new(GuestBackend::new(&self.loader))
            }
        }
    }

    /// The signed-in identity, or `None`.
    ///
    /// A token the API rejects is removed from storage so later calls fall
    /// back to guest mode instead of failing again. Other failures leave the
    /// token alone. A verified profile is remembered under `VIEWER_KEY`.
    pub async fn current_user(&self) -> Option<Viewer> {
        match self.dispatch().await.current_user().await {
            Ok(Some(viewer)) => {
                self.storage.set(VIEWER_KEY, &viewer).await;
                Some(viewer)
            }
            Ok(None) => None,
            Err(e) if e.is_credential_rejection() => {
                tracing::warn!("Stored token rejected, clearing it: {}", e);
                self.storage.clear_credential().await;
                None
            }
            Err(e) => {
                tracing::warn!("Failed to get current user: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Snapshot;
    use crate::store::MemoryStore;
    use crate::testing::{discussion_json, snapshot_json, ScriptedExecutor};
    use serde_json::json;
    use std::sync::Arc;

    struct Harness {
        repo: DiscussionRepository,
        storage: Storage,
        executor: Arc<ScriptedExecutor>,
    }

    fn harness(numbers: &[i64], responses: Vec<Result<serde_json::Value, ForumError>>) -> Harness {
        let storage = Storage::new(Arc::new(MemoryStore::new()), "forum:");
        let executor = Arc::new(ScriptedExecutor::new(responses));
        let api = GithubApi::new(executor.clone(), "octo", "forum");
        let snapshot: Snapshot = serde_json::from_value(snapshot_json(numbers)).unwrap();
        let loader = SnapshotLoader::preloaded(snapshot);

        Harness {
            repo: DiscussionRepository::new(storage.clone(), api, loader),
            storage,
            executor,
        }
    }

    #[tokio::test]
    async fn test_mode_follows_credential_on_every_call() {
        let h = harness(&[1], vec![]);
        assert_eq!(h.repo.mode().await, Mode::Guest);

        h.storage.store_credential("ghp_live").await;
        assert_eq!(h.repo.mode().await, Mode::Live);

        h.storage.clear_credential().await;
        assert_eq!(h.repo.mode().await, Mode::Guest);
    }

    #[tokio::test]
    async fn test_guest_get_discussion_by_number() {
        let h = harness(&[1, 3, 5], vec![]);

        let found = h.repo.dispatch().await.get_discussion(3).await.unwrap();
        assert_eq!(found.number, 3);
        assert!(found.comments.nodes.is_empty());
        assert_eq!(found.comments.total_count, 3);

        let missing = h.repo.dispatch().await.get_discussion(4).await.unwrap_err();
        assert_eq!(missing, ForumError::NotFound(4));
        assert_eq!(h.executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_guest_discussions_always_have_comment_list() {
        let h = harness(&[1, 2, 3], vec![]);

        for number in [1, 2, 3] {
            let discussion = h.repo.dispatch().await.get_discussion(number).await.unwrap();
            assert!(discussion.comments.nodes.is_empty());
        }
        let page = h.repo.dispatch().await.list_discussions(2, None).await.unwrap();
        assert!(page.items.iter().all(|d| d.comments.nodes.is_empty()));
    }

    #[tokio::test]
    async fn test_guest_list_is_single_last_page() {
        let h = harness(&[1, 2, 3, 4], vec![]);

        let guest = h.repo.dispatch().await;
        for page_size in [1, 2, 100] {
            let page = guest
                .list_discussions(page_size, Some("cursor"))
                .await
                .unwrap();
            assert_eq!(page.items.len(), 4);
            assert!(!page.has_next_page);
            assert!(page.next_cursor.is_none());
        }
    }

    #[tokio::test]
    async fn test_guest_search_blank_matches_all() {
        let h = harness(&[1, 2, 3], vec![]);

        let results = h.repo.dispatch().await.search("", 2).await.unwrap();
        assert_eq!(results.total_count, 3);
        assert_eq!(results.items.len(), 2);
    }

    #[tokio::test]
    async fn test_guest_search_is_case_insensitive_on_title_and_body() {
        let h = harness(&[1, 2], vec![]);

        // snapshot_json titles are "Discussion N" and bodies "Body of discussion N"
        let by_title = h.repo.dispatch().await.search("DISCUSSION 2", 10).await.unwrap();
        assert_eq!(by_title.total_count, 1);
        assert_eq!(by_title.items[0].number, 2);

        let by_body = h.repo.dispatch().await.search("body OF", 10).await.unwrap();
        assert_eq!(by_body.total_count, 2);

        // Surrounding whitespace is part of the needle
        let padded = h.repo.dispatch().await.search("discussion 1 ", 10).await.unwrap();
        assert_eq!(padded.total_count, 0);

        let blank = h.repo.dispatch().await.search("   ", 10).await.unwrap();
        assert_eq!(blank.total_count, 2);

        let none = h.repo.dispatch().await.search("kubernetes", 10).await.unwrap();
        assert_eq!(none.total_count, 0);
        assert!(none.items.is_empty());
    }

    #[tokio::test]
    async fn test_guest_taxonomy_comes_from_snapshot() {
        let h = harness(&[1], vec![]);

        let guest = h.repo.dispatch().await;
        assert_eq!(guest.list_categories().await.unwrap()[0].name, "General");
        assert_eq!(guest.list_labels().await.unwrap()[0].name, "question");
    }

    #[tokio::test]
    async fn test_live_search_blank_is_empty_query() {
        let h = harness(&[1], vec![]);
        h.storage.store_credential("ghp_live").await;

        let err = h.repo.dispatch().await.search("", 5).await.unwrap_err();
        assert_eq!(err, ForumError::EmptyQuery);
        assert_eq!(h.executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_live_search_propagates_graph_error() {
        let h = harness(&[1], vec![Err(ForumError::Graph("rate limited".into()))]);
        h.storage.store_credential("ghp_live").await;

        let err = h.repo.dispatch().await.search("tokio", 5).await.unwrap_err();
        assert_eq!(err, ForumError::Graph("rate limited".into()));
    }

    #[tokio::test]
    async fn test_live_list_passes_cursor_and_token() {
        let h = harness(
            &[1],
            vec![Ok(json!({ "repository": { "discussions": {
                "pageInfo": { "hasNextPage": false, "endCursor": null },
                "nodes": [discussion_json(42, "Live one")]
            }}}))],
        );
        h.storage.store_credential("ghp_live").await;

        let page = h.repo.dispatch().await.list_discussions(10, Some("abc")).await.unwrap();

        assert_eq!(page.items[0].number, 42);
        let call = &h.executor.calls()[0];
        assert_eq!(call.variables["after"], "abc");
        assert_eq!(call.token.as_deref(), Some("ghp_live"));
    }

    #[tokio::test]
    async fn test_dispatched_backend_keeps_its_mode() {
        let h = harness(
            &[1],
            vec![Ok(json!({ "repository": { "discussions": {
                "pageInfo": { "hasNextPage": false, "endCursor": null },
                "nodes": [discussion_json(42, "Live one")]
            }}}))],
        );
        h.storage.store_credential("ghp_live").await;

        let backend = h.repo.dispatch().await;
        // Logging out mid-request does not change the backend already chosen
        h.storage.clear_credential().await;

        assert_eq!(backend.mode(), Mode::Live);
        let page = backend.list_discussions(10, None).await.unwrap();
        assert_eq!(page.items[0].number, 42);
        assert_eq!(h.repo.mode().await, Mode::Guest);
    }

    #[tokio::test]
    async fn test_guest_mutations_require_auth_without_network() {
        let h = harness(&[1], vec![]);
        let input = NewDiscussion {
            category_id: "C_1".into(),
            title: "t".into(),
            body: "b".into(),
        };

        let guest = h.repo.dispatch().await;
        assert_eq!(guest.mode(), Mode::Guest);

        let results = vec![
            guest.create_discussion(&input).await.map(|_| ()),
            guest.add_comment("D_1", "hi").await.map(|_| ()),
            guest.react("D_1", ReactionContent::ThumbsUp).await.map(|_| ()),
            guest.unreact("D_1", ReactionContent::ThumbsUp).await.map(|_| ()),
            guest.pin("D_1").await.map(|_| ()),
            guest.unpin("D_1").await.map(|_| ()),
            guest.add_labels("D_1", &["L_1".to_string()]).await.map(|_| ()),
        ];

        for result in results {
            assert_eq!(result.unwrap_err().error_code(), "AUTH_REQUIRED");
        }
        assert_eq!(h.executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_guest_current_user_makes_no_call() {
        let h = harness(&[1], vec![]);
        assert!(h.repo.current_user().await.is_none());
        assert_eq!(h.executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_live_current_user() {
        let h = harness(
            &[1],
            vec![Ok(json!({ "viewer": {
                "login": "octocat", "name": "The Octocat",
                "avatarUrl": "https://a/1.png", "email": null
            }}))],
        );
        h.storage.store_credential("ghp_live").await;

        let viewer = h.repo.current_user().await.unwrap();
        assert_eq!(viewer.login, "octocat");
        assert_eq!(h.storage.credential().await.as_deref(), Some("ghp_live"));

        let remembered: Option<Viewer> = h.storage.get(VIEWER_KEY, None).await;
        assert_eq!(remembered, Some(viewer));
    }

    #[tokio::test]
    async fn test_rejected_token_is_cleared_and_guest_resumes() {
        let h = harness(
            &[1, 3, 5],
            vec![Err(ForumError::transport(Some(401), "Unauthorized"))],
        );
        h.storage.store_credential("ghp_expired").await;

        assert!(h.repo.current_user().await.is_none());
        assert!(h.storage.credential().await.is_none());
        assert_eq!(h.repo.mode().await, Mode::Guest);

        // Behaves exactly like a repository that never had a credential
        let fresh = harness(&[1, 3, 5], vec![]);
        assert_eq!(
            h.repo.dispatch().await.list_discussions(5, None).await.unwrap(),
            fresh.repo.dispatch().await.list_discussions(5, None).await.unwrap()
        );
        assert_eq!(
            h.repo.dispatch().await.search("", 5).await.unwrap(),
            fresh.repo.dispatch().await.search("", 5).await.unwrap()
        );
        assert_eq!(
            h.repo.dispatch().await.get_discussion(4).await.unwrap_err(),
            fresh.repo.dispatch().await.get_discussion(4).await.unwrap_err()
        );
        assert_eq!(
            h.repo.dispatch().await.pin("D_1").await.unwrap_err().error_code(),
            "AUTH_REQUIRED"
        );
        assert_eq!(h.executor.call_count(), 1);
    }

    #[tokio::test]
    async fn test_rate_limited_viewer_keeps_token() {
        let h = harness(
            &[1],
            vec![Err(ForumError::Graph("API rate limit exceeded".into()))],
        );
        h.storage.store_credential("ghp_live").await;

        assert!(h.repo.current_user().await.is_none());
        assert_eq!(h.storage.credential().await.as_deref(), Some("ghp_live"));
        assert_eq!(h.repo.mode().await, Mode::Live);
    }

    #[tokio::test]
    async fn test_bad_credentials_graph_error_clears_token() {
        let h = harness(&[1], vec![Err(ForumError::Graph("Bad credentials".into()))]);
        h.storage.store_credential("ghp_revoked").await;

        assert!(h.repo.current_user().await.is_none());
        assert!(h.storage.credential().await.is_none());
    }

    #[tokio::test]
    async fn test_network_failure_keeps_token() {
        let h = harness(
            &[1],
            vec![Err(ForumError::transport(None, "connection reset"))],
        );
        h.storage.store_credential("ghp_live").await;

        assert!(h.repo.current_user().await.is_none());
        assert_eq!(h.storage.credential().await.as_deref(), Some("ghp_live"));
    }
}
