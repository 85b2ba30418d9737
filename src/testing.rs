//! Shared test fixtures: a scripted executor, JSON builders and fake
//! upstream servers bound to ephemeral ports.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use reqwest::Url;
use serde_json::{json, Value};

use crate::errors::ForumError;
use crate::graphql::QueryExecutor;

/// Token the fake GitHub accepts.
pub const VALID_TOKEN: &str = "valid-token";

/// One recorded `execute` call.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub query: String,
    pub variables: Value,
    pub token: Option<String>,
}

/// Executor that replays canned results in order and records every call.
pub struct ScriptedExecutor {
    responses: Mutex<VecDeque<Result<Value, ForumError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub fn new(responses: Vec<Result<Value, ForumError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl QueryExecutor for ScriptedExecutor {
    async fn execute(
        &self,
        query: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<Value, ForumError> {
        self.calls.lock().unwrap().push(RecordedCall {
            query: query.to_string(),
            variables,
            token: token.map(str::to_string),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ForumError::transport(None, "no scripted response left")))
    }
}

/// A discussion node as a list query returns it.
pub fn discussion_json(number: i64, title: &str) -> Value {
    json!({
        "id": format!("D_{}", number),
        "number": number,
        "title": title,
        "body": format!("Body of discussion {}", number),
        "url": format!("https://github.com/octo/forum/discussions/{}", number),
        "createdAt": "2024-04-01T10:00:00Z",
        "updatedAt": "2024-04-02T10:00:00Z",
        "author": { "login": "octocat", "avatarUrl": "https://avatars.example/octocat.png" },
        "category": { "id": "C_1", "name": "General", "emoji": ":speech_balloon:" },
        "labels": { "nodes": [{ "id": "L_1", "name": "question", "color": "d876e3" }] },
        "comments": { "totalCount": number },
        "reactions": { "totalCount": number * 2 }
    })
}

/// A snapshot document holding discussions with the given numbers.
/// Titles are `Discussion N`; each has N comments counted.
pub fn snapshot_json(numbers: &[i64]) -> Value {
    let discussions: Vec<Value> = numbers
        .iter()
        .map(|n| {
            json!({
                "id": format!("D_{}", n),
                "number": n,
                "title": format!("Discussion {}", n),
                "body": format!("Body of discussion {}", n),
                "url": format!("https://github.com/octo/forum/discussions/{}", n),
                "createdAt": "2024-04-01T10:00:00Z",
                "updatedAt": "2024-04-02T10:00:00Z",
                "author": { "login": "octocat", "avatarUrl": "https://avatars.example/octocat.png" },
                "category": { "id": "C_1", "name": "General", "emoji": ":speech_balloon:" },
                "labels": { "nodes": [{ "name": "question", "color": "d876e3" }] },
                "comments": { "totalCount": n },
                "reactions": { "totalCount": 1 }
            })
        })
        .collect();

    json!({
        "metadata": { "lastUpdated": "2024-04-03T00:00:00.000Z", "totalDiscussions": numbers.len() },
        "categories": [{ "id": "C_1", "name": "General", "emoji": ":speech_balloon:", "description": "Anything" }],
        "labels": [{ "id": "L_1", "name": "question", "color": "d876e3", "description": "Further information is requested" }],
        "discussions": discussions
    })
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

struct HostState {
    body: Option<Value>,
    hits: AtomicUsize,
    last_query: Mutex<Option<String>>,
}

/// Serves `/data.json`, or 404 when built with `missing`.
pub struct FakeSnapshotHost {
    base_url: String,
    state: Arc<HostState>,
}

impl FakeSnapshotHost {
    pub async fn serving(body: Value) -> Self {
        Self::start(Some(body)).await
    }

    pub async fn missing() -> Self {
        Self::start(None).await
    }

    async fn start(body: Option<Value>) -> Self {
        let state = Arc::new(HostState {
            body,
            hits: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        });
        let app = Router::new()
            .route("/data.json", get(snapshot_handler))
            .with_state(state.clone());

        Self {
            base_url: serve(app).await,
            state,
        }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("{}/data.json", self.base_url)).unwrap()
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub fn last_query(&self) -> Option<String> {
        self.state.last_query.lock().unwrap().clone()
    }
}

async fn snapshot_handler(
    State(state): State<Arc<HostState>>,
    RawQuery(query): RawQuery,
) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = query;
    match &state.body {
        Some(body) => Json(body.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

/// Minimal GitHub GraphQL stand-in. Accepts only `VALID_TOKEN`; any search
/// text containing `ratelimit` yields a `rate limited` error envelope.
pub struct FakeGithub {
    base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeGithub {
    pub async fn start() -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let app = Router::new()
            .route("/graphql", post(graphql_handler))
            .with_state(hits.clone());

        Self {
            base_url: serve(app).await,
            hits,
        }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("{}/graphql", self.base_url)).unwrap()
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn graphql_handler(
    State(hits): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));
    if token != Some(VALID_TOKEN) {
        return (StatusCode::UNAUTHORIZED, "Bad credentials").into_response();
    }

    let query = body["query"].as_str().unwrap_or_default();
    let vars = &body["variables"];

    let data = if query.contains("unpinDiscussion") {
        json!({ "unpinDiscussion": { "discussion": { "id": vars["discussionId"], "isPinned": false } } })
    } else if query.contains("pinDiscussion") {
        json!({ "pinDiscussion": { "discussion": { "id": vars["discussionId"], "isPinned": true } } })
    } else if query.contains("createDiscussion") {
        json!({ "createDiscussion": { "discussion": { "id": "D_77", "number": 77 } } })
    } else if query.contains("addDiscussionComment") {
        json!({ "addDiscussionComment": { "comment": { "id": "DC_1" } } })
    } else if query.contains("removeReaction") {
        json!({ "removeReaction": { "reaction": { "id": "RE_1", "content": vars["content"] } } })
    } else if query.contains("addReaction") {
        json!({ "addReaction": { "reaction": { "id": "RE_1", "content": vars["content"] } } })
    } else if query.contains("addLabelsToLabelable") {
        json!({ "addLabelsToLabelable": { "labelable": { "id": vars["labelableId"], "labels": { "nodes": [
            { "id": "L_2", "name": "bug", "color": "d73a4a" }
        ]}}}})
    } else if query.contains("viewer") {
        json!({ "viewer": { "login": "octocat", "name": "The Octocat", "avatarUrl": "https://avatars.example/octocat.png", "email": null } })
    } else if query.contains("search(") {
        if vars["query"].as_str().unwrap_or_default().contains("ratelimit") {
            return Json(json!({ "data": null, "errors": [{ "message": "rate limited" }] }))
                .into_response();
        }
        json!({ "search": { "discussionCount": 1, "nodes": [discussion_json(8, "Live search hit")] } })
    } else if query.contains("discussion(number") {
        let number = vars["number"].as_i64().unwrap_or_default();
        let mut discussion = discussion_json(number, "Live detail");
        discussion["comments"] = json!({
            "totalCount": 1,
            "nodes": [{
                "id": "DC_1",
                "body": "Nice post",
                "createdAt": "2024-04-02T11:00:00Z",
                "author": { "login": "hubot", "avatarUrl": "https://avatars.example/hubot.png" },
                "replies": { "nodes": [{
                    "id": "DC_2",
                    "body": "Thanks",
                    "createdAt": "2024-04-02T12:00:00Z",
                    "author": null
                }]},
                "reactions": { "totalCount": 2 }
            }]
        });
        json!({ "repository": { "discussion": discussion } })
    } else if query.contains("discussions(first") {
        json!({ "repository": { "discussions": {
            "pageInfo": { "hasNextPage": true, "endCursor": "Y3Vyc29yOjE=" },
            "nodes": [discussion_json(10, "Live first"), discussion_json(9, "Live second")]
        }}})
    } else if query.contains("discussionCategories") {
        json!({ "repository": { "id": "R_1", "discussionCategories": { "nodes": [
            { "id": "C_9", "name": "Announcements", "emoji": ":mega:", "description": null }
        ]}}})
    } else if query.contains("labels(first: 20)") {
        json!({ "repository": { "labels": { "nodes": [
            { "id": "L_2", "name": "bug", "color": "d73a4a", "description": "Something isn't working" }
        ]}}})
    } else {
        json!({ "repository": { "id": "R_1" } })
    };

    Json(json!({ "data": data })).into_response()
}
