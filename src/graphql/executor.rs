//! Remote query executor.
//!
//! One POST per call to a single endpoint, bearer token attached only when
//! given. Transport failures and GraphQL error envelopes both surface as
//! `ForumError`; there are no retries.

use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ForumError;

/// Executes a GraphQL document and returns the `data` member of the envelope.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(
        &self,
        query: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<Value, ForumError>;
}

#[derive(Debug, Serialize)]
struct GraphRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphErrorItem {
    message: String,
}

/// Response envelope `{ data, errors? }`.
#[derive(Debug, Deserialize)]
struct GraphEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphErrorItem>>,
}

impl GraphEnvelope {
    /// Any error aborts the call, even when partial data came along.
    fn into_data(self) -> Result<Value, ForumError> {
        if let Some(first) = self.errors.as_ref().and_then(|errors| errors.first()) {
            return Err(ForumError::Graph(first.message.clone()));
        }
        match self.data {
            Some(Value::Null) | None => Err(ForumError::Decode(
                "GraphQL response carried no data".to_string(),
            )),
            Some(data) => Ok(data),
        }
    }
}

/// `QueryExecutor` speaking HTTP to the configured endpoint.
#[derive(Clone)]
pub struct HttpExecutor {
    client: Client,
    endpoint: Url,
}

impl HttpExecutor {
    pub fn new(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl QueryExecutor for HttpExecutor {
    async fn execute(
        &self,
        query: &str,
        variables: Value,
        token: Option<&str>,
    ) -> Result<Value, ForumError> {
        let mut request = self
            .client
            .post(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .json(&GraphRequest { query, variables });

        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ForumError::transport(None, format!("GraphQL request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            tracing::warn!("GraphQL endpoint answered {}", status);
            return Err(ForumError::transport(
                Some(status.as_u16()),
                format!("GraphQL request failed: {}", reason),
            ));
        }

        let envelope: GraphEnvelope = response.json().await?;
        envelope.into_data()
    }
}
