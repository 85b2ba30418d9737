//! Static snapshot loader.
//!
//! Fetches the snapshot document once per process and serves it from memory
//! afterwards. A failed load degrades to an empty snapshot and is not cached,
//! so the next call tries again. Concurrent first loads share one fetch.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, Url};
use tokio::sync::OnceCell;

use crate::errors::ForumError;
use crate::models::Snapshot;

pub struct SnapshotLoader {
    client: Client,
    url: Url,
    cache: OnceCell<Arc<Snapshot>>,
}

impl SnapshotLoader {
    pub fn new(client: Client, url: Url) -> Self {
        Self {
            client,
            url,
            cache: OnceCell::new(),
        }
    }

    /// A loader whose cache is already filled; it never touches the network.
    #[cfg(test)]
    pub fn preloaded(snapshot: Snapshot) -> Self {
        Self {
            client: Client::new(),
            url: Url::parse("http://127.0.0.1:9/data.json").expect("static url"),
            cache: OnceCell::new_with(Some(Arc::new(snapshot))),
        }
    }

    /// The cached snapshot, fetching it on first use. Never fails.
    pub async fn load(&self) -> Arc<Snapshot> {
        if self.is_cached() {
            tracing::debug!("Serving cached snapshot");
        }

        let loaded = self
            .cache
            .get_or_try_init(|| async {
                let snapshot = self.fetch().await?;
                tracing::info!(
                    "Snapshot loaded: {} discussions, {} categories, {} labels",
                    snapshot.discussions.len(),
                    snapshot.categories.len(),
                    snapshot.labels.len()
                );
                Ok::<_, ForumError>(Arc::new(snapshot))
            })
            .await;

        match loaded {
            Ok(snapshot) => snapshot.clone(),
            Err(e) => {
                tracing::warn!("Snapshot load failed, serving empty snapshot: {}", e);
                Arc::new(Snapshot::empty())
            }
        }
    }

    pub fn is_cached(&self) -> bool {
        self.cache.initialized()
    }

    async fn fetch(&self) -> Result<Snapshot, ForumError> {
        let url = cache_busted(&self.url);
        tracing::debug!("Fetching snapshot from {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ForumError::transport(
                Some(status.as_u16()),
                format!(
                    "Failed to load snapshot: {}",
                    status.canonical_reason().unwrap_or("unknown status")
                ),
            ));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// Append `t=<unix millis>` so intermediate caches are bypassed.
fn cache_busted(url: &Url) -> Url {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let mut url = url.clone();
    url.query_pairs_mut().append_pair("t", &millis.to_string());
    url
}
