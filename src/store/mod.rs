//! Key-value store adapter.
//!
//! Wraps a persistent string-keyed store with JSON (de)serialization. The
//! adapter never fails: read errors yield the caller's fallback and write
//! errors yield `false`. Every key is namespaced with a fixed prefix.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;

use crate::errors::ForumError;

/// Key holding the bearer token, stored as a plain string.
pub const CREDENTIAL_KEY: &str = "github_token";

/// Key holding the last verified viewer profile as JSON.
pub const VIEWER_KEY: &str = "viewer";

/// Raw string storage backend.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, ForumError>;
    async fn set_raw(&self, key: &str, value: &str) -> Result<(), ForumError>;
    async fn remove(&self, key: &str) -> Result<(), ForumError>;
}

/// Process-local store, optionally capped at a number of entries.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects inserts of new keys once `quota` entries exist.
    #[cfg(test)]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(quota),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, ForumError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<(), ForumError> {
        let mut entries = self.entries.write().await;
        if let Some(quota) = self.quota {
            if !entries.contains_key(key) && entries.len() >= quota {
                return Err(ForumError::Storage(format!(
                    "Storage quota of {} entries exceeded",
                    quota
                )));
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), ForumError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Prefixed, failure-swallowing view over a `KeyValueStore`.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl Storage {
    pub fn new(backend: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            backend,
            prefix: prefix.into(),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Read and decode a JSON value, or return `fallback`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        match self.get_string(key).await {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Storage get error for {}: {}", key, e);
                    fallback
                }
            },
            None => fallback,
        }
    }

    /// Encode and write a JSON value. Returns whether the write succeeded.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        match serde_json::to_string(value) {
            Ok(raw) => self.set_string(key, &raw).await,
            Err(e) => {
                tracing::warn!("Storage set error for {}: {}", key, e);
                false
            }
        }
    }

    /// Read a plain string value.
    pub async fn get_string(&self, key: &str) -> Option<String> {
        match self.backend.get_raw(&self.key(key)).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Storage get error for {}: {}", key, e);
                None
            }
        }
    }

    /// Write a plain string value. Returns whether the write succeeded.
    pub async fn set_string(&self, key: &str, value: &str) -> bool {
        match self.backend.set_raw(&self.key(key), value).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Storage set error for {}: {}", key, e);
                false
            }
        }
    }

    /// Delete a key. Returns whether the delete succeeded.
    pub async fn remove(&self, key: &str) -> bool {
        match self.backend.remove(&self.key(key)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Storage remove error for {}: {}", key, e);
                false
            }
        }
    }

    /// The stored bearer token. Blank values count as absent.
    pub async fn credential(&self) -> Option<String> {
        self.get_string(CREDENTIAL_KEY)
            .await
            .filter(|token| !token.trim().is_empty())
    }

    /// Store a bearer token. Only the session endpoints call this.
    pub async fn store_credential(&self, token: &str) -> bool {
        self.set_string(CREDENTIAL_KEY, token.trim()).await
    }

    /// Forget the token and the profile verified with it.
    pub async fn clear_credential(&self) -> bool {
        let cleared = self.remove(CREDENTIAL_KEY).await;
        self.remove(VIEWER_KEY).await;
        cleared
    }
}
