//! Configuration module for the discussion viewer.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use reqwest::Url;

use crate::errors::ForumError;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Owner of the repository whose discussions are shown
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// GraphQL endpoint used in live mode
    pub graphql_url: Url,
    /// Snapshot document used in guest mode
    pub snapshot_url: Url,
    /// Path to the SQLite file backing the key-value store
    pub db_path: PathBuf,
    /// Namespace prefix for every persisted key
    pub storage_prefix: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// User-Agent header sent upstream
    pub user_agent: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ForumError> {
        dotenvy::dotenv().ok();

        let owner = env::var("FORUM_OWNER").unwrap_or_else(|_| "octocat".to_string());
        let repo = env::var("FORUM_REPO").unwrap_or_else(|_| "discussions".to_string());

        let graphql_url = parse_url(
            "FORUM_GRAPHQL_URL",
            env::var("FORUM_GRAPHQL_URL")
                .unwrap_or_else(|_| "https://api.github.com/graphql".to_string()),
        )?;

        let snapshot_url = parse_url(
            "FORUM_SNAPSHOT_URL",
            env::var("FORUM_SNAPSHOT_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080/data.json".to_string()),
        )?;

        let db_path = env::var("FORUM_DB_PATH")
            .unwrap_or_else(|_| "./data/forum.sqlite".to_string())
            .into();

        let storage_prefix =
            env::var("FORUM_STORAGE_PREFIX").unwrap_or_else(|_| "forum:".to_string());

        let bind_addr = env::var("FORUM_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| ForumError::Config(format!("Invalid FORUM_BIND_ADDR: {}", e)))?;

        let log_level = env::var("FORUM_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let user_agent = env::var("FORUM_USER_AGENT").unwrap_or_else(|_| {
            format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
        });

        Ok(Self {
            owner,
            repo,
            graphql_url,
            snapshot_url,
            db_path,
            storage_prefix,
            bind_addr,
            log_level,
            user_agent,
        })
    }
}

fn parse_url(name: &str, value: String) -> Result<Url, ForumError> {
    Url::parse(&value).map_err(|e| ForumError::Config(format!("Invalid {}: {}", name, e)))
}
