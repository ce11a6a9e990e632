use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PubgError, Result};
use crate::normalize::ModeFilter;

const API_KEY_VAR: &str = "PUBG_API_KEY";
const SHARD_VAR: &str = "PUBG_SHARD";
const BASE_URL_VAR: &str = "PUBG_API_BASE";

/// Connection settings for the PUBG stats API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root, without the shard segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Platform shard, e.g. "steam" or "kakao"
    #[serde(default = "default_shard")]
    pub shard: String,

    /// Bearer token
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.pubg.com".to_string()
}

fn default_shard() -> String {
    "steam".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl ApiConfig {
    /// Build a config with default endpoint settings and the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            shard: default_shard(),
            api_key: api_key.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Load settings from the environment (and a `.env` file, if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(PubgError::MissingApiKey)?;

        let mut config = Self::new(api_key);
        if let Ok(shard) = std::env::var(SHARD_VAR) {
            config.shard = shard;
        }
        if let Ok(base_url) = std::env::var(BASE_URL_VAR) {
            config.base_url = base_url;
        }
        Ok(config)
    }

    /// Root every request path is appended to.
    pub fn endpoint(&self) -> String {
        format!("{}/shards/{}", self.base_url.trim_end_matches('/'), self.shard)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Scope of a two-player comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Which game modes are folded into the aggregates
    #[serde(default)]
    pub mode_filter: ModeFilter,

    /// Whether to fetch the current season's ranked stats
    #[serde(default = "default_include_ranked")]
    pub include_ranked: bool,
}

fn default_include_ranked() -> bool {
    true
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            mode_filter: ModeFilter::default(),
            include_ranked: default_include_ranked(),
        }
    }
}

/// Settings for the comparison cache.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long a cached comparison is considered fresh
    pub ttl: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_includes_shard() {
        let mut config = ApiConfig::new("key");
        assert_eq!(config.endpoint(), "https://api.pubg.com/shards/steam");

        config.base_url = "http://localhost:8080/".to_string();
        config.shard = "kakao".to_string();
        assert_eq!(config.endpoint(), "http://localhost:8080/shards/kakao");
    }

    #[test]
    fn test_compare_config_defaults() {
        let config: CompareConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.mode_filter, ModeFilter::All);
        assert!(config.include_ranked);

        let config: CompareConfig =
            serde_json::from_str(r#"{"mode_filter": "fpp", "include_ranked": false}"#).unwrap();
        assert_eq!(config.mode_filter, ModeFilter::FirstPerson);
        assert!(!config.include_ranked);
    }

    #[test]
    fn test_store_ttl_is_five_minutes() {
        assert_eq!(StoreConfig::default().ttl, Duration::from_secs(300));
    }
}
