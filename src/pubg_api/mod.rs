pub(crate) mod players;
pub(crate) mod seasons;
pub(crate) mod stats;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{PubgError, Result};

const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// The single request shape every lookup and stats call goes through.
///
/// `path` is relative to the shard endpoint, e.g. `/seasons`.
#[async_trait]
pub trait StatsApi: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value>;
}

/// [`StatsApi`] over HTTPS with bearer-token authentication.
pub struct HttpApi {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PubgError::Http {
                url: config.endpoint(),
                source: e,
            })?;
        Ok(Self::with_client(http, config))
    }

    /// Use the provided [`reqwest::Client`] instead of building one.
    pub fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            http: client,
            endpoint: config.endpoint(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl StatsApi for HttpApi {
    async fn get_json(&self, path: &str) -> Result<Value> {
        let url = format!("{}{path}", self.endpoint);
        debug!(url = %url, "fetching document");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_key)
            .header(ACCEPT, JSON_API_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| PubgError::Http {
                url: url.clone(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PubgError::UnexpectedStatus { url, status });
        }

        let body = response.text().await.map_err(|e| PubgError::ResponseBody {
            url: url.clone(),
            source: e,
        })?;

        serde_json::from_str(&body).map_err(|e| PubgError::Json { url, source: e })
    }
}

/// Fetch `path` and decode it into a payload record.
pub(crate) async fn get_payload<T: DeserializeOwned>(
    api: &dyn StatsApi,
    path: &str,
    context: &'static str,
) -> Result<T> {
    let document = api.get_json(path).await?;
    serde_json::from_value(document).map_err(PubgError::decode(context))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Scripted [`StatsApi`]: each path answers with a fixed document or status.
    #[derive(Default)]
    pub(crate) struct FakeApi {
        routes: HashMap<String, std::result::Result<Value, reqwest::StatusCode>>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeApi {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn route(mut self, path: impl Into<String>, document: Value) -> Self {
            self.routes.insert(path.into(), Ok(document));
            self
        }

        pub(crate) fn fail(mut self, path: impl Into<String>, status: reqwest::StatusCode) -> Self {
            self.routes.insert(path.into(), Err(status));
            self
        }

        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatsApi for FakeApi {
        async fn get_json(&self, path: &str) -> Result<Value> {
            self.calls.lock().unwrap().push(path.to_string());
            match self.routes.get(path) {
                Some(Ok(document)) => Ok(document.clone()),
                Some(Err(status)) => Err(PubgError::UnexpectedStatus {
                    url: path.to_string(),
                    status: *status,
                }),
                None => Err(PubgError::UnexpectedStatus {
                    url: path.to_string(),
                    status: reqwest::StatusCode::NOT_FOUND,
                }),
            }
        }
    }
}
