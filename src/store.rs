use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{error, info, instrument};

use crate::config::StoreConfig;
use crate::error::Result;
use crate::model::ComparisonResult;

/// Anything that can produce a two-player comparison.
#[async_trait]
pub trait Comparator: Send + Sync {
    async fn compare(&self, name1: &str, name2: &str) -> Result<ComparisonResult>;
}

/// The comparison currently held by a [`ComparisonStore`].
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Player names in the order they were requested
    pub key: (String, String),
    pub value: Arc<ComparisonResult>,
    pub fetched_at: DateTime<Utc>,
    loaded_at: Instant,
}

impl CacheEntry {
    fn matches(&self, name1: &str, name2: &str) -> bool {
        self.key.0 == name1 && self.key.1 == name2
    }

    fn is_fresh(&self, ttl: Duration) -> bool {
        self.loaded_at.elapsed() < ttl
    }
}

/// What a call to [`ComparisonStore::load_data`] did.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The held comparison was fresh; nothing was fetched.
    Cached(Arc<ComparisonResult>),
    /// A new comparison was fetched and is now held.
    Fetched(Arc<ComparisonResult>),
    /// Another load is in progress; nothing was fetched.
    Busy,
    /// The load failed. `previous` is the comparison still held, if any.
    Failed {
        message: String,
        previous: Option<Arc<ComparisonResult>>,
    },
}

impl LoadOutcome {
    pub fn result(&self) -> Option<&Arc<ComparisonResult>> {
        match self {
            LoadOutcome::Cached(result) | LoadOutcome::Fetched(result) => Some(result),
            LoadOutcome::Failed { previous, .. } => previous.as_ref(),
            LoadOutcome::Busy => None,
        }
    }
}

#[derive(Default)]
struct StoreState {
    entry: Option<CacheEntry>,
    error: Option<String>,
}

/// Holds the most recent comparison and guards against concurrent loads.
///
/// At most one load runs at a time across all player pairs. A held
/// comparison is served again for the same ordered pair of names while it is
/// younger than the TTL. Only complete comparisons are cached; a failed or
/// partial load records its message and leaves the held comparison alone.
pub struct ComparisonStore {
    comparator: Arc<dyn Comparator>,
    ttl: Duration,
    loading: AtomicBool,
    state: RwLock<StoreState>,
}

/// Clears the loading flag when a load finishes, however it finishes.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ComparisonStore {
    pub fn new(comparator: Arc<dyn Comparator>, config: StoreConfig) -> Self {
        Self {
            comparator,
            ttl: config.ttl,
            loading: AtomicBool::new(false),
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Return the comparison of `name1` and `name2`, fetching it if the held
    /// one is missing, stale or for another pair.
    #[instrument(skip(self))]
    pub async fn load_data(&self, name1: &str, name2: &str) -> LoadOutcome {
        if let Some(entry) = self.state.read().await.entry.as_ref() {
            if entry.matches(name1, name2) && entry.is_fresh(self.ttl) {
                info!("serving cached comparison");
                return LoadOutcome::Cached(entry.value.clone());
            }
        }

        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("load already in progress");
            return LoadOutcome::Busy;
        }
        let _loading = LoadingGuard(&self.loading);

        info!("loading fresh comparison");
        let outcome = self.comparator.compare(name1, name2).await;

        let mut state = self.state.write().await;
        let message = match outcome {
            Ok(result) if result.is_complete() => {
                let value = Arc::new(result);
                state.entry = Some(CacheEntry {
                    key: (name1.to_string(), name2.to_string()),
                    value: value.clone(),
                    fetched_at: Utc::now(),
                    loaded_at: Instant::now(),
                });
                state.error = None;
                return LoadOutcome::Fetched(value);
            }
            Ok(result) => result
                .error()
                .unwrap_or("comparison incomplete")
                .to_string(),
            Err(err) => err.to_string(),
        };

        error!(message = %message, "comparison load failed");
        state.error = Some(message.clone());
        LoadOutcome::Failed {
            message,
            previous: state.entry.as_ref().map(|entry| entry.value.clone()),
        }
    }

    /// Drop the held comparison, regardless of its age or a running load.
    pub async fn clear_cache(&self) {
        self.state.write().await.entry = None;
        info!("comparison cache cleared");
    }

    /// The held comparison, fresh or not.
    pub async fn cached(&self) -> Option<Arc<ComparisonResult>> {
        self.state
            .read()
            .await
            .entry
            .as_ref()
            .map(|entry| entry.value.clone())
    }

    pub async fn cache_entry(&self) -> Option<CacheEntry> {
        self.state.read().await.entry.clone()
    }

    /// Message of the most recent failed load, cleared by the next successful one.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }
}
