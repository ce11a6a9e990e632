use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::compare;
use crate::config::{ApiConfig, CompareConfig};
use crate::error::Result;
use crate::model::*;
use crate::normalize::{aggregate, aggregate_ranked};
use crate::pubg_api::{self, HttpApi, StatsApi};
use crate::store::Comparator;

/// The main entry point for looking up and comparing PUBG players.
///
/// `PubgClient` wraps a [`StatsApi`] transport and exposes player lookup,
/// stats retrieval (raw or normalized) and two-player comparison.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> pubg_stats::Result<()> {
/// use pubg_stats::{ApiConfig, PubgClient};
///
/// let client = PubgClient::new(&ApiConfig::from_env()?)?;
/// let comparison = client.compare("shroud", "chocoTaco").await?;
/// if let Some(reason) = comparison.error() {
///     println!("incomplete comparison: {reason}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PubgClient {
    api: Arc<dyn StatsApi>,
    config: CompareConfig,
}

impl PubgClient {
    /// Create a client talking HTTPS to the configured endpoint.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self::with_api(Arc::new(HttpApi::new(config)?)))
    }

    /// Create a client on top of any [`StatsApi`] implementation.
    pub fn with_api(api: Arc<dyn StatsApi>) -> Self {
        Self {
            api,
            config: CompareConfig::default(),
        }
    }

    /// Set the scope used by [`compare`](Self::compare).
    pub fn with_compare_config(mut self, config: CompareConfig) -> Self {
        self.config = config;
        self
    }

    pub fn compare_config(&self) -> &CompareConfig {
        &self.config
    }

    /// Resolve a display name to a player identity.
    #[instrument(skip(self))]
    pub async fn resolve(&self, name: &str) -> Result<PlayerIdentity> {
        pubg_api::players::get_player(self.api.as_ref(), name).await
    }

    /// Resolve up to ten names in a single request.
    #[instrument(skip(self))]
    pub async fn resolve_many(&self, names: &[&str]) -> Result<Vec<PlayerIdentity>> {
        pubg_api::players::get_players(self.api.as_ref(), names).await
    }

    /// Fetch the ids of a player's recent matches.
    #[instrument(skip(self))]
    pub async fn recent_match_ids(&self, player_id: &str) -> Result<Vec<String>> {
        pubg_api::players::get_recent_match_ids(self.api.as_ref(), player_id).await
    }

    #[instrument(skip(self))]
    pub async fn seasons(&self) -> Result<Vec<Season>> {
        pubg_api::seasons::get_seasons(self.api.as_ref()).await
    }

    /// Id of the current season, or `None` when no season is flagged current.
    #[instrument(skip(self))]
    pub async fn current_season_id(&self) -> Result<Option<String>> {
        pubg_api::seasons::get_current_season_id(self.api.as_ref()).await
    }

    /// Fetch the raw lifetime stats document.
    #[instrument(skip(self))]
    pub async fn lifetime_stats(&self, player_id: &str) -> Result<StatsPayload> {
        pubg_api::stats::get_lifetime_stats(self.api.as_ref(), player_id).await
    }

    /// Fetch the raw stats document for one season.
    #[instrument(skip(self))]
    pub async fn season_stats(&self, player_id: &str, season_id: &str) -> Result<StatsPayload> {
        pubg_api::stats::get_season_stats(self.api.as_ref(), player_id, season_id).await
    }

    /// Fetch the raw ranked stats document for one season.
    #[instrument(skip(self))]
    pub async fn ranked_stats(&self, player_id: &str, season_id: &str) -> Result<StatsPayload> {
        pubg_api::stats::get_ranked_stats(self.api.as_ref(), player_id, season_id).await
    }

    /// Fetch and normalize one season's stats with the configured mode filter.
    #[instrument(skip(self))]
    pub async fn normalized_season_stats(
        &self,
        player_id: &str,
        season_id: &str,
    ) -> Result<Option<NormalizedStats>> {
        let payload = self.season_stats(player_id, season_id).await?;
        Ok(aggregate(&payload, self.config.mode_filter))
    }

    /// Fetch and normalize one season's ranked stats with the configured mode filter.
    #[instrument(skip(self))]
    pub async fn normalized_ranked_stats(
        &self,
        player_id: &str,
        season_id: &str,
    ) -> Result<Option<RankedStats>> {
        let payload = self.ranked_stats(player_id, season_id).await?;
        Ok(aggregate_ranked(&payload, self.config.mode_filter))
    }

    /// Resolve a player and load their normalized lifetime and ranked stats.
    #[instrument(skip(self))]
    pub async fn player_stats(&self, name: &str) -> Result<PlayerStatsBundle> {
        compare::load_player(self.api.as_ref(), &self.config, name).await
    }

    /// Compare two players.
    ///
    /// A player that cannot be found yields a [`ComparisonResult::Partial`]
    /// naming them instead of an error.
    #[instrument(skip(self))]
    pub async fn compare(&self, name1: &str, name2: &str) -> Result<ComparisonResult> {
        compare::compare_players(self.api.as_ref(), &self.config, name1, name2).await
    }
}

#[async_trait]
impl Comparator for PubgClient {
    async fn compare(&self, name1: &str, name2: &str) -> Result<ComparisonResult> {
        PubgClient::compare(self, name1, name2).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::StoreConfig;
    use crate::normalize::ModeFilter;
    use crate::pubg_api::testing::FakeApi;
    use crate::store::{ComparisonStore, LoadOutcome};

    fn fake_api() -> FakeApi {
        FakeApi::new()
            .route(
                "/players?filter[playerNames]=alpha",
                json!({ "data": [{ "id": "account.a", "attributes": { "name": "alpha" } }] }),
            )
            .route(
                "/players?filter[playerNames]=bravo",
                json!({ "data": [{ "id": "account.b", "attributes": { "name": "bravo" } }] }),
            )
            .route(
                "/players/account.a/seasons/lifetime",
                json!({ "data": { "attributes": { "gameModeStats": {
                    "solo": { "kills": 10, "roundsPlayed": 4 },
                    "solo-fpp": { "kills": 1, "roundsPlayed": 1 }
                } } } }),
            )
            .route(
                "/players/account.b/seasons/lifetime",
                json!({ "data": { "attributes": { "gameModeStats": {} } } }),
            )
            .route(
                "/players/account.a/seasons/s1",
                json!({ "data": { "attributes": { "gameModeStats": {
                    "duo-fpp": { "kills": 4, "roundsPlayed": 2, "wins": 1 }
                } } } }),
            )
            .route("/seasons", json!({ "data": [] }))
    }

    #[tokio::test]
    async fn test_compare_through_client() {
        let client = PubgClient::with_api(Arc::new(fake_api()));
        let result = client.compare("alpha", "bravo").await.unwrap();
        assert!(result.is_complete());
        assert_eq!(
            result.player1().unwrap().normal_stats.as_ref().unwrap().global.kills,
            11
        );
    }

    #[tokio::test]
    async fn test_compare_config_applies_filter() {
        let client = PubgClient::with_api(Arc::new(fake_api())).with_compare_config(CompareConfig {
            mode_filter: ModeFilter::ThirdPerson,
            include_ranked: true,
        });
        let bundle = client.player_stats("alpha").await.unwrap();
        assert_eq!(bundle.normal_stats.unwrap().global.kills, 10);
    }

    #[tokio::test]
    async fn test_normalized_season_stats() {
        let client = PubgClient::with_api(Arc::new(fake_api()));
        let stats = client
            .normalized_season_stats("account.a", "s1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stats.global.win_ratio.to_string(), "50.00");
        assert_eq!(stats.global.kd_ratio.to_string(), "2.00");
    }

    #[tokio::test]
    async fn test_store_over_client() {
        let api = Arc::new(fake_api());
        let client = PubgClient::with_api(api.clone());
        let store = ComparisonStore::new(Arc::new(client), StoreConfig::default());

        assert!(matches!(store.load_data("alpha", "bravo").await, LoadOutcome::Fetched(_)));
        let requests = api.calls().len();
        assert!(matches!(store.load_data("alpha", "bravo").await, LoadOutcome::Cached(_)));
        assert_eq!(api.calls().len(), requests);
    }
}
