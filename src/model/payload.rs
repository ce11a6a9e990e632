//! Raw JSON:API documents returned by the stats API.
//!
//! Every nesting level is optional so that a partially populated document
//! still decodes; the normalizer decides what an absent level means.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Document returned by the lifetime, season and ranked stats endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsPayload {
    pub data: Option<StatsData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsData {
    pub id: Option<String>,
    pub attributes: Option<StatsAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsAttributes {
    pub game_mode_stats: Option<BTreeMap<String, RawModeStats>>,
    pub ranked_game_mode_stats: Option<BTreeMap<String, RawRankedModeStats>>,
}

impl StatsPayload {
    /// Per-mode counters of a lifetime or season document.
    pub fn game_mode_stats(&self) -> Option<&BTreeMap<String, RawModeStats>> {
        self.data
            .as_ref()?
            .attributes
            .as_ref()?
            .game_mode_stats
            .as_ref()
    }

    /// Per-mode counters of a ranked document.
    pub fn ranked_game_mode_stats(&self) -> Option<&BTreeMap<String, RawRankedModeStats>> {
        self.data
            .as_ref()?
            .attributes
            .as_ref()?
            .ranked_game_mode_stats
            .as_ref()
    }
}

/// Raw counters for one game mode, as reported by the API.
///
/// Counters the normalizer does not use are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModeStats {
    #[serde(default, deserialize_with = "count_or_zero")]
    pub kills: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub deaths: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub rounds_played: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub wins: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub top10s: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub losses: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub assists: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub headshot_kills: u64,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Raw counters for one ranked game mode.
///
/// Ranked documents report some ratios server side and may omit `top10s`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRankedModeStats {
    #[serde(default, deserialize_with = "count_or_zero")]
    pub kills: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub deaths: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub assists: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub rounds_played: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub wins: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top10s: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top10_ratio: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Reads a counter, treating `null` like a missing key.
fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<u64>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Document returned by the player lookup endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerListPayload {
    #[serde(default)]
    pub data: Vec<PlayerRecord>,
}

/// Document returned when fetching a single player by id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerPayload {
    pub data: Option<PlayerRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRecord {
    pub id: String,
    pub attributes: Option<PlayerAttributes>,
    pub relationships: Option<PlayerRelationships>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAttributes {
    pub name: Option<String>,
    pub shard_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerRelationships {
    pub matches: Option<ResourceList>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub data: Vec<ResourceRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

/// Document returned by the season listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonListPayload {
    #[serde(default)]
    pub data: Vec<SeasonRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonRecord {
    pub id: String,
    pub attributes: Option<SeasonAttributes>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonAttributes {
    #[serde(default)]
    pub is_current_season: bool,
    #[serde(default)]
    pub is_offseason: bool,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_missing_levels_decode() {
        let empty: StatsPayload = serde_json::from_value(json!({})).unwrap();
        assert!(empty.game_mode_stats().is_none());

        let no_attributes: StatsPayload =
            serde_json::from_value(json!({ "data": { "id": "lifetime" } })).unwrap();
        assert!(no_attributes.game_mode_stats().is_none());
        assert!(no_attributes.ranked_game_mode_stats().is_none());
    }

    #[test]
    fn test_mode_stats_keep_unknown_counters() {
        let payload: StatsPayload = serde_json::from_value(json!({
            "data": {
                "attributes": {
                    "gameModeStats": {
                        "squad-fpp": { "kills": 3, "roundsPlayed": 2, "damageDealt": 412.5 }
                    }
                }
            }
        }))
        .unwrap();

        let modes = payload.game_mode_stats().unwrap();
        let squad = &modes["squad-fpp"];
        assert_eq!(squad.kills, 3);
        assert_eq!(squad.rounds_played, 2);
        assert_eq!(squad.wins, 0);
        assert_eq!(squad.extra["damageDealt"], json!(412.5));
    }

    #[test]
    fn test_ranked_top10s_optional() {
        let stats: RawRankedModeStats =
            serde_json::from_value(json!({ "roundsPlayed": 8, "top10Ratio": 50.0 })).unwrap();
        assert_eq!(stats.top10s, None);
        assert_eq!(stats.top10_ratio, Some(50.0));
    }

    #[test]
    fn test_null_counters_read_as_zero() {
        let mode: RawModeStats =
            serde_json::from_value(json!({ "kills": null, "roundsPlayed": 2, "wins": null }))
                .unwrap();
        assert_eq!(mode.kills, 0);
        assert_eq!(mode.wins, 0);
        assert_eq!(mode.rounds_played, 2);
        assert!(mode.extra.is_empty());

        let ranked: RawRankedModeStats = serde_json::from_value(json!({
            "deaths": null, "roundsPlayed": 3, "top10s": null, "top10Ratio": null
        }))
        .unwrap();
        assert_eq!(ranked.deaths, 0);
        assert_eq!(ranked.top10s, None);
        assert_eq!(ranked.top10_ratio, None);
    }
}
