use itertools::Itertools;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{Season, SeasonListPayload};
use crate::pubg_api::{get_payload, StatsApi};

#[instrument(skip(api))]
pub(crate) async fn get_seasons(api: &dyn StatsApi) -> Result<Vec<Season>> {
    let payload: SeasonListPayload = get_payload(api, "/seasons", "season list").await?;
    let seasons = payload
        .data
        .into_iter()
        .map(|record| {
            let attributes = record.attributes.unwrap_or_default();
            Season {
                id: record.id,
                is_current: attributes.is_current_season,
                is_offseason: attributes.is_offseason,
            }
        })
        .collect_vec();
    debug!(count = seasons.len(), "parsed season list");
    Ok(seasons)
}

/// Id of the season flagged as current, or `None` when no season is.
#[instrument(skip(api))]
pub(crate) async fn get_current_season_id(api: &dyn StatsApi) -> Result<Option<String>> {
    let current = get_seasons(api)
        .await?
        .into_iter()
        .find(|season| season.is_current)
        .map(|season| season.id);
    debug!(?current, "resolved current season");
    Ok(current)
}
