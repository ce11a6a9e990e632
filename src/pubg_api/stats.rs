use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::StatsPayload;
use crate::pubg_api::{get_payload, StatsApi};

#[instrument(skip(api))]
pub(crate) async fn get_lifetime_stats(api: &dyn StatsApi, player_id: &str) -> Result<StatsPayload> {
    let path = format!("/players/{player_id}/seasons/lifetime");
    let payload: StatsPayload = get_payload(api, &path, "lifetime stats").await?;
    debug!(
        modes = payload.game_mode_stats().map_or(0, |m| m.len()),
        player_id, "parsed lifetime stats"
    );
    Ok(payload)
}

#[instrument(skip(api))]
pub(crate) async fn get_season_stats(
    api: &dyn StatsApi,
    player_id: &str,
    season_id: &str,
) -> Result<StatsPayload> {
    let path = format!("/players/{player_id}/seasons/{season_id}");
    let payload: StatsPayload = get_payload(api, &path, "season stats").await?;
    debug!(
        modes = payload.game_mode_stats().map_or(0, |m| m.len()),
        player_id, season_id, "parsed season stats"
    );
    Ok(payload)
}

#[instrument(skip(api))]
pub(crate) async fn get_ranked_stats(
    api: &dyn StatsApi,
    player_id: &str,
    season_id: &str,
) -> Result<StatsPayload> {
    let path = format!("/players/{player_id}/seasons/{season_id}/ranked");
    let payload: StatsPayload = get_payload(api, &path, "ranked stats").await?;
    debug!(
        modes = payload.ranked_game_mode_stats().map_or(0, |m| m.len()),
        player_id, season_id, "parsed ranked stats"
    );
    Ok(payload)
}
