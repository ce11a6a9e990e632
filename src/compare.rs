use tracing::{debug, instrument, warn};

use crate::config::CompareConfig;
use crate::error::{PubgError, Result};
use crate::model::{ComparisonResult, PlayerStatsBundle, RankedSection};
use crate::normalize::{aggregate, aggregate_ranked};
use crate::pubg_api::{players, seasons, stats, StatsApi};

/// Compare two players.
///
/// Both players are loaded concurrently and independently. A player that
/// cannot be resolved, or whose lifetime stats fail upstream, turns the
/// result into [`ComparisonResult::Partial`] rather than an error; any other
/// failure is returned as `Err`.
#[instrument(skip(api, config))]
pub(crate) async fn compare_players(
    api: &dyn StatsApi,
    config: &CompareConfig,
    name1: &str,
    name2: &str,
) -> Result<ComparisonResult> {
    let (player1, player2) = tokio::join!(
        load_player(api, config, name1),
        load_player(api, config, name2)
    );

    let (player1, reason1) = split_failure(player1, name1)?;
    let (player2, reason2) = split_failure(player2, name2)?;

    match (player1, player2, reason1.or(reason2)) {
        (Some(player1), Some(player2), None) => Ok(ComparisonResult::Complete { player1, player2 }),
        (player1, player2, reason) => {
            let reason = reason.unwrap_or_else(|| "comparison incomplete".to_string());
            warn!(reason = %reason, "partial comparison");
            Ok(ComparisonResult::Partial {
                player1,
                player2,
                reason,
            })
        }
    }
}

/// Separate a recoverable per-player failure (missing player, upstream error)
/// from one that must abort the comparison.
fn split_failure(
    result: Result<PlayerStatsBundle>,
    name: &str,
) -> Result<(Option<PlayerStatsBundle>, Option<String>)> {
    match result {
        Ok(bundle) => Ok((Some(bundle), None)),
        Err(PubgError::PlayerNotFound { .. } | PubgError::EmptyPlayerName) => {
            Ok((None, Some(format!("player {name} was not found"))))
        }
        Err(err) if err.is_upstream() => Ok((None, Some(format!("could not load {name}: {err}")))),
        Err(err) => Err(err),
    }
}

/// Resolve one player and load their lifetime and ranked stats.
#[instrument(skip(api, config))]
pub(crate) async fn load_player(
    api: &dyn StatsApi,
    config: &CompareConfig,
    name: &str,
) -> Result<PlayerStatsBundle> {
    let identity = players::get_player(api, name).await?;

    let lifetime = stats::get_lifetime_stats(api, &identity.id).await?;
    let normal_stats = aggregate(&lifetime, config.mode_filter);

    let ranked_stats = if config.include_ranked {
        match load_ranked(api, config, &identity.id).await {
            Ok(section) => section,
            Err(err) => {
                warn!(player = name, error = %err, "ranked stats unavailable");
                RankedSection::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    } else {
        RankedSection::Unavailable {
            reason: "ranked stats disabled".to_string(),
        }
    };

    debug!(player = name, id = %identity.id, "loaded player bundle");
    Ok(PlayerStatsBundle {
        identity,
        normal_stats,
        ranked_stats,
    })
}

async fn load_ranked(
    api: &dyn StatsApi,
    config: &CompareConfig,
    player_id: &str,
) -> Result<RankedSection> {
    let Some(season_id) = seasons::get_current_season_id(api).await? else {
        return Ok(RankedSection::Unavailable {
            reason: "no current season".to_string(),
        });
    };

    let ranked = stats::get_ranked_stats(api, player_id, &season_id).await?;
    Ok(match aggregate_ranked(&ranked, config.mode_filter) {
        Some(stats) => RankedSection::Available(stats),
        None => RankedSection::Unavailable {
            reason: format!("no ranked stats for season {season_id}"),
        },
    })
}
