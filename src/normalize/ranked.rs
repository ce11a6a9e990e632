use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{
    RankedGlobalStats, RankedModeStats, RankedStats, Ratio, RawRankedModeStats, StatsPayload,
};
use crate::normalize::{ModeFilter, PERCENT};

/// Aggregate a ranked document.
///
/// Same inclusion rule as [`aggregate`](super::aggregate), but the kill ratio
/// is `kills / deaths` (`0.00` with no deaths).
pub fn aggregate_ranked(payload: &StatsPayload, filter: ModeFilter) -> Option<RankedStats> {
    let ranked_mode_stats = payload.ranked_game_mode_stats()?;

    let mut totals = RankedGlobalStats::default();
    let mut modes = BTreeMap::new();

    for (mode, stats) in ranked_mode_stats
        .iter()
        .filter(|(mode, stats)| filter.matches(mode) && stats.rounds_played > 0)
    {
        let top10s = top10_count(stats);
        totals.kills = totals.kills.saturating_add(stats.kills);
        totals.deaths = totals.deaths.saturating_add(stats.deaths);
        totals.assists = totals.assists.saturating_add(stats.assists);
        totals.rounds_played = totals.rounds_played.saturating_add(stats.rounds_played);
        totals.wins = totals.wins.saturating_add(stats.wins);
        totals.top10s = totals.top10s.saturating_add(top10s);

        modes.insert(
            mode.clone(),
            RankedModeStats {
                raw: stats.clone(),
                top10s,
                kdr: Ratio::of(stats.kills, stats.deaths, 1.0),
                win_ratio: Ratio::of(stats.wins, stats.rounds_played, PERCENT),
                top10_ratio: Ratio::of(top10s, stats.rounds_played, PERCENT),
            },
        );
    }

    totals.kdr = Ratio::of(totals.kills, totals.deaths, 1.0);
    totals.win_ratio = Ratio::of(totals.wins, totals.rounds_played, PERCENT);
    totals.top10_ratio = Ratio::of(totals.top10s, totals.rounds_played, PERCENT);

    debug!(
        %filter,
        included = modes.len(),
        available = ranked_mode_stats.len(),
        rounds = totals.rounds_played,
        "aggregated ranked stats"
    );

    Some(RankedStats {
        global: totals,
        modes,
    })
}

/// Raw `top10s` when reported, else `round(top10Ratio * roundsPlayed / 100)`.
fn top10_count(stats: &RawRankedModeStats) -> u64 {
    if let Some(top10s) = stats.top10s {
        return top10s;
    }
    match stats.top10_ratio {
        Some(ratio) if ratio.is_finite() && ratio > 0.0 => {
            (ratio * stats.rounds_played as f64 / PERCENT).round() as u64
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    use super::*;

    fn payload(modes: Value) -> StatsPayload {
        serde_json::from_value(json!({
            "data": { "type": "rankedplayerstats", "attributes": { "rankedGameModeStats": modes } }
        }))
        .unwrap()
    }

    #[test]
    fn test_top10s_reconstructed_from_ratio() {
        let stats = aggregate_ranked(
            &payload(json!({ "squad-fpp": { "kills": 6, "deaths": 8, "roundsPlayed": 8, "top10Ratio": 50 } })),
            ModeFilter::All,
        )
        .unwrap();

        assert_eq!(stats.modes["squad-fpp"].top10s, 4);
        assert_eq!(stats.global.top10s, 4);
        assert_eq!(stats.global.top10_ratio.to_string(), "50.00");
    }

    #[test]
    fn test_raw_top10s_wins_over_ratio() {
        let stats = aggregate_ranked(
            &payload(json!({ "squad": { "roundsPlayed": 10, "top10s": 3, "top10Ratio": 90 } })),
            ModeFilter::All,
        )
        .unwrap();

        assert_eq!(stats.global.top10s, 3);
    }

    #[test]
    fn test_kdr_uses_deaths() {
        let stats = aggregate_ranked(
            &payload(json!({
                "squad-fpp": { "kills": 30, "deaths": 12, "roundsPlayed": 15, "wins": 3 },
                "duo-fpp": { "kills": 5, "deaths": 8, "roundsPlayed": 10, "wins": 1 }
            })),
            ModeFilter::All,
        )
        .unwrap();

        assert_eq!(stats.global.kills, 35);
        assert_eq!(stats.global.deaths, 20);
        assert_eq!(stats.global.kdr.to_string(), "1.75");
        assert_eq!(stats.global.win_ratio.to_string(), "16.00");
        assert_eq!(stats.modes["squad-fpp"].kdr.to_string(), "2.50");
    }

    #[test]
    fn test_no_deaths_gives_zero_kdr() {
        let stats = aggregate_ranked(
            &payload(json!({ "squad": { "kills": 4, "deaths": 0, "roundsPlayed": 1 } })),
            ModeFilter::All,
        )
        .unwrap();

        assert_eq!(stats.global.kdr.to_string(), "0.00");
        assert_eq!(stats.modes["squad"].kdr.to_string(), "0.00");
    }

    #[test]
    fn test_counter_totals_saturate() {
        let stats = aggregate_ranked(
            &payload(json!({
                "squad": { "deaths": u64::MAX, "roundsPlayed": 1 },
                "duo": { "deaths": 2, "roundsPlayed": 1, "top10s": null }
            })),
            ModeFilter::All,
        )
        .unwrap();

        assert_eq!(stats.global.deaths, u64::MAX);
        assert_eq!(stats.global.top10s, 0);
    }

    #[test]
    fn test_empty_ranked_document() {
        assert_eq!(aggregate_ranked(&StatsPayload::default(), ModeFilter::All), None);

        let zero = aggregate_ranked(&payload(json!({})), ModeFilter::All).unwrap();
        assert!(zero.modes.is_empty());
        assert_eq!(zero.global.kdr.to_string(), "0.00");
        assert_eq!(zero.global.win_ratio.to_string(), "0.00");
        assert_eq!(zero.global.top10_ratio.to_string(), "0.00");
    }

    #[test]
    fn test_ranked_respects_mode_filter() {
        let stats = aggregate_ranked(
            &payload(json!({
                "squad-fpp": { "kills": 3, "deaths": 3, "roundsPlayed": 3 },
                "squad": { "kills": 9, "deaths": 1, "roundsPlayed": 2 }
            })),
            ModeFilter::FirstPerson,
        )
        .unwrap();

        assert_eq!(stats.global.kills, 3);
        assert_eq!(stats.global.kdr.to_string(), "1.00");
    }
}
