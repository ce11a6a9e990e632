use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{GlobalStats, ModeStats, NormalizedStats, Ratio, RawModeStats, StatsPayload};
use crate::normalize::{ModeFilter, PERCENT};

/// Aggregate a lifetime or season document.
///
/// Per-mode and global ratios use the same formulas:
/// `kd = kills / rounds`, `win = wins / rounds * 100`,
/// `top10 = top10s / rounds * 100`. Global ratios come from the summed
/// counters, never from averaging per-mode ratios, and are `0.00` when no
/// round was played.
pub fn aggregate(payload: &StatsPayload, filter: ModeFilter) -> Option<NormalizedStats> {
    let game_mode_stats = payload.game_mode_stats()?;

    let mut totals = GlobalStats::default();
    let mut modes = BTreeMap::new();

    for (mode, stats) in game_mode_stats
        .iter()
        .filter(|(mode, stats)| filter.matches(mode) && stats.rounds_played > 0)
    {
        accumulate(&mut totals, stats);
        modes.insert(mode.clone(), mode_stats(stats));
    }

    totals.kd_ratio = Ratio::of(totals.kills, totals.rounds_played, 1.0);
    totals.win_ratio = Ratio::of(totals.wins, totals.rounds_played, PERCENT);
    totals.top10_ratio = Ratio::of(totals.top10s, totals.rounds_played, PERCENT);

    debug!(
        %filter,
        included = modes.len(),
        available = game_mode_stats.len(),
        rounds = totals.rounds_played,
        "aggregated mode stats"
    );

    Some(NormalizedStats {
        global: totals,
        modes,
    })
}

fn accumulate(totals: &mut GlobalStats, stats: &RawModeStats) {
    totals.kills = totals.kills.saturating_add(stats.kills);
    totals.deaths = totals.deaths.saturating_add(stats.deaths);
    totals.rounds_played = totals.rounds_played.saturating_add(stats.rounds_played);
    totals.wins = totals.wins.saturating_add(stats.wins);
    totals.top10s = totals.top10s.saturating_add(stats.top10s);
    totals.losses = totals.losses.saturating_add(stats.losses);
    totals.assists = totals.assists.saturating_add(stats.assists);
    totals.headshot_kills = totals.headshot_kills.saturating_add(stats.headshot_kills);
}

fn mode_stats(stats: &RawModeStats) -> ModeStats {
    ModeStats {
        raw: stats.clone(),
        kd_ratio: Ratio::of(stats.kills, stats.rounds_played, 1.0),
        win_ratio: Ratio::of(stats.wins, stats.rounds_played, PERCENT),
        top10_ratio: Ratio::of(stats.top10s, stats.rounds_played, PERCENT),
    }
}
