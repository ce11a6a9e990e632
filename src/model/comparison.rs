use serde::Serialize;

use crate::model::{NormalizedStats, PlayerIdentity, RankedStats};

/// Ranked half of a player's stats.
///
/// `Unavailable` means the ranked data could not be loaded at all, which is
/// distinct from `Available` with zero rounds played.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RankedSection {
    Available(RankedStats),
    Unavailable { reason: String },
}

impl RankedSection {
    pub fn stats(&self) -> Option<&RankedStats> {
        match self {
            RankedSection::Available(stats) => Some(stats),
            RankedSection::Unavailable { .. } => None,
        }
    }
}

/// Everything known about one side of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsBundle {
    pub identity: PlayerIdentity,
    /// `None` when the lifetime document carried no mode stats at all
    pub normal_stats: Option<NormalizedStats>,
    pub ranked_stats: RankedSection,
}

/// Result of comparing two players.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ComparisonResult {
    Complete {
        player1: PlayerStatsBundle,
        player2: PlayerStatsBundle,
    },
    /// At least one side could not be loaded; `reason` names the missing player.
    Partial {
        player1: Option<PlayerStatsBundle>,
        player2: Option<PlayerStatsBundle>,
        reason: String,
    },
}

impl ComparisonResult {
    pub fn player1(&self) -> Option<&PlayerStatsBundle> {
        match self {
            ComparisonResult::Complete { player1, .. } => Some(player1),
            ComparisonResult::Partial { player1, .. } => player1.as_ref(),
        }
    }

    pub fn player2(&self) -> Option<&PlayerStatsBundle> {
        match self {
            ComparisonResult::Complete { player2, .. } => Some(player2),
            ComparisonResult::Partial { player2, .. } => player2.as_ref(),
        }
    }

    /// The failure reason of a partial result.
    pub fn error(&self) -> Option<&str> {
        match self {
            ComparisonResult::Complete { .. } => None,
            ComparisonResult::Partial { reason, .. } => Some(reason),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, ComparisonResult::Complete { .. })
    }
}
