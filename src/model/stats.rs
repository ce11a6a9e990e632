use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::model::{RawModeStats, RawRankedModeStats};

/// A derived ratio, held at two-decimal precision.
///
/// Values are rounded half away from zero and always render with exactly two
/// decimals (`"0.00"`, `"2.50"`). Serializes as that string.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Ratio(f64);

impl Ratio {
    pub const ZERO: Ratio = Ratio(0.0);

    /// `numerator / denominator * scale`, or [`Ratio::ZERO`] when the denominator is zero.
    pub fn of(numerator: u64, denominator: u64, scale: f64) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        Self::rounded(numerator as f64 / denominator as f64 * scale)
    }

    /// Round `value` to two decimals.
    pub fn rounded(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Ratio((value * 100.0).round() / 100.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Ratio {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One game mode's raw counters plus the ratios derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStats {
    #[serde(flatten)]
    pub raw: RawModeStats,
    pub kd_ratio: Ratio,
    pub win_ratio: Ratio,
    pub top10_ratio: Ratio,
}

/// Counters summed over every included mode, with ratios computed from the sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub kills: u64,
    pub deaths: u64,
    pub rounds_played: u64,
    pub wins: u64,
    pub top10s: u64,
    pub losses: u64,
    pub assists: u64,
    pub headshot_kills: u64,
    pub kd_ratio: Ratio,
    pub win_ratio: Ratio,
    pub top10_ratio: Ratio,
}

/// Normalized lifetime or season stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizedStats {
    pub global: GlobalStats,
    pub modes: BTreeMap<String, ModeStats>,
}

/// One ranked mode's raw counters plus derived ratios.
///
/// The raw record stays nested: ranked documents carry server-side ratios
/// under the same names. `top10s` is the raw count when reported, otherwise
/// reconstructed from `top10Ratio`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedModeStats {
    pub raw: RawRankedModeStats,
    pub top10s: u64,
    pub kdr: Ratio,
    pub win_ratio: Ratio,
    pub top10_ratio: Ratio,
}

/// Ranked counters summed over every included mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedGlobalStats {
    pub kills: u64,
    pub deaths: u64,
    pub assists: u64,
    pub rounds_played: u64,
    pub wins: u64,
    pub top10s: u64,
    pub kdr: Ratio,
    pub win_ratio: Ratio,
    pub top10_ratio: Ratio,
}

/// Normalized ranked stats for one season.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankedStats {
    pub global: RankedGlobalStats,
    pub modes: BTreeMap<String, RankedModeStats>,
}
