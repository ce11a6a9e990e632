//! Turns raw per-mode counters into summed totals and two-decimal ratios.
//!
//! Normalization never fails: a document without data, attributes or a mode
//! map yields `None` (an empty aggregation). Only modes that pass the
//! [`ModeFilter`] and have at least one round played are folded in.

mod lifetime;
mod ranked;

pub use lifetime::aggregate;
pub use ranked::aggregate_ranked;

use serde::{Deserialize, Serialize};

/// Suffix the API appends to first-person-perspective mode keys.
const FPP_SUFFIX: &str = "-fpp";

/// Which game modes take part in an aggregation.
#[derive(
    Default,
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
pub enum ModeFilter {
    #[default]
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    All,
    /// Modes played in first-person perspective (`squad-fpp`, ...)
    #[serde(rename = "fpp")]
    #[strum(serialize = "fpp")]
    FirstPerson,
    /// Modes played in third-person perspective (`squad`, ...)
    #[serde(rename = "tpp")]
    #[strum(serialize = "tpp")]
    ThirdPerson,
}

impl ModeFilter {
    pub fn matches(self, mode: &str) -> bool {
        match self {
            ModeFilter::All => true,
            ModeFilter::FirstPerson => mode.contains(FPP_SUFFIX),
            ModeFilter::ThirdPerson => !mode.contains(FPP_SUFFIX),
        }
    }
}

const PERCENT: f64 = 100.0;
