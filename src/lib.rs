//! Fetch, normalize and compare PUBG player statistics.
//!
//! [`PubgClient`] resolves players and loads their stats through a
//! [`StatsApi`] transport; [`ComparisonStore`] caches the latest two-player
//! comparison and lets only one load run at a time.

mod client;
mod compare;
pub mod config;
mod error;
pub mod model;
pub mod normalize;
mod pubg_api;
mod store;

pub use client::PubgClient;
pub use config::{ApiConfig, CompareConfig, StoreConfig};
pub use error::{PubgError, Result};
pub use model::*;
pub use normalize::{aggregate, aggregate_ranked, ModeFilter};
pub use pubg_api::{HttpApi, StatsApi};
pub use store::{CacheEntry, Comparator, ComparisonStore, LoadOutcome};
