use itertools::Itertools;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::error::{PubgError, Result};
use crate::model::{PlayerIdentity, PlayerListPayload, PlayerPayload};
use crate::pubg_api::{get_payload, StatsApi};

/// Upper bound on names per lookup request.
pub(crate) const MAX_NAMES_PER_LOOKUP: usize = 10;

fn lookup_path(names: &[&str]) -> String {
    let encoded = names
        .iter()
        .map(|name| form_urlencoded::byte_serialize(name.as_bytes()).collect::<String>())
        .join(",");
    format!("/players?filter[playerNames]={encoded}")
}

#[instrument(skip(api))]
pub(crate) async fn get_player(api: &dyn StatsApi, name: &str) -> Result<PlayerIdentity> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PubgError::EmptyPlayerName);
    }

    let payload: PlayerListPayload = get_payload(api, &lookup_path(&[name]), "player lookup").await?;
    let record = payload
        .data
        .into_iter()
        .next()
        .ok_or_else(|| PubgError::PlayerNotFound {
            name: name.to_string(),
        })?;

    debug!(name, id = %record.id, "resolved player");
    Ok(PlayerIdentity {
        name: name.to_string(),
        id: record.id,
    })
}

/// Resolve several names in one request. Names the API does not know are
/// simply absent from the result.
#[instrument(skip(api))]
pub(crate) async fn get_players(api: &dyn StatsApi, names: &[&str]) -> Result<Vec<PlayerIdentity>> {
    if names.len() > MAX_NAMES_PER_LOOKUP {
        return Err(PubgError::TooManyKeys {
            count: names.len(),
            max: MAX_NAMES_PER_LOOKUP,
        });
    }

    let names = names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .collect_vec();
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let path = lookup_path(&names);
    let payload: PlayerListPayload = get_payload(api, &path, "player lookup").await?;
    let players = payload
        .data
        .into_iter()
        .filter_map(|record| {
            let name = record.attributes.and_then(|a| a.name)?;
            Some(PlayerIdentity {
                name,
                id: record.id,
            })
        })
        .collect_vec();

    debug!(requested = names.len(), found = players.len(), "resolved players");
    Ok(players)
}

/// Ids of the player's recent matches, newest first as the API lists them.
#[instrument(skip(api))]
pub(crate) async fn get_recent_match_ids(api: &dyn StatsApi, player_id: &str) -> Result<Vec<String>> {
    let path = format!("/players/{player_id}");
    let payload: PlayerPayload = get_payload(api, &path, "player").await?;
    let match_ids = payload
        .data
        .and_then(|record| record.relationships)
        .and_then(|relationships| relationships.matches)
        .map(|matches| matches.data.into_iter().map(|m| m.id).collect_vec())
        .unwrap_or_default();

    debug!(count = match_ids.len(), player_id, "parsed recent matches");
    Ok(match_ids)
}
