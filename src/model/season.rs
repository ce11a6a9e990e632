use serde::Serialize;

/// A season from the season listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: String,
    pub is_current: bool,
    pub is_offseason: bool,
}
