use serde::Serialize;

/// A player resolved from a display name.
///
/// `name` is the lookup key the caller supplied; `id` is the stable
/// account handle used for every stats request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlayerIdentity {
    pub name: String,
    pub id: String,
}
