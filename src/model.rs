use serde::{Deserialize, Serialize};

/// Canonical view of a catalog entry. Only exists for the duration of a
/// search or random-pick response; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub thumb: String,
    pub source: String,
}

/// A user-saved recipe reference, one row in the `favorites` table.
///
/// `saved_at` is assigned by the server on first save and kept on later
/// re-saves of the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub title: String,
    pub thumb: String,
    pub source: String,
    pub saved_at: String,
}
