//! # Favorites
//!
//! A persisted set of item ids stored as a JSON array under
//! [`FAVORITES_KEY`]. Every view that renders cards consults it, and any view
//! may toggle membership.
//!
//! There is no cached copy: each call reads the stored array, and `toggle`
//! writes the whole array back in one atomic replacement. Two sets built over
//! the same backend therefore always agree. Concurrent writers in separate
//! processes can still lose an update; that race is accepted.
//!
//! Storage trouble never surfaces. An unreadable array reads as empty and a
//! failed write is logged and dropped.

use crate::model::{ItemId, Listing};
use crate::store::StorageBackend;

pub const FAVORITES_KEY: &str = "studyspots_favorites";

pub struct FavoritesSet<S: StorageBackend> {
    backend: S,
}

impl<S: StorageBackend> FavoritesSet<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Stored ids in insertion order, duplicates dropped.
    pub fn ids(&self) -> Vec<ItemId> {
        let raw = match self.backend.read(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read favorites");
                return Vec::new();
            }
        };
        let ids: Vec<ItemId> = match serde_json::from_str(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring corrupt favorites record");
                return Vec::new();
            }
        };

        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        unique
    }

    pub fn is_favorite(&self, id: &ItemId) -> bool {
        self.ids().contains(id)
    }

    /// Flips membership of `id` and returns the new state (`true` = favorite).
    pub fn toggle(&self, id: &ItemId) -> bool {
        let mut ids = self.ids();
        let now_favorite = match ids.iter().position(|existing| existing == id) {
            Some(idx) => {
                ids.remove(idx);
                false
            }
            None => {
                ids.push(id.clone());
                true
            }
        };
        self.save(&ids);
        tracing::debug!(%id, favorite = now_favorite, "toggled favorite");
        now_favorite
    }

    /// The members of `items`, in catalog order.
    pub fn favorites_of<T: Listing + Clone>(&self, items: &[T]) -> Vec<T> {
        let ids = self.ids();
        items
            .iter()
            .filter(|item| ids.contains(item.id()))
            .cloned()
            .collect()
    }

    fn save(&self, ids: &[ItemId]) {
        let result = serde_json::to_string(ids)
            .map_err(Into::into)
            .and_then(|raw| self.backend.write(FAVORITES_KEY, &raw));
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not save favorites");
        }
    }
}
