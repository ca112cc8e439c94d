//! # Storage Layer
//!
//! User state (view preferences, favorites) lives in a small persistent
//! key-value store. The [`StorageBackend`] trait abstracts that store so the
//! preference and favorites logic can run against a real directory or an
//! in-memory map.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one JSON file per key inside a storage
//!   directory. Writes go to a temp file and are renamed into place, so a
//!   reader never sees a partial value.
//! - [`mem_backend::MemBackend`]: in-memory map for tests, with switches to
//!   simulate failing writes or an unavailable store.
//!
//! ## Storage Layout
//!
//! ```text
//! ~/.local/share/studyspots/
//! ├── config.json                 # SpotsConfig
//! ├── studyspots_view_prefs.json  # {"columns": 3, "itemsPerPage": 30}
//! └── studyspots_favorites.json   # ["s-1", "s-7"]
//! ```
//!
//! Callers that treat storage as best-effort (see [`crate::prefs`] and
//! [`crate::favorites`]) swallow the errors returned here.

use crate::error::Result;

pub mod fs_backend;
pub mod mem_backend;

/// Raw string storage keyed by name.
///
/// All methods take `&self`; implementations use interior mutability where
/// needed since the application is single-threaded.
pub trait StorageBackend {
    /// Read the value stored under `key`.
    /// Returns Ok(None) when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic: a concurrent reader sees the old or the new value, never a mix.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
