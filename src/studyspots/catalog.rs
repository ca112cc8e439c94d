//! # Catalog Loading
//!
//! The catalog is two JSON arrays, `spots.json` and `malls.json`, produced
//! outside this crate. [`DataSource`] abstracts where they come from:
//!
//! - [`DirSource`]: reads both files from a data directory.
//! - [`StaticSource`]: serves records already in memory.
//!
//! A load failure (missing file, unreadable file, malformed JSON) is fatal for
//! the current render cycle and is returned as [`SpotsError::Load`]. Nothing is
//! retried and nothing is partially rendered.

use crate::error::{Result, SpotsError};
use crate::model::{ItemId, Mall, Spot};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// A named collection in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Spots,
    Malls,
}

impl Collection {
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Spots => "spots.json",
            Collection::Malls => "malls.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

pub trait DataSource {
    fn load_spots(&self) -> Result<Vec<Spot>>;
    fn load_malls(&self) -> Result<Vec<Mall>>;
}

/// Loads catalog files from a directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let path = self.dir.join(collection.file_name());
        let load_error = |reason: String| SpotsError::Load {
            collection: collection.to_string(),
            reason,
        };

        let content = fs::read_to_string(&path)
            .map_err(|e| load_error(format!("{}: {}", path.display(), e)))?;
        let records: Vec<T> = serde_json::from_str(&content).map_err(|e| load_error(e.to_string()))?;

        tracing::debug!(%collection, count = records.len(), "loaded catalog");
        Ok(records)
    }
}

impl DataSource for DirSource {
    fn load_spots(&self) -> Result<Vec<Spot>> {
        self.load(Collection::Spots)
    }

    fn load_malls(&self) -> Result<Vec<Mall>> {
        self.load(Collection::Malls)
    }
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub spots: Vec<Spot>,
    pub malls: Vec<Mall>,
}

impl StaticSource {
    pub fn new(spots: Vec<Spot>, malls: Vec<Mall>) -> Self {
        Self { spots, malls }
    }
}

impl DataSource for StaticSource {
    fn load_spots(&self) -> Result<Vec<Spot>> {
        Ok(self.spots.clone())
    }

    fn load_malls(&self) -> Result<Vec<Mall>> {
        Ok(self.malls.clone())
    }
}

/// Malls keyed by id.
pub fn mall_index(malls: &[Mall]) -> HashMap<ItemId, Mall> {
    malls.iter().map(|m| (m.id.clone(), m.clone())).collect()
}

/// The spots belonging to `mall_id`, in catalog order.
pub fn spots_in_mall(spots: &[Spot], mall_id: &ItemId) -> Vec<Spot> {
    spots
        .iter()
        .filter(|s| s.mall_id.as_ref() == Some(mall_id))
        .cloned()
        .collect()
}
