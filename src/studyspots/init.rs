//! # Context Initialization
//!
//! Resolves the two directories the application needs and wires the API.
//!
//! ## Storage Directory
//!
//! Holds `config.json`, view preferences and favorites.
//! 1. `STUDYSPOTS_HOME` environment variable (used by tests to isolate state).
//! 2. OS-appropriate data directory via the `directories` crate.
//!
//! ## Data Directory
//!
//! Holds the catalog (`spots.json`, `malls.json`), first match wins:
//! 1. Explicit override (the CLI's `--data`).
//! 2. `STUDYSPOTS_DATA` environment variable.
//! 3. `data_dir` from `config.json`.
//! 4. `./data` under the working directory.
//!
//! Relative paths resolve against the working directory.

use crate::api::SpotsApi;
use crate::catalog::DirSource;
use crate::config::SpotsConfig;
use crate::error::{Result, SpotsError};
use crate::store::fs_backend::FsBackend;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "STUDYSPOTS_HOME";
pub const DATA_ENV: &str = "STUDYSPOTS_DATA";

pub struct SpotsContext {
    pub api: SpotsApi<FsBackend, DirSource>,
    pub config: SpotsConfig,
    pub storage_dir: PathBuf,
    pub data_dir: PathBuf,
}

pub fn storage_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "studyspots", "studyspots")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SpotsError::Config("Could not determine a storage directory".to_string()))
}

/// Picks the catalog directory; see the module docs for precedence.
pub fn resolve_data_dir(
    cwd: &Path,
    data_override: Option<PathBuf>,
    env_value: Option<PathBuf>,
    config: &SpotsConfig,
) -> PathBuf {
    let chosen = data_override
        .or(env_value)
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(|| PathBuf::from("data"));
    if chosen.is_absolute() {
        chosen
    } else {
        cwd.join(chosen)
    }
}

/// Builds the application context. The catalog is not loaded yet.
pub fn initialize(cwd: &Path, data_override: Option<PathBuf>) -> Result<SpotsContext> {
    let storage_dir = storage_dir()?;

    let config = SpotsConfig::load(&storage_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config, using defaults");
        SpotsConfig::default()
    });

    let env_value = std::env::var_os(DATA_ENV).map(PathBuf::from);
    let data_dir = resolve_data_dir(cwd, data_override, env_value, &config);
    tracing::debug!(
        storage = %storage_dir.display(),
        data = %data_dir.display(),
        "resolved directories"
    );

    let api = SpotsApi::new(FsBackend::new(&storage_dir), DirSource::new(&data_dir));

    Ok(SpotsContext {
        api,
        config,
        storage_dir,
        data_dir,
    })
}
