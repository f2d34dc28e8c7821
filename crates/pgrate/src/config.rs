//! JSON configuration profiles.
//!
//! A profile named `local` lives at `./config/local.json`, relative to the
//! project root. Profiles are authored as CUE under `./config/cue/` and
//! exported to JSON with `pgrate gen-config` (see [`crate::cue`]); the CUE
//! schema enforces the field constraints (non-empty strings, non-zero
//! port), so the loader here only surfaces IO and decode failures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Directory holding the JSON config profiles, relative to the project root.
pub const CONFIG_DIR: &str = "./config";

/// Database connection settings for a profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub search_path: String,
}

/// Settings under the profile's `config` key.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub database: DatabaseConfig,
    /// Base directory holding the `up/` and `down/` script subdirectories.
    pub migration_scripts_dir: String,
}

/// A loaded configuration profile.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub config: Config,
}

impl ConfigFile {
    /// Load a profile from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let bytes = fs::read(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Path of the JSON config file for a profile, relative to the project root.
#[must_use]
pub fn config_file_path(profile: &str) -> PathBuf {
    PathBuf::from(format!("{CONFIG_DIR}/{profile}.json"))
}
