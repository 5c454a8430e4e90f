//! Global calsync configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use calsync_core::{CalSyncError, CalSyncResult, MatchPolicy};

/// Configuration at ~/.config/calsync/config.toml
///
/// Everything is optional; a missing file means defaults.
#[derive(Serialize, Deserialize, Clone, Default)]
pub struct CalSyncConfig {
    /// Where the JSON store lives. Defaults to ~/.calsync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_dir: Option<PathBuf>,

    /// Match policy used when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<MatchPolicy>,
}

impl CalSyncConfig {
    pub fn config_path() -> CalSyncResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalSyncError::Config("Could not determine config directory".into()))?
            .join("calsync");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is absent.
    pub fn load() -> CalSyncResult<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| CalSyncError::Config(format!("{}: {}", path.display(), e)))
    }

    /// The store directory, explicit or defaulted.
    pub fn store_dir(&self) -> CalSyncResult<PathBuf> {
        if let Some(dir) = &self.store_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir()
            .ok_or_else(|| CalSyncError::Config("Could not determine home directory".into()))?;
        Ok(home.join(".calsync"))
    }

    /// Command-line policy wins over the configured default.
    pub fn policy(&self, override_policy: Option<MatchPolicy>) -> MatchPolicy {
        override_policy.or(self.default_policy).unwrap_or_default()
    }
}
