//! Hashing settings management
//!
//! Stores the work factor in a plain JSON file so it can be tuned without a
//! rebuild. A missing or unreadable file falls back to defaults.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::crypto::{validate_cost, BcryptHasher, DEFAULT_COST};
use crate::error::{HashError, Result};

/// Settings file version this build reads and writes
pub const SETTINGS_VERSION: u32 = 1;

/// Hashing settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HashSettings {
    /// Settings file version
    pub version: u32,
    /// bcrypt work factor for new hashes
    pub cost: u32,
}

impl Default for HashSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            cost: DEFAULT_COST,
        }
    }
}

impl HashSettings {
    /// Build a hasher from these settings
    pub fn hasher(&self) -> Result<BcryptHasher> {
        BcryptHasher::new(self.cost)
    }
}

/// Settings manager
pub struct SettingsManager {
    settings_file: PathBuf,
    settings: HashSettings,
}

impl SettingsManager {
    /// Create a settings manager for the given directory
    pub fn new(settings_dir: &Path) -> Self {
        let settings_file = settings_dir.join("settings.json");
        let settings = Self::load_from_file(&settings_file).unwrap_or_else(|e| {
            warn!("Ignoring unreadable settings file {:?}: {}", settings_file, e);
            HashSettings::default()
        });

        Self {
            settings_file,
            settings,
        }
    }

    /// Default settings directory for this platform
    pub fn default_dir() -> Result<PathBuf> {
        ProjectDirs::from("com", "symbia-labs", "passhash")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| {
                HashError::SettingsError("Could not determine config directory".to_string())
            })
    }

    fn load_from_file(path: &Path) -> Result<HashSettings> {
        if !path.exists() {
            debug!("No settings file found, using defaults");
            return Ok(HashSettings::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let settings: HashSettings = serde_json::from_str(&contents)?;
        if settings.version != SETTINGS_VERSION {
            return Err(HashError::SettingsError(format!(
                "Unsupported settings version {} (expected {})",
                settings.version, SETTINGS_VERSION
            )));
        }
        debug!("Loaded settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to file
    pub async fn save(&self) -> Result<()> {
        validate_cost(self.settings.cost)?;

        if let Some(parent) = self.settings_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = serde_json::to_string_pretty(&self.settings)?;

        // Write atomically using temp file
        let temp_path = self.settings_file.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents).await?;
        tokio::fs::rename(&temp_path, &self.settings_file).await?;

        debug!("Saved settings to {:?}", self.settings_file);
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &HashSettings {
        &self.settings
    }

    /// Get the configured work factor
    pub fn get_cost(&self) -> u32 {
        self.settings.cost
    }

    /// Set the work factor and save
    pub async fn set_cost(&mut self, cost: u32) -> Result<()> {
        self.settings.cost = validate_cost(cost)?;
        self.save().await
    }

    /// Hasher using the configured work factor
    pub fn hasher(&self) -> Result<BcryptHasher> {
        self.settings.hasher()
    }

    /// Reset settings to defaults and delete settings file
    pub async fn reset(&mut self) -> Result<()> {
        self.settings = HashSettings::default();

        if self.settings_file.exists() {
            tokio::fs::remove_file(&self.settings_file)
                .await
                .map_err(|e| HashError::SettingsError(e.to_string()))?;
        }

        Ok(())
    }
}
