//! Export configuration.
//!
//! Every setting has a compiled-in default, so a missing config file means
//! "export MOCA2024 exactly as published".
//!
//! ```toml
//! [firestore]
//! conference = "MOCA2024"
//! timeout_secs = 30
//!
//! [calendar]
//! time_zone = "Europe/Rome"
//! organizer_email = "info@olografix.org"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use htics_core::CalendarConfig;
use htics_firestore::FirestoreConfig;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Where to query.
    pub firestore: FirestoreSettings,

    /// Calendar-wide constants.
    pub calendar: CalendarConfig,
}

/// `[firestore]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirestoreSettings {
    pub base_url: String,
    pub project: String,
    pub database: String,
    pub conference: String,
    pub collection: String,
    /// Request timeout in seconds; unset keeps the transport default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for FirestoreSettings {
    fn default() -> Self {
        Self {
            base_url: FirestoreConfig::DEFAULT_BASE_URL.to_string(),
            project: FirestoreConfig::DEFAULT_PROJECT.to_string(),
            database: FirestoreConfig::DEFAULT_DATABASE.to_string(),
            conference: FirestoreConfig::DEFAULT_CONFERENCE.to_string(),
            collection: FirestoreConfig::DEFAULT_COLLECTION.to_string(),
            timeout_secs: None,
        }
    }
}

impl FirestoreSettings {
    /// Builds the client configuration, with `conference` (from the command
    /// line) taking precedence over the file.
    pub fn to_firestore_config(&self, conference: Option<&str>) -> ExportResult<FirestoreConfig> {
        let conference = conference.unwrap_or(&self.conference);
        if conference.trim().is_empty() {
            return Err(ExportError::Config(
                "firestore conference must not be empty".to_string(),
            ));
        }

        let mut config = FirestoreConfig::new(&self.base_url)
            .map_err(|e| {
                ExportError::Config(format!(
                    "invalid firestore base_url {:?}: {}",
                    self.base_url, e
                ))
            })?
            .with_project(&self.project)
            .with_database(&self.database)
            .with_conference(conference)
            .with_collection(&self.collection);

        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

impl ExportConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self, String> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
        toml::from_str(&content)
            .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("htics")
    }
}
