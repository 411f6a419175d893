//! User settings for splitbook
//!
//! Party display names, category / comment markers and display preferences.
//! Credentials for the ledger API never live here.

use serde::{Deserialize, Serialize};

use super::paths::SplitbookPaths;
use crate::error::SplitError;
use crate::models::{MarkerSet, Party};

/// User settings for splitbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Display name for party A
    #[serde(default = "default_party_a_name")]
    pub party_a_name: String,

    /// Display name for party B
    #[serde(default = "default_party_b_name")]
    pub party_b_name: String,

    /// Currency symbol for terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Marker tokens recognized in categories and comments
    #[serde(default)]
    pub markers: MarkerSet,
}

fn default_schema_version() -> u32 {
    1
}

fn default_party_a_name() -> String {
    "A".to_string()
}

fn default_party_b_name() -> String {
    "B".to_string()
}

fn default_currency() -> String {
    "¥".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            party_a_name: default_party_a_name(),
            party_b_name: default_party_b_name(),
            currency_symbol: default_currency(),
            markers: MarkerSet::default(),
        }
    }
}

impl Settings {
    /// Display name of a party
    pub fn party_name(&self, party: Party) -> &str {
        match party {
            Party::A => &self.party_a_name,
            Party::B => &self.party_b_name,
        }
    }

    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_default(paths: &SplitbookPaths) -> Result<Self, SplitError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SplitError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SplitError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SplitbookPaths) -> Result<(), SplitError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SplitError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SplitError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject marker sets the classifier cannot tell apart
    pub fn validate(&self) -> Result<(), SplitError> {
        let m = &self.markers;
        let tokens = [&m.self_marker, &m.party_a_marker, &m.party_b_marker];

        if tokens.iter().any(|t| t.is_empty()) {
            return Err(SplitError::Config("Marker tokens must not be empty".into()));
        }
        if tokens.iter().any(|t| t.contains(m.separator)) {
            return Err(SplitError::Config(format!(
                "Marker tokens must not contain the separator '{}'",
                m.separator
            )));
        }
        if m.self_marker == m.party_a_marker
            || m.self_marker == m.party_b_marker
            || m.party_a_marker == m.party_b_marker
        {
            return Err(SplitError::Config("Marker tokens must be distinct".into()));
        }
        if m.deferred_sentinel == m.paid_by_id_sentinel {
            return Err(SplitError::Config("Comment sentinels must be distinct".into()));
        }
        Ok(())
    }
}
