//! Runtime settings for the theme mode.
//!
//! Settings are plain data and deserialize from YAML or JSON, so hosts can ship
//! them alongside their palette. Every field has a default:
//!
//! ```yaml
//! default_mode: system     # used when nothing is persisted
//! fallback: light          # applied when the OS reports no scheme
//! storage_key: app-theme-mode
//! persist: true
//! require_storage: false
//! ```

use serde::{Deserialize, Serialize};
use shade_style::{ColorMode, ConfigError, ThemeMode};

use crate::storage::DEFAULT_STORAGE_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    pub default_mode: ThemeMode,
    pub fallback: ColorMode,
    pub storage_key: String,
    pub persist: bool,
    pub require_storage: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            default_mode: ThemeMode::System,
            fallback: ColorMode::Light,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            persist: true,
            require_storage: false,
        }
    }
}

impl ThemeSettings {
    /// Parses settings from YAML. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}
