//! Theme configuration.
//!
//! A theme config carries a complete light palette, an optional partial dark
//! palette and any number of extra sections (spacing, fonts, …) that are
//! passed through untouched.
//!
//! ```yaml
//! colors:
//!   light:
//!     background: "#fff"
//!     text: "#000"
//!   dark:
//!     background: "#121212"   # overrides light
//! spacing:
//!   small: 8
//! ```
//!
//! Every dark key must also exist in the light palette. Anything else is a
//! configuration error reported at setup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::palette::{build_complete_dark_palette, Palette};
use crate::style::json_kind;

/// Error returned when a theme config is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("theme config must be a mapping, found {found}")]
    NotAMapping { found: &'static str },

    #[error("theme config must include a 'colors' mapping")]
    MissingColors,

    #[error("theme 'colors' must be a mapping, found {found}")]
    ColorsNotMapping { found: &'static str },

    #[error("theme colors must include 'light' colors")]
    MissingLight,

    #[error(
        "dark theme contains keys not present in light theme: {}",
        keys.join(", ")
    )]
    InvalidDarkKeys { keys: Vec<String> },

    #[error("failed to parse theme config: {message}")]
    Parse { message: String },

    #[error("failed to load theme config {}: {message}", path.display())]
    Load { path: PathBuf, message: String },
}

/// The light and dark palettes of a theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub light: Palette,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<Palette>,
}

/// A user-supplied theme config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub colors: ThemeColors,
    /// Non-color sections, exposed as-is on every resolved theme.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ThemeConfig {
    /// Creates and validates a config from palettes.
    pub fn new(light: Palette, dark: Option<Palette>) -> Result<Self, ConfigError> {
        let config = Self {
            colors: ThemeColors { light, dark },
            extra: Map::new(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Adds an extra section, returning `self` for chaining.
    pub fn with_section(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(name.to_string(), value.into());
        self
    }

    /// Builds a config from an untyped value, checking its shape first.
    ///
    /// # Errors
    ///
    /// Shape errors (`colors` missing or not a mapping, `light` missing) are
    /// reported before type errors; dark keys absent from light are reported
    /// as [`ConfigError::InvalidDarkKeys`].
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let root = value.as_object().ok_or(ConfigError::NotAMapping {
            found: json_kind(&value),
        })?;
        let colors = match root.get("colors") {
            None | Some(Value::Null) => return Err(ConfigError::MissingColors),
            Some(colors) => colors.as_object().ok_or(ConfigError::ColorsNotMapping {
                found: json_kind(colors),
            })?,
        };
        if matches!(colors.get("light"), None | Some(Value::Null)) {
            return Err(ConfigError::MissingLight);
        }

        let config: ThemeConfig = serde_json::from_value(value).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a config from YAML (or JSON, which YAML accepts).
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::from_value(value)
    }

    /// Loads a config from a YAML or JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_yaml(&content)
    }

    /// Checks that every dark key also exists in the light palette.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(dark) = &self.colors.dark else {
            return Ok(());
        };
        let keys: Vec<String> = dark
            .keys()
            .filter(|key| !self.colors.light.contains_key(*key))
            .cloned()
            .collect();
        if keys.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidDarkKeys { keys })
        }
    }

    pub fn light(&self) -> &Palette {
        &self.colors.light
    }

    pub fn dark(&self) -> Option<&Palette> {
        self.colors.dark.as_ref()
    }

    /// The light palette overlaid by the dark overrides.
    pub fn complete_dark_palette(&self) -> Palette {
        build_complete_dark_palette(&self.colors.light, self.colors.dark.as_ref())
    }
}
