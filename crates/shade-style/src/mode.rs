//! Theme modes and effective color modes.
//!
//! Two enums split the concern the same way the appearance layer does:
//!
//! - [`ThemeMode`]: what the user selected (`light`, `dark` or `system`).
//! - [`ColorMode`]: what is actually applied after `system` has been resolved
//!   against the OS-reported scheme.
//!
//! ```rust
//! use shade_style::{ColorMode, ThemeMode};
//!
//! let mode: ThemeMode = "system".parse().unwrap();
//! assert_eq!(mode.resolve(Some(ColorMode::Dark), ColorMode::Light), ColorMode::Dark);
//! assert_eq!(mode.resolve(None, ColorMode::Light), ColorMode::Light);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The effective color mode applied to styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light mode (light background, dark text).
    Light,
    /// Dark mode (dark background, light text).
    Dark,
}

impl ColorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ColorMode::Dark)
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ColorMode> for ThemeMode {
    fn from(mode: ColorMode) -> Self {
        match mode {
            ColorMode::Light => ThemeMode::Light,
            ColorMode::Dark => ThemeMode::Dark,
        }
    }
}

/// The user-selected theme mode.
///
/// `System` follows the OS appearance; the other two pin the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// All modes, in toggle order.
    pub const ALL: [ThemeMode; 3] = [ThemeMode::Light, ThemeMode::Dark, ThemeMode::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    /// The mode that follows this one when toggling: light, dark, system, light.
    pub fn next(&self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }

    /// Resolves this mode to the color mode that should be applied.
    ///
    /// Explicit modes win. `System` uses the OS scheme when known and
    /// `fallback` when the OS reports nothing.
    pub fn resolve(&self, os_scheme: Option<ColorMode>, fallback: ColorMode) -> ColorMode {
        match self {
            ThemeMode::Light => ColorMode::Light,
            ThemeMode::Dark => ColorMode::Dark,
            ThemeMode::System => os_scheme.unwrap_or(fallback),
        }
    }

    pub fn is_system(&self) -> bool {
        matches!(self, ThemeMode::System)
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a theme mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid theme mode '{value}' (expected light, dark or system)")]
pub struct InvalidModeError {
    pub value: String,
}

impl FromStr for ThemeMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "system" => Ok(ThemeMode::System),
            other => Err(InvalidModeError {
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for ColorMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ColorMode::Light),
            "dark" => Ok(ColorMode::Dark),
            other => Err(InvalidModeError {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_display() {
        for mode in ThemeMode::ALL {
            assert_eq!(mode.to_string().parse::<ThemeMode>().unwrap(), mode);
        }
    }

    #[test]
    fn test_parse_invalid_mode() {
        let err = "sepia".parse::<ThemeMode>().unwrap_err();
        assert_eq!(err.value, "sepia");
        assert!(err.to_string().contains("sepia"));
    }

    #[test]
    fn test_color_mode_rejects_system() {
        assert!("system".parse::<ColorMode>().is_err());
        assert_eq!("dark".parse::<ColorMode>().unwrap(), ColorMode::Dark);
    }

    #[test]
    fn test_next_cycles_through_all_modes() {
        assert_eq!(ThemeMode::Light.next(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.next(), ThemeMode::System);
        assert_eq!(ThemeMode::System.next(), ThemeMode::Light);
    }

    #[test]
    fn test_resolve_explicit_modes_ignore_os() {
        assert_eq!(
            ThemeMode::Light.resolve(Some(ColorMode::Dark), ColorMode::Dark),
            ColorMode::Light
        );
        assert_eq!(
            ThemeMode::Dark.resolve(Some(ColorMode::Light), ColorMode::Light),
            ColorMode::Dark
        );
    }

    #[test]
    fn test_resolve_system_uses_os_then_fallback() {
        assert_eq!(
            ThemeMode::System.resolve(Some(ColorMode::Dark), ColorMode::Light),
            ColorMode::Dark
        );
        assert_eq!(
            ThemeMode::System.resolve(None, ColorMode::Dark),
            ColorMode::Dark
        );
    }

    #[test]
    fn test_default_is_system() {
        assert_eq!(ThemeMode::default(), ThemeMode::System);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ThemeMode::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
        let mode: ThemeMode = serde_json::from_str("\"system\"").unwrap();
        assert_eq!(mode, ThemeMode::System);
    }
}
