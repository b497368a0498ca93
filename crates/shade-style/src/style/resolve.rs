//! Light/dark resolution of themed styles.
//!
//! Resolution partitions the style's keys into override keys and pass-through
//! keys. Pass-through keys are always copied. In light mode override keys are
//! dropped; in dark mode each override with a truthy value is written onto its
//! base property, replacing whatever the base held.
//!
//! ```rust
//! use shade_style::{resolve, ColorMode, ThemedStyle};
//!
//! let style = ThemedStyle::new()
//!     .set("backgroundColor", "#fff")
//!     .set("backgroundDark", "#000");
//!
//! let dark = resolve(&style, ColorMode::Dark).unwrap();
//! assert_eq!(dark.get_str("backgroundColor"), Some("#000"));
//! assert!(!dark.contains_key("backgroundDark"));
//! ```

use super::error::StyleError;
use super::keys::OverrideKey;
use super::value::{is_truthy, PlainStyle, ThemedStyle};
use crate::mode::ColorMode;

/// Returns true if the style carries at least one dark-override key.
pub fn is_themed_style(style: &ThemedStyle) -> bool {
    style.is_themed()
}

/// Resolves a themed style for the given color mode.
///
/// # Errors
///
/// Returns [`StyleError::NotThemed`] if the style has no override keys.
/// Plain styles are a usage mistake here, not something to pass through.
pub fn resolve(style: &ThemedStyle, mode: ColorMode) -> Result<PlainStyle, StyleError> {
    if !style.is_themed() {
        return Err(StyleError::NotThemed);
    }
    Ok(resolve_unchecked(style, mode))
}

/// Like [`resolve`], but logs and returns `None` for unthemed input.
pub fn try_resolve(style: &ThemedStyle, mode: ColorMode) -> Option<PlainStyle> {
    match resolve(style, mode) {
        Ok(resolved) => Some(resolved),
        Err(err) => {
            log::error!("theming error: {}", err);
            None
        }
    }
}

/// Resolution without the themed-shape guard.
pub(crate) fn resolve_unchecked(style: &ThemedStyle, mode: ColorMode) -> PlainStyle {
    let mut output = PlainStyle::new();

    for (name, value) in style.iter() {
        if !OverrideKey::is_override(name) {
            output.insert(name, value.clone());
        }
    }

    if mode == ColorMode::Dark {
        for key in OverrideKey::ALL {
            if let Some(value) = style.get(key.key()).filter(|v| is_truthy(v)) {
                output.insert(key.base(), value.clone());
            }
        }
    }

    output
}
