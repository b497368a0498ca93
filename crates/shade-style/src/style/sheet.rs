//! Named collections of styles.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::resolve::resolve_unchecked;
use super::value::{PlainStyle, ThemedStyle};
use crate::mode::ColorMode;

/// A named set of styles, some themed and some plain.
///
/// Unlike [`resolve`](crate::resolve), a sheet accepts plain entries and passes
/// them through unchanged.
///
/// ```rust
/// use shade_style::{ColorMode, NamedStyles, ThemedStyle};
///
/// let sheet = NamedStyles::new()
///     .add("title", ThemedStyle::new().set("color", "#000").set("colorDark", "#fff"))
///     .add("spacer", ThemedStyle::new().set("height", 8));
///
/// let dark = sheet.resolve(ColorMode::Dark);
/// assert_eq!(dark["title"].get_str("color"), Some("#fff"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamedStyles(BTreeMap<String, ThemedStyle>);

impl NamedStyles {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn add(mut self, name: &str, style: ThemedStyle) -> Self {
        self.0.insert(name.to_string(), style);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ThemedStyle> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of entries that carry override keys.
    pub fn themed_names(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, style)| style.is_themed())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Resolves every entry for the given mode.
    pub fn resolve(&self, mode: ColorMode) -> BTreeMap<String, PlainStyle> {
        self.0
            .iter()
            .map(|(name, style)| (name.clone(), resolve_unchecked(style, mode)))
            .collect()
    }
}
