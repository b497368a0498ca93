//! Color palettes.

use std::collections::BTreeMap;

use crate::color::Color;

/// Palette of named colors (`"background" → "#fff"`).
pub type Palette = BTreeMap<String, Color>;

/// Derives the complete dark palette: `light` overlaid by `dark`.
///
/// Without dark overrides the light palette is returned as is. Dark values
/// win on key collisions.
///
/// ```rust
/// use shade_style::{build_complete_dark_palette, Color, Palette};
///
/// let light: Palette = [
///     ("bg".to_string(), Color::from("#fff")),
///     ("accent".to_string(), Color::from("#f0c029")),
/// ].into();
/// let dark: Palette = [("bg".to_string(), Color::from("#121212"))].into();
///
/// let complete = build_complete_dark_palette(&light, Some(&dark));
/// assert_eq!(complete["bg"], "#121212");
/// assert_eq!(complete["accent"], "#f0c029");
/// ```
pub fn build_complete_dark_palette(light: &Palette, dark: Option<&Palette>) -> Palette {
    let mut complete = light.clone();
    if let Some(dark) = dark {
        complete.extend(dark.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    complete
}
