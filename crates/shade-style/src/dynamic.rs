//! Platform dynamic colors.
//!
//! One platform family (iOS) can resolve a light/dark color pair itself at
//! render time, so a style holding such a pair never has to be re-resolved
//! when the appearance changes. Callers branch on [`Platform`] before taking
//! this path; everywhere else colors go through the ordinary style resolver.
//!
//! Instead of an opaque host token, the pair is modelled as a tagged value,
//! [`PlatformColor`], and resolved explicitly by [`PlatformColor::resolve`] or
//! handed to the host via [`PlatformColor::to_value`].
//!
//! ```rust
//! use shade_style::{dynamic_color, AppearanceContext, Color, ColorMode};
//!
//! let ink = dynamic_color(Some("#111".into()), Some("#eee".into()), None).unwrap();
//! assert_eq!(ink.resolve(&AppearanceContext::new(ColorMode::Dark)), &Color::from("#eee"));
//! assert_eq!(ink.resolve(&AppearanceContext::new(ColorMode::Light)), &Color::from("#111"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::Color;
use crate::mode::ColorMode;
use crate::palette::Palette;

/// Light color used when a dynamic color is built without one.
pub const NEUTRAL_DEFAULT: &str = "black";

const DYNAMIC_PROPERTIES: [&str; 4] = ["light", "dark", "highContrastLight", "highContrastDark"];

/// Error returned when a dynamic color has neither a light nor a dark value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("dynamic color needs at least a light or a dark value")]
pub struct InvalidColorInputError;

/// Target platform family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Ios,
    Android,
    Web,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub fn current() -> Platform {
        if cfg!(target_os = "ios") {
            Platform::Ios
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_family = "wasm") {
            Platform::Web
        } else {
            Platform::Other
        }
    }

    /// Only iOS resolves light/dark pairs natively.
    pub fn supports_dynamic_color(&self) -> bool {
        matches!(self, Platform::Ios)
    }
}

/// What the platform adapter knows when it resolves a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppearanceContext {
    pub mode: ColorMode,
    pub high_contrast: bool,
}

impl AppearanceContext {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            mode,
            high_contrast: false,
        }
    }

    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }
}

/// A light/dark color pair, with optional high-contrast variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicColor {
    pub light: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_contrast_light: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high_contrast_dark: Option<Color>,
}

impl DynamicColor {
    pub fn with_high_contrast(mut self, light: Option<Color>, dark: Option<Color>) -> Self {
        self.high_contrast_light = light;
        self.high_contrast_dark = dark;
        self
    }

    /// Picks the variant for the context. A missing dark value falls back to
    /// light, a missing high-contrast value to the regular one.
    pub fn resolve(&self, ctx: &AppearanceContext) -> &Color {
        let regular = match ctx.mode {
            ColorMode::Light => &self.light,
            ColorMode::Dark => self.dark.as_ref().unwrap_or(&self.light),
        };
        if !ctx.high_contrast {
            return regular;
        }
        let contrast = match ctx.mode {
            ColorMode::Light => self.high_contrast_light.as_ref(),
            ColorMode::Dark => self.high_contrast_dark.as_ref(),
        };
        contrast.unwrap_or(regular)
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("light".into(), self.light.clone().into());
        let optional = [
            ("dark", &self.dark),
            ("highContrastLight", &self.high_contrast_light),
            ("highContrastDark", &self.high_contrast_dark),
        ];
        for (name, color) in optional {
            if let Some(color) = color {
                map.insert(name.into(), color.clone().into());
            }
        }
        map
    }
}

/// A color usable as a style property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlatformColor {
    Static(Color),
    Dynamic {
        dynamic: DynamicColor,
    },
}

impl PlatformColor {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, PlatformColor::Dynamic { .. })
    }

    pub fn resolve(&self, ctx: &AppearanceContext) -> &Color {
        match self {
            PlatformColor::Static(color) => color,
            PlatformColor::Dynamic { dynamic } => dynamic.resolve(ctx),
        }
    }

    /// The value handed to the host style object: a plain string, or
    /// `{"dynamic": {"light": .., "dark": ..}}`.
    pub fn to_value(&self) -> Value {
        match self {
            PlatformColor::Static(color) => color.clone().into(),
            PlatformColor::Dynamic { dynamic } => {
                let mut outer = Map::new();
                outer.insert("dynamic".into(), Value::Object(dynamic.to_map()));
                Value::Object(outer)
            }
        }
    }
}

impl From<Color> for PlatformColor {
    fn from(color: Color) -> Self {
        PlatformColor::Static(color)
    }
}

impl From<DynamicColor> for PlatformColor {
    fn from(dynamic: DynamicColor) -> Self {
        PlatformColor::Dynamic { dynamic }
    }
}

/// Builds a dynamic color from a light/dark pair.
///
/// A missing or empty light value is replaced by `fallback`, or by
/// [`NEUTRAL_DEFAULT`] when the fallback is missing or empty too. The dark
/// value is passed through as given.
///
/// # Errors
///
/// Returns [`InvalidColorInputError`] if both `light` and `dark` are absent.
pub fn dynamic_color(
    light: Option<Color>,
    dark: Option<Color>,
    fallback: Option<Color>,
) -> Result<PlatformColor, InvalidColorInputError> {
    if light.is_none() && dark.is_none() {
        return Err(InvalidColorInputError);
    }
    let present = |c: &Color| !c.as_str().is_empty();
    let light = light
        .filter(present)
        .or_else(|| fallback.filter(present))
        .unwrap_or_else(|| Color::from(NEUTRAL_DEFAULT));
    Ok(PlatformColor::from(DynamicColor {
        light,
        dark,
        high_contrast_light: None,
        high_contrast_dark: None,
    }))
}

/// Returns true if the value is a host dynamic color object.
///
/// That is an object with a `dynamic` object holding at least one of
/// `light`, `dark`, `highContrastLight` or `highContrastDark`.
pub fn is_dynamic_color_object(value: &Value) -> bool {
    value
        .get("dynamic")
        .and_then(Value::as_object)
        .map(|inner| DYNAMIC_PROPERTIES.iter().any(|k| inner.contains_key(*k)))
        .unwrap_or(false)
}

/// One dynamic color per light palette key, pairing it with the complete
/// dark palette.
pub fn dynamic_palette(light: &Palette, complete_dark: &Palette) -> BTreeMap<String, PlatformColor> {
    light
        .iter()
        .map(|(name, light_color)| {
            let dynamic = DynamicColor {
                light: light_color.clone(),
                dark: complete_dark.get(name).cloned(),
                high_contrast_light: None,
                high_contrast_dark: None,
            };
            (name.clone(), PlatformColor::from(dynamic))
        })
        .collect()
}
