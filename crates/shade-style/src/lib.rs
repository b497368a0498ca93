//! # Shade Style - Light/Dark Style Resolution
//!
//! `shade-style` is the stateless half of `shade`: it turns themed style
//! objects into plain ones for a given color mode, builds platform dynamic
//! colors, and validates theme palettes. It holds no global state; the mode
//! store, OS appearance tracking and caches live in the `shade` crate.
//!
//! ## Core Concepts
//!
//! - [`ThemeMode`]: user selection (light, dark, system)
//! - [`ColorMode`]: effective mode after resolving system
//! - [`ThemedStyle`]: a style object with dark-override keys
//! - [`resolve`]: themed style + color mode → [`PlainStyle`]
//! - [`PlatformColor`]: static or dynamic (light/dark pair) color
//! - [`ThemeConfig`]: light palette, partial dark palette, extra sections
//!
//! ## Quick Start
//!
//! ```rust
//! use shade_style::{resolve, ColorMode, ThemedStyle};
//! use serde_json::json;
//!
//! let style = ThemedStyle::new()
//!     .set("backgroundColor", "#fff")
//!     .set("backgroundDark", "#000")
//!     .set("color", "#000")
//!     .set("colorDark", "#fff");
//!
//! let light = resolve(&style, ColorMode::Light).unwrap();
//! assert_eq!(light.into_value(), json!({"backgroundColor": "#fff", "color": "#000"}));
//!
//! let dark = resolve(&style, ColorMode::Dark).unwrap();
//! assert_eq!(dark.into_value(), json!({"backgroundColor": "#000", "color": "#fff"}));
//! ```
//!
//! ## Palettes
//!
//! ```rust
//! use shade_style::ThemeConfig;
//!
//! let config = ThemeConfig::from_yaml(r##"
//! colors:
//!   light: { background: "#fff", text: "#000" }
//!   dark: { background: "#121212" }
//! "##).unwrap();
//!
//! let dark = config.complete_dark_palette();
//! assert_eq!(dark["background"], "#121212");
//! assert_eq!(dark["text"], "#000");
//! ```

mod color;
pub mod config;
pub mod dynamic;
pub mod mode;
mod palette;
pub mod style;

pub use color::Color;
pub use config::{ConfigError, ThemeColors, ThemeConfig};
pub use dynamic::{
    dynamic_color, dynamic_palette, is_dynamic_color_object, AppearanceContext, DynamicColor,
    InvalidColorInputError, Platform, PlatformColor, NEUTRAL_DEFAULT,
};
pub use mode::{ColorMode, InvalidModeError, ThemeMode};
pub use palette::{build_complete_dark_palette, Palette};
pub use style::{
    is_themed_style, is_truthy, resolve, try_resolve, NamedStyles, OverrideKey, PlainStyle,
    StyleError, ThemedStyle,
};
