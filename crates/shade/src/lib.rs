//! # Shade - Light/Dark Theme Runtime
//!
//! `shade` keeps an application's theme mode (light, dark or follow the OS),
//! persists the user's choice, tracks the OS color scheme, and hands out theme
//! snapshots and derived styles that stay current as either changes.
//!
//! The stateless pieces (style resolution, dynamic colors, palettes and config
//! parsing) live in [`shade_style`] and are re-exported here.
//!
//! ## Architecture
//!
//! ```text
//!  AppearanceSource ──► AppearanceWatcher ──notify()──┐
//!                                                     ▼
//!  set_mode / toggle / reset ──────────────────► ModeStore ──► listeners
//!                                                     │          (Binding, host)
//!                                                     ▼
//!                             AppTheme::theme() ──► Rc<ResolvedTheme>
//!                                                     │
//!                                                     ▼
//!                                           ThemedStyleSheet cache
//! ```
//!
//! - [`ModeStore`]: the selected [`ThemeMode`] and its listeners, optionally
//!   persisted through a [`ModeStorage`] backend.
//! - [`AppearanceWatcher`]: nudges the store when the OS flips while the user
//!   follows the system.
//! - [`AppTheme`]: config + store + appearance, producing [`ResolvedTheme`]
//!   snapshots.
//! - [`Binding`]: a value derived from the theme that reports changes to the
//!   host.
//! - [`ThemedStyleSheet`]: style objects computed once per snapshot.
//! - [`scope`]: ambient access to the current theme inside
//!   [`AppTheme::provide`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use shade::{AppTheme, Binding, ColorMode, ManualAppearance, ModeStore, ThemeConfig, ThemeMode, ThemedStyle};
//!
//! let config = ThemeConfig::from_yaml(r##"
//! colors:
//!   light: { background: "#ffffff", text: "#111111" }
//!   dark: { background: "#121212", text: "#eeeeee" }
//! "##).unwrap();
//!
//! let os = ManualAppearance::new(Some(ColorMode::Light));
//! let theme = AppTheme::builder(config)
//!     .store(ModeStore::new(ThemeMode::System))
//!     .source(Rc::new(os.clone()))
//!     .build()
//!     .unwrap();
//!
//! let card = ThemedStyle::new()
//!     .set("backgroundColor", "#fff")
//!     .set("backgroundDark", "#000");
//! let card = Binding::style(&theme, card, || {}).unwrap();
//! assert_eq!(card.value().get_str("backgroundColor"), Some("#fff"));
//!
//! // The OS switches to dark while the user follows the system.
//! os.set_scheme(Some(ColorMode::Dark));
//! assert_eq!(card.value().get_str("backgroundColor"), Some("#000"));
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the `log` facade; no logger is installed. Warnings
//! about a degraded environment (no OS scheme, storage unavailable) are only
//! emitted in debug builds.

/// Warns through `log` in debug builds only.
macro_rules! dev_warn {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            log::warn!($($arg)*);
        }
    };
}

pub mod appearance;
pub mod binding;
pub mod error;
pub mod scope;
pub mod settings;
pub mod storage;
pub mod store;
pub mod stylesheet;
pub mod theme;
pub mod watcher;

pub use shade_style;
pub use shade_style::{
    build_complete_dark_palette, dynamic_color, dynamic_palette, is_dynamic_color_object,
    is_themed_style, is_truthy, resolve, try_resolve, AppearanceContext, Color, ColorMode,
    ConfigError, DynamicColor, InvalidColorInputError, InvalidModeError, NamedStyles,
    OverrideKey, Palette, PlainStyle, Platform, PlatformColor, StyleError, ThemeColors,
    ThemeConfig, ThemeMode, ThemedStyle, NEUTRAL_DEFAULT,
};

pub use appearance::{
    detect_color_mode, reset_theme_detector, set_theme_detector, AppearanceListener,
    AppearanceSource, ListenerId, ManualAppearance, OsAppearance,
};
pub use binding::Binding;
pub use error::{Result, StorageError, ThemeError};
pub use settings::ThemeSettings;
pub use storage::{
    FileStorage, MemoryStorage, ModeStorage, StorageChoice, DEFAULT_STORAGE_KEY,
};
pub use store::{ChangeCause, ModeChange, ModeStore, ModeStoreBuilder, Subscription};
pub use stylesheet::{create_themed_style_sheet, ThemedStyleSheet};
pub use theme::{AppTheme, AppThemeBuilder, ResolvedTheme, ThemeId, ThemePalette};
pub use watcher::AppearanceWatcher;
