//! The application theme container.
//!
//! [`AppTheme`] ties a validated [`ThemeConfig`] to a [`ModeStore`] and an
//! [`AppearanceSource`], and hands out [`ResolvedTheme`] snapshots: the palette
//! for the current effective mode plus the config's extra sections.
//!
//! ## Identity
//!
//! [`AppTheme::theme`] returns the same `Rc` until the effective mode or the
//! palette kind changes. Every new snapshot gets a fresh [`ThemeId`], which the
//! style-sheet cache keys on.
//!
//! ## Dynamic Palettes
//!
//! On platforms that resolve light/dark pairs natively (see
//! [`Platform::supports_dynamic_color`]), a `System` selection produces a
//! palette of [`PlatformColor::Dynamic`] tokens instead of concrete colors, so
//! the host can follow the OS without re-rendering. Explicit selections always
//! use concrete colors.
//!
//! ```rust
//! use std::rc::Rc;
//! use shade::{AppTheme, ColorMode, ManualAppearance, ModeStore, ThemeConfig, ThemeMode};
//!
//! let config = ThemeConfig::from_yaml(r##"
//! colors:
//!   light: { background: "#fff", text: "#000" }
//!   dark: { background: "#121212" }
//! "##).unwrap();
//!
//! let theme = AppTheme::builder(config)
//!     .store(ModeStore::new(ThemeMode::System))
//!     .source(Rc::new(ManualAppearance::new(Some(ColorMode::Dark))))
//!     .build()
//!     .unwrap();
//!
//! let resolved = theme.theme();
//! assert_eq!(resolved.color_mode(), ColorMode::Dark);
//! assert_eq!(resolved.color("background").unwrap().to_value(), "#121212");
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde_json::{Map, Value};
use shade_style::{
    dynamic_palette, ColorMode, InvalidModeError, Palette, Platform, PlatformColor, ThemeConfig,
    ThemeMode,
};

use crate::appearance::{AppearanceSource, OsAppearance};
use crate::error::ThemeError;
use crate::settings::ThemeSettings;
use crate::storage::StorageChoice;
use crate::store::{ModeChange, ModeStore, Subscription};
use crate::watcher::AppearanceWatcher;

static NEXT_THEME_ID: AtomicU64 = AtomicU64::new(1);
static THEME_CREATED: AtomicBool = AtomicBool::new(false);

/// Identity of a [`ResolvedTheme`] snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThemeId(u64);

impl ThemeId {
    fn next() -> Self {
        ThemeId(NEXT_THEME_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The colors of a resolved theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemePalette {
    /// Concrete colors for one mode.
    Static(Palette),
    /// Light/dark pairs the platform resolves at render time.
    Dynamic(BTreeMap<String, PlatformColor>),
}

impl ThemePalette {
    pub fn is_dynamic(&self) -> bool {
        matches!(self, ThemePalette::Dynamic(_))
    }

    pub fn get(&self, name: &str) -> Option<PlatformColor> {
        match self {
            ThemePalette::Static(palette) => palette.get(name).cloned().map(PlatformColor::from),
            ThemePalette::Dynamic(tokens) => tokens.get(name).cloned(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        match self {
            ThemePalette::Static(palette) => palette.keys().map(String::as_str).collect(),
            ThemePalette::Dynamic(tokens) => tokens.keys().map(String::as_str).collect(),
        }
    }
}

/// A theme snapshot for one effective mode.
#[derive(Debug)]
pub struct ResolvedTheme {
    id: ThemeId,
    color_mode: ColorMode,
    colors: ThemePalette,
    extra: Rc<Map<String, Value>>,
}

impl ResolvedTheme {
    pub fn id(&self) -> ThemeId {
        self.id
    }

    /// The effective mode this snapshot was resolved for.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn is_dark(&self) -> bool {
        self.color_mode.is_dark()
    }

    pub fn colors(&self) -> &ThemePalette {
        &self.colors
    }

    pub fn color(&self, name: &str) -> Option<PlatformColor> {
        self.colors.get(name)
    }

    /// The color as a host style value.
    pub fn color_value(&self, name: &str) -> Option<Value> {
        self.color(name).map(|color| color.to_value())
    }

    /// A non-color config section.
    pub fn section(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}

struct ThemeInner {
    light: Palette,
    dark: Palette,
    extra: Rc<Map<String, Value>>,
    store: ModeStore,
    watcher: AppearanceWatcher,
    fallback: ColorMode,
    platform: Platform,
    current: RefCell<Option<Rc<ResolvedTheme>>>,
}

/// The theme container. Clones share state.
#[derive(Clone)]
pub struct AppTheme {
    inner: Rc<ThemeInner>,
}

impl AppTheme {
    /// Creates a theme with default settings: persisted mode in the platform
    /// config directory and OS appearance detection.
    pub fn new(config: ThemeConfig) -> Result<Self, ThemeError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ThemeConfig) -> AppThemeBuilder {
        AppThemeBuilder::new(config)
    }

    /// The snapshot for the current effective mode.
    pub fn theme(&self) -> Rc<ResolvedTheme> {
        let color_mode = self.effective_mode();
        let dynamic = self.uses_dynamic_colors();

        let mut current = self.inner.current.borrow_mut();
        if let Some(theme) = current.as_ref() {
            if theme.color_mode == color_mode && theme.colors.is_dynamic() == dynamic {
                return theme.clone();
            }
        }

        let colors = if dynamic {
            ThemePalette::Dynamic(dynamic_palette(&self.inner.light, &self.inner.dark))
        } else {
            let palette = match color_mode {
                ColorMode::Light => &self.inner.light,
                ColorMode::Dark => &self.inner.dark,
            };
            ThemePalette::Static(palette.clone())
        };
        let theme = Rc::new(ResolvedTheme {
            id: ThemeId::next(),
            color_mode,
            colors,
            extra: self.inner.extra.clone(),
        });
        log::debug!("resolved theme {:?} ({})", theme.id, color_mode);
        *current = Some(theme.clone());
        theme
    }

    pub fn mode(&self) -> ThemeMode {
        self.inner.store.get()
    }

    pub fn set_mode(&self, mode: ThemeMode) {
        self.inner.store.switch(mode);
    }

    pub fn set_mode_named(&self, name: &str) -> Result<(), InvalidModeError> {
        self.inner.store.switch_named(name)
    }

    pub fn reset_mode(&self) {
        self.inner.store.reset();
    }

    pub fn toggle_mode(&self) {
        self.inner.store.toggle();
    }

    pub fn effective_mode(&self) -> ColorMode {
        self.inner.watcher.effective_mode(self.inner.fallback)
    }

    /// Subscribes to mode changes, including OS-driven nudges.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ModeChange) + 'static,
    {
        self.inner.store.subscribe(listener)
    }

    pub fn store(&self) -> &ModeStore {
        &self.inner.store
    }

    pub fn platform(&self) -> Platform {
        self.inner.platform
    }

    pub fn fallback(&self) -> ColorMode {
        self.inner.fallback
    }

    /// The light palette, or the complete dark palette.
    pub fn palette(&self, mode: ColorMode) -> &Palette {
        match mode {
            ColorMode::Light => &self.inner.light,
            ColorMode::Dark => &self.inner.dark,
        }
    }

    pub fn uses_dynamic_colors(&self) -> bool {
        self.inner.platform.supports_dynamic_color() && self.mode().is_system()
    }

    pub(crate) fn downgrade(&self) -> WeakAppTheme {
        WeakAppTheme(Rc::downgrade(&self.inner))
    }
}

impl fmt::Debug for AppTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppTheme")
            .field("mode", &self.mode())
            .field("effective", &self.effective_mode())
            .field("platform", &self.inner.platform)
            .finish()
    }
}

/// Non-owning handle, held by bindings so they do not keep the theme alive.
#[derive(Clone)]
pub(crate) struct WeakAppTheme(Weak<ThemeInner>);

impl WeakAppTheme {
    pub(crate) fn upgrade(&self) -> Option<AppTheme> {
        self.0.upgrade().map(|inner| AppTheme { inner })
    }
}

/// Builder for [`AppTheme`].
pub struct AppThemeBuilder {
    config: ThemeConfig,
    settings: ThemeSettings,
    store: Option<ModeStore>,
    storage: Option<StorageChoice>,
    source: Option<Rc<dyn AppearanceSource>>,
    fallback: Option<ColorMode>,
    platform: Option<Platform>,
}

impl AppThemeBuilder {
    pub fn new(config: ThemeConfig) -> Self {
        Self {
            config,
            settings: ThemeSettings::default(),
            store: None,
            storage: None,
            source: None,
            fallback: None,
            platform: None,
        }
    }

    /// Settings for the store built when none is given, and the fallback.
    pub fn settings(mut self, settings: ThemeSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Uses an existing store. Settings and storage are then ignored for it.
    pub fn store(mut self, store: ModeStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Backend for the store built when none is given.
    pub fn storage(mut self, storage: StorageChoice) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn source(mut self, source: Rc<dyn AppearanceSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn fallback(mut self, fallback: ColorMode) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Validates the config and starts watching the appearance source.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Config`] for an invalid config, or a storage
    /// error from building the default store.
    pub fn build(self) -> Result<AppTheme, ThemeError> {
        self.config.validate()?;

        let store = match self.store {
            Some(store) => store,
            None => ModeStore::builder()
                .settings(&self.settings)
                .storage(self.storage.unwrap_or(StorageChoice::Default))
                .build()?,
        };
        let source = self
            .source
            .unwrap_or_else(|| Rc::new(OsAppearance::new()));
        let fallback = self.fallback.unwrap_or(self.settings.fallback);
        let platform = self.platform.unwrap_or_else(Platform::current);

        if THEME_CREATED.swap(true, Ordering::Relaxed) {
            dev_warn!("more than one AppTheme created; modes may diverge between them");
        }

        let watcher = AppearanceWatcher::new(store.clone(), source);
        let dark = self.config.complete_dark_palette();
        let ThemeConfig { colors, extra } = self.config;
        log::debug!(
            "theme ready ({} colors, mode {}, platform {:?})",
            colors.light.len(),
            store.get(),
            platform
        );

        Ok(AppTheme {
            inner: Rc::new(ThemeInner {
                light: colors.light,
                dark,
                extra: Rc::new(extra),
                store,
                watcher,
                fallback,
                platform,
                current: RefCell::new(None),
            }),
        })
    }
}

impl fmt::Debug for AppThemeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppThemeBuilder")
            .field("settings", &self.settings)
            .field("fallback", &self.fallback)
            .field("platform", &self.platform)
            .finish()
    }
}
