//! Ambient access to the current theme.
//!
//! [`AppTheme::provide`] makes a theme current for the duration of a closure.
//! Code running inside it reaches the theme through the `use_*` accessors
//! instead of threading an `AppTheme` through every call. Providers nest; the
//! innermost one wins.
//!
//! Outside any provider every accessor fails with
//! [`ThemeError::OutsideProvider`], naming the accessor.
//!
//! ```rust
//! use std::rc::Rc;
//! use shade::{scope, AppTheme, ManualAppearance, ModeStore, ThemeConfig, ThemeMode};
//!
//! let config = ThemeConfig::from_yaml("colors: { light: { text: '#000' } }").unwrap();
//! let theme = AppTheme::builder(config)
//!     .store(ModeStore::new(ThemeMode::Light))
//!     .source(Rc::new(ManualAppearance::new(None)))
//!     .build()
//!     .unwrap();
//!
//! theme.provide(|| {
//!     let toggle = scope::use_toggle_theme_mode().unwrap();
//!     toggle();
//!     assert_eq!(scope::use_theme_mode().unwrap(), ThemeMode::Dark);
//! });
//!
//! assert!(scope::use_theme().is_err());
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use shade_style::ThemeMode;

use crate::error::ThemeError;
use crate::theme::{AppTheme, ResolvedTheme};

thread_local! {
    static PROVIDERS: RefCell<Vec<AppTheme>> = const { RefCell::new(Vec::new()) };
}

/// Pops the provider pushed by `provide`, also on unwind.
struct ProviderGuard;

impl Drop for ProviderGuard {
    fn drop(&mut self) {
        PROVIDERS.with(|providers| {
            providers.borrow_mut().pop();
        });
    }
}

impl AppTheme {
    /// Runs `f` with this theme as the current provider.
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        PROVIDERS.with(|providers| providers.borrow_mut().push(self.clone()));
        let _guard = ProviderGuard;
        f()
    }
}

fn current(accessor: &'static str) -> Result<AppTheme, ThemeError> {
    PROVIDERS
        .with(|providers| providers.borrow().last().cloned())
        .ok_or(ThemeError::OutsideProvider(accessor))
}

/// True inside [`AppTheme::provide`].
pub fn has_provider() -> bool {
    PROVIDERS.with(|providers| !providers.borrow().is_empty())
}

/// The innermost provided theme container.
pub fn use_app_theme() -> Result<AppTheme, ThemeError> {
    current("use_app_theme")
}

/// The current theme snapshot.
pub fn use_theme() -> Result<Rc<ResolvedTheme>, ThemeError> {
    current("use_theme").map(|theme| theme.theme())
}

/// The selected mode (not the effective one).
pub fn use_theme_mode() -> Result<ThemeMode, ThemeError> {
    current("use_theme_mode").map(|theme| theme.mode())
}

/// A setter bound to the current theme.
pub fn use_set_theme_mode() -> Result<impl Fn(ThemeMode), ThemeError> {
    let theme = current("use_set_theme_mode")?;
    Ok(move |mode| theme.set_mode(mode))
}

pub fn use_reset_theme_mode() -> Result<impl Fn(), ThemeError> {
    let theme = current("use_reset_theme_mode")?;
    Ok(move || theme.reset_mode())
}

pub fn use_toggle_theme_mode() -> Result<impl Fn(), ThemeError> {
    let theme = current("use_toggle_theme_mode")?;
    Ok(move || theme.toggle_mode())
}
