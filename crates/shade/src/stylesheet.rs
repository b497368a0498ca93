//! Theme-dependent style sheets, computed once per theme snapshot.
//!
//! ```rust
//! use std::rc::Rc;
//! use shade::{create_themed_style_sheet, AppTheme, ManualAppearance, ModeStore, ThemeConfig, ThemeMode};
//!
//! let config = ThemeConfig::from_yaml("colors: { light: { text: '#000' } }").unwrap();
//! let theme = AppTheme::builder(config)
//!     .store(ModeStore::new(ThemeMode::Light))
//!     .source(Rc::new(ManualAppearance::new(None)))
//!     .build()
//!     .unwrap();
//!
//! let sheet = create_themed_style_sheet(|t| t.color_value("text"));
//! let a = sheet.use_styles(&theme);
//! let b = sheet.use_styles(&theme);
//! assert!(Rc::ptr_eq(&a, &b));
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::theme::{AppTheme, ResolvedTheme, ThemeId};

struct CacheEntry<S> {
    id: ThemeId,
    theme: Weak<ResolvedTheme>,
    styles: Rc<S>,
}

/// Caches the output of a style function per [`ResolvedTheme`].
///
/// Entries are keyed by [`ThemeId`] and dropped once their theme snapshot is
/// gone.
pub struct ThemedStyleSheet<S> {
    style_fn: Box<dyn Fn(&ResolvedTheme) -> S>,
    cache: RefCell<Vec<CacheEntry<S>>>,
}

/// Wraps `style_fn` in a per-theme cache.
pub fn create_themed_style_sheet<S, F>(style_fn: F) -> ThemedStyleSheet<S>
where
    F: Fn(&ResolvedTheme) -> S + 'static,
{
    ThemedStyleSheet {
        style_fn: Box::new(style_fn),
        cache: RefCell::new(Vec::new()),
    }
}

impl<S> ThemedStyleSheet<S> {
    /// The styles for `theme`, computing them on first use.
    pub fn get(&self, theme: &Rc<ResolvedTheme>) -> Rc<S> {
        let id = theme.id();
        {
            let mut cache = self.cache.borrow_mut();
            cache.retain(|entry| entry.theme.strong_count() > 0);
            if let Some(entry) = cache.iter().find(|entry| entry.id == id) {
                return entry.styles.clone();
            }
        }

        // Borrow released: style_fn may use other sheets, or this one.
        let styles = Rc::new((self.style_fn)(theme.as_ref()));
        self.cache.borrow_mut().push(CacheEntry {
            id,
            theme: Rc::downgrade(theme),
            styles: styles.clone(),
        });
        styles
    }

    /// The styles for the theme's current snapshot.
    pub fn use_styles(&self, theme: &AppTheme) -> Rc<S> {
        self.get(&theme.theme())
    }

    /// Number of live cache entries.
    pub fn cached_len(&self) -> usize {
        self.cache
            .borrow()
            .iter()
            .filter(|entry| entry.theme.strong_count() > 0)
            .count()
    }
}

impl<S> fmt::Debug for ThemedStyleSheet<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemedStyleSheet")
            .field("cached", &self.cached_len())
            .finish()
    }
}
