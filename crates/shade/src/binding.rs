//! Reactive values derived from the theme.
//!
//! A [`Binding`] re-runs a resolver whenever the mode store notifies and calls
//! the host's `on_update` callback when the result actually changed. The
//! callback is the host's "schedule a re-render" hook; the binding never
//! renders anything itself.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use shade::{AppTheme, Binding, ManualAppearance, ModeStore, ThemeConfig, ThemeMode};
//!
//! let config = ThemeConfig::from_yaml("colors: { light: { text: '#000' }, dark: { text: '#fff' } }").unwrap();
//! let theme = AppTheme::builder(config)
//!     .store(ModeStore::new(ThemeMode::Light))
//!     .source(Rc::new(ManualAppearance::new(None)))
//!     .build()
//!     .unwrap();
//!
//! let renders = Rc::new(Cell::new(0));
//! let counter = renders.clone();
//! let text = Binding::mount(
//!     &theme,
//!     |t| t.color_value("text"),
//!     move || counter.set(counter.get() + 1),
//! );
//!
//! theme.set_mode(ThemeMode::Dark);
//! assert_eq!(renders.get(), 1);
//! assert_eq!(text.value(), Some(serde_json::json!("#fff")));
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use shade_style::{is_themed_style, resolve, ColorMode, PlainStyle, StyleError, ThemedStyle};

use crate::store::Subscription;
use crate::theme::{AppTheme, ResolvedTheme};

struct BindingState<T> {
    value: RefCell<T>,
    disposed: Cell<bool>,
}

/// A theme-derived value kept current by store notifications.
///
/// Unmounted explicitly with [`unmount`](Self::unmount) or on drop. After
/// that `on_update` is never called again, even from a notification already
/// being dispatched.
pub struct Binding<T> {
    state: Rc<BindingState<T>>,
    subscription: Option<Subscription>,
}

impl<T> Binding<T>
where
    T: PartialEq + Clone + 'static,
{
    /// Resolves the initial value and subscribes to the theme's store.
    pub fn mount<R, U>(theme: &AppTheme, resolver: R, on_update: U) -> Self
    where
        R: Fn(&ResolvedTheme) -> T + 'static,
        U: Fn() + 'static,
    {
        let state = Rc::new(BindingState {
            value: RefCell::new(resolver(&*theme.theme())),
            disposed: Cell::new(false),
        });

        let subscription = {
            let state = state.clone();
            let weak = theme.downgrade();
            theme.subscribe(move |_| {
                if state.disposed.get() {
                    return;
                }
                let Some(theme) = weak.upgrade() else {
                    return;
                };
                let next = resolver(&*theme.theme());
                if state.disposed.get() {
                    return;
                }
                let changed = *state.value.borrow() != next;
                if changed {
                    *state.value.borrow_mut() = next;
                    on_update();
                }
            })
        };

        Self {
            state,
            subscription: Some(subscription),
        }
    }

    pub fn value(&self) -> T {
        self.state.value.borrow().clone()
    }
}

impl<T> Binding<T> {
    /// Stops tracking. Safe to call more than once.
    pub fn unmount(&mut self) {
        self.state.disposed.set(true);
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.state.disposed.get()
    }
}

impl Binding<PlainStyle> {
    /// Binds a themed style.
    ///
    /// Both outputs are resolved once up front; notifications only pick the
    /// one matching the effective mode.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::NotThemed`] if the style has no override keys.
    pub fn style<U>(theme: &AppTheme, style: ThemedStyle, on_update: U) -> Result<Self, StyleError>
    where
        U: Fn() + 'static,
    {
        if !is_themed_style(&style) {
            return Err(StyleError::NotThemed);
        }
        let light = resolve(&style, ColorMode::Light)?;
        let dark = resolve(&style, ColorMode::Dark)?;
        Ok(Self::mount(
            theme,
            move |t| match t.color_mode() {
                ColorMode::Light => light.clone(),
                ColorMode::Dark => dark.clone(),
            },
            on_update,
        ))
    }
}

impl<T> Drop for Binding<T> {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl<T: fmt::Debug> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("value", &*self.state.value.borrow())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
