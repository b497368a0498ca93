//! Sources of the OS color scheme.
//!
//! An [`AppearanceSource`] reports the scheme the OS currently prefers and
//! calls its listeners when that changes. A scheme of `None` means the OS
//! reports nothing usable; the theme then falls back to a configured mode.
//!
//! Two sources ship with the crate:
//!
//! - [`ManualAppearance`]: driven by the host, for hosts that already receive
//!   appearance callbacks from their platform (and for tests).
//! - [`OsAppearance`]: asks the OS through the detector below and re-checks on
//!   [`OsAppearance::poll`].
//!
//! # Detection
//!
//! [`detect_color_mode`] queries the OS via `dark-light`. Use
//! [`set_theme_detector`] to override detection for testing:
//!
//! ```rust
//! use shade::{detect_color_mode, reset_theme_detector, set_theme_detector, ColorMode};
//!
//! set_theme_detector(|| Some(ColorMode::Dark));
//! assert_eq!(detect_color_mode(), Some(ColorMode::Dark));
//! reset_theme_detector();
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::{Mutex, PoisonError};

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use shade_style::ColorMode;

/// Identifies a listener registered with an [`AppearanceSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Callback invoked with the new OS scheme.
pub type AppearanceListener = Box<dyn Fn(Option<ColorMode>)>;

/// Something that knows the OS color scheme.
pub trait AppearanceSource {
    /// The scheme right now, or `None` if the OS reports nothing.
    fn current_scheme(&self) -> Option<ColorMode>;

    fn subscribe(&self, listener: AppearanceListener) -> ListenerId;

    fn unsubscribe(&self, id: ListenerId);
}

type ThemeDetector = fn() -> Option<ColorMode>;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used by [`detect_color_mode`] and [`OsAppearance`].
///
/// The override is process-wide. Tests that set it should run serially and
/// call [`reset_theme_detector`] when done.
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR.lock().unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores OS detection after [`set_theme_detector`].
pub fn reset_theme_detector() {
    set_theme_detector(os_theme_detector);
}

/// Detects the user's preferred color scheme.
///
/// Returns `None` when the OS does not report one or detection fails.
pub fn detect_color_mode() -> Option<ColorMode> {
    let detector = *THEME_DETECTOR.lock().unwrap_or_else(PoisonError::into_inner);
    detector()
}

fn os_theme_detector() -> Option<ColorMode> {
    match detect_os_theme() {
        Ok(OsThemeMode::Dark) => Some(ColorMode::Dark),
        Ok(OsThemeMode::Light) => Some(ColorMode::Light),
        Ok(_) => None,
        Err(err) => {
            dev_warn!("could not detect the OS color scheme: {:?}", err);
            None
        }
    }
}

/// Listener list shared by the built-in sources.
#[derive(Default)]
struct Listeners {
    entries: RefCell<Vec<(ListenerId, Rc<dyn Fn(Option<ColorMode>)>)>>,
    next_id: Cell<u64>,
}

impl Listeners {
    fn add(&self, listener: AppearanceListener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.entries.borrow_mut().push((id, Rc::from(listener)));
        id
    }

    fn remove(&self, id: ListenerId) {
        self.entries.borrow_mut().retain(|(other, _)| *other != id);
    }

    fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn emit(&self, scheme: Option<ColorMode>) {
        let snapshot: Vec<_> = self
            .entries
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in snapshot {
            listener(scheme);
        }
    }
}

struct SourceState {
    scheme: Cell<Option<ColorMode>>,
    listeners: Listeners,
}

impl SourceState {
    fn new(scheme: Option<ColorMode>) -> Rc<Self> {
        Rc::new(Self {
            scheme: Cell::new(scheme),
            listeners: Listeners::default(),
        })
    }
}

/// A source whose scheme is set by the host.
///
/// Every [`set_scheme`](Self::set_scheme) notifies listeners, even when the
/// scheme is unchanged; consumers such as the watcher filter duplicates.
/// Clones share state.
#[derive(Clone)]
pub struct ManualAppearance {
    state: Rc<SourceState>,
}

impl ManualAppearance {
    pub fn new(scheme: Option<ColorMode>) -> Self {
        Self {
            state: SourceState::new(scheme),
        }
    }

    pub fn set_scheme(&self, scheme: Option<ColorMode>) {
        self.state.scheme.set(scheme);
        self.state.listeners.emit(scheme);
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.len()
    }
}

impl AppearanceSource for ManualAppearance {
    fn current_scheme(&self) -> Option<ColorMode> {
        self.state.scheme.get()
    }

    fn subscribe(&self, listener: AppearanceListener) -> ListenerId {
        self.state.listeners.add(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.state.listeners.remove(id);
    }
}

impl fmt::Debug for ManualAppearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualAppearance")
            .field("scheme", &self.state.scheme.get())
            .field("listeners", &self.state.listeners.len())
            .finish()
    }
}

/// A source backed by OS detection.
///
/// The scheme is read once at creation. Call [`poll`](Self::poll) from the
/// host's event loop (for example on focus or a timer) to pick up changes.
/// Clones share state.
#[derive(Clone)]
pub struct OsAppearance {
    state: Rc<SourceState>,
}

impl OsAppearance {
    pub fn new() -> Self {
        let scheme = detect_color_mode();
        if scheme.is_none() {
            dev_warn!("OS color scheme unavailable; system mode will use the fallback");
        }
        Self {
            state: SourceState::new(scheme),
        }
    }

    /// Re-reads the OS scheme and notifies listeners if it changed.
    /// Returns true when a change was seen.
    pub fn poll(&self) -> bool {
        let scheme = detect_color_mode();
        if scheme == self.state.scheme.get() {
            return false;
        }
        log::debug!("OS color scheme changed to {:?}", scheme);
        self.state.scheme.set(scheme);
        self.state.listeners.emit(scheme);
        true
    }
}

impl Default for OsAppearance {
    fn default() -> Self {
        Self::new()
    }
}

impl AppearanceSource for OsAppearance {
    fn current_scheme(&self) -> Option<ColorMode> {
        self.state.scheme.get()
    }

    fn subscribe(&self, listener: AppearanceListener) -> ListenerId {
        self.state.listeners.add(listener)
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.state.listeners.remove(id);
    }
}

impl fmt::Debug for OsAppearance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OsAppearance")
            .field("scheme", &self.state.scheme.get())
            .finish()
    }
}
