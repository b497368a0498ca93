//! Bridges OS appearance changes into the mode store.
//!
//! While the user has selected `System`, an OS scheme flip changes the
//! effective mode without changing the stored value. The watcher notices the
//! flip and nudges the store with [`ModeStore::notify`] so every subscriber
//! re-resolves. With an explicit `Light` or `Dark` selection a flip changes
//! nothing visible and the watcher stays quiet.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use shade_style::{ColorMode, ThemeMode};

use crate::appearance::{AppearanceSource, ListenerId};
use crate::store::ModeStore;

/// Registers with an appearance source for as long as it is alive.
pub struct AppearanceWatcher {
    store: ModeStore,
    source: Rc<dyn AppearanceSource>,
    baseline: Rc<Cell<Option<ColorMode>>>,
    listener: ListenerId,
}

impl AppearanceWatcher {
    /// Starts watching. The source's current scheme becomes the baseline.
    pub fn new(store: ModeStore, source: Rc<dyn AppearanceSource>) -> Self {
        let baseline = Rc::new(Cell::new(source.current_scheme()));

        let listener = {
            let store = store.clone();
            let baseline = baseline.clone();
            source.subscribe(Box::new(move |scheme| {
                let changed = scheme != baseline.get();
                baseline.set(scheme);
                if changed && store.get() == ThemeMode::System {
                    store.notify();
                }
            }))
        };

        Self {
            store,
            source,
            baseline,
            listener,
        }
    }

    /// The last OS scheme seen.
    pub fn baseline(&self) -> Option<ColorMode> {
        self.baseline.get()
    }

    /// The color mode to apply right now.
    pub fn effective_mode(&self, fallback: ColorMode) -> ColorMode {
        self.store.get().resolve(self.baseline.get(), fallback)
    }

    pub fn store(&self) -> &ModeStore {
        &self.store
    }
}

impl Drop for AppearanceWatcher {
    fn drop(&mut self) {
        self.source.unsubscribe(self.listener);
    }
}

impl fmt::Debug for AppearanceWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppearanceWatcher")
            .field("baseline", &self.baseline.get())
            .field("store", &self.store)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::ManualAppearance;
    use crate::store::ChangeCause;
    use std::cell::RefCell;

    fn setup(mode: ThemeMode, scheme: Option<ColorMode>) -> (ModeStore, ManualAppearance) {
        (ModeStore::new(mode), ManualAppearance::new(scheme))
    }

    fn count_causes(store: &ModeStore) -> Rc<RefCell<Vec<ChangeCause>>> {
        let causes = Rc::new(RefCell::new(Vec::new()));
        let sink = causes.clone();
        // Kept registered for the life of the store.
        let _ = store.subscribe(move |change| sink.borrow_mut().push(change.cause));
        causes
    }

    #[test]
    fn test_baseline_from_source() {
        let (store, source) = setup(ThemeMode::System, Some(ColorMode::Dark));
        let watcher = AppearanceWatcher::new(store, Rc::new(source));
        assert_eq!(watcher.baseline(), Some(ColorMode::Dark));
    }

    #[test]
    fn test_system_mode_flip_nudges_once() {
        let (store, source) = setup(ThemeMode::System, Some(ColorMode::Light));
        let causes = count_causes(&store);
        let watcher = AppearanceWatcher::new(store.clone(), Rc::new(source.clone()));

        source.set_scheme(Some(ColorMode::Dark));

        assert_eq!(*causes.borrow(), vec![ChangeCause::Nudged]);
        assert_eq!(store.get(), ThemeMode::System);
        assert_eq!(watcher.effective_mode(ColorMode::Light), ColorMode::Dark);
    }

    #[test]
    fn test_explicit_mode_flip_is_silent() {
        let (store, source) = setup(ThemeMode::Dark, Some(ColorMode::Light));
        let causes = count_causes(&store);
        let watcher = AppearanceWatcher::new(store, Rc::new(source.clone()));

        source.set_scheme(Some(ColorMode::Dark));

        assert!(causes.borrow().is_empty());
        assert_eq!(watcher.baseline(), Some(ColorMode::Dark));
    }

    #[test]
    fn test_repeated_scheme_is_ignored() {
        let (store, source) = setup(ThemeMode::System, Some(ColorMode::Light));
        let causes = count_causes(&store);
        let _watcher = AppearanceWatcher::new(store, Rc::new(source.clone()));

        source.set_scheme(Some(ColorMode::Light));
        assert!(causes.borrow().is_empty());
    }

    #[test]
    fn test_baseline_tracks_silently_then_nudges_against_it() {
        let (store, source) = setup(ThemeMode::Dark, Some(ColorMode::Light));
        let causes = count_causes(&store);
        let _watcher = AppearanceWatcher::new(store.clone(), Rc::new(source.clone()));

        source.set_scheme(Some(ColorMode::Dark));
        store.switch(ThemeMode::System);
        causes.borrow_mut().clear();

        // Same as the silently updated baseline.
        source.set_scheme(Some(ColorMode::Dark));
        assert!(causes.borrow().is_empty());

        source.set_scheme(Some(ColorMode::Light));
        assert_eq!(*causes.borrow(), vec![ChangeCause::Nudged]);
    }

    #[test]
    fn test_unknown_scheme_uses_fallback() {
        let (store, source) = setup(ThemeMode::System, None);
        let watcher = AppearanceWatcher::new(store, Rc::new(source));
        assert_eq!(watcher.effective_mode(ColorMode::Dark), ColorMode::Dark);
        assert_eq!(watcher.effective_mode(ColorMode::Light), ColorMode::Light);
    }

    #[test]
    fn test_drop_unregisters() {
        let (store, source) = setup(ThemeMode::System, None);
        let watcher = AppearanceWatcher::new(store, Rc::new(source.clone()));
        assert_eq!(source.listener_count(), 1);
        drop(watcher);
        assert_eq!(source.listener_count(), 0);
    }
}
