//! The theme mode store.
//!
//! [`ModeStore`] owns the tri-state [`ThemeMode`] and the list of listeners
//! interested in it. It is a cheap handle: clones share the same state, so the
//! store is created once and passed to everything that needs it.
//!
//! ## Notification Order
//!
//! `switch`, `notify` and `reset` invoke every subscribed listener once, in
//! subscription order, before returning. Listeners always observe the new
//! value through [`ModeStore::get`].
//!
//! A `switch` issued from inside a listener is queued and applied after the
//! current notification pass finishes, so nested changes are processed
//! breadth-first and none are lost.
//!
//! ## Nudging
//!
//! When the mode is `System` and the OS scheme flips, the stored value does not
//! change but the effective mode does. [`ModeStore::notify`] fires listeners
//! without touching the value (or the persisted record) for exactly that case.
//!
//! ```rust
//! use shade::{ModeStore, ThemeMode};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let store = ModeStore::new(ThemeMode::System);
//! let calls = Rc::new(Cell::new(0));
//! let seen = calls.clone();
//! let sub = store.subscribe(move |_| seen.set(seen.get() + 1));
//!
//! store.switch(ThemeMode::Dark);
//! assert_eq!(store.get(), ThemeMode::Dark);
//! assert_eq!(calls.get(), 1);
//!
//! sub.unsubscribe();
//! store.switch(ThemeMode::Light);
//! assert_eq!(calls.get(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use shade_style::{InvalidModeError, ThemeMode};

use crate::error::ThemeError;
use crate::settings::ThemeSettings;
use crate::storage::{FileStorage, ModeStorage, StorageChoice, DEFAULT_STORAGE_KEY};

/// Why listeners are being notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeCause {
    /// An explicit `switch` (or `toggle`).
    Switched,
    /// A `notify` without a value change.
    Nudged,
    /// A `reset` back to `System`.
    Reset,
}

/// Payload passed to every listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub previous: ThemeMode,
    pub current: ThemeMode,
    pub cause: ChangeCause,
}

type Listener = Rc<dyn Fn(&ModeChange)>;

enum Pending {
    Switch(ThemeMode),
    Nudge,
    Reset,
}

struct Persistence {
    storage: Box<dyn ModeStorage>,
    key: String,
}

struct Inner {
    mode: Cell<ThemeMode>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
    pending: RefCell<VecDeque<Pending>>,
    dispatching: Cell<bool>,
    persistence: Option<Persistence>,
}

/// Shared handle to the theme mode state.
#[derive(Clone)]
pub struct ModeStore {
    inner: Rc<Inner>,
}

impl ModeStore {
    /// Creates an in-memory store.
    pub fn new(initial: ThemeMode) -> Self {
        Self::from_parts(initial, None)
    }

    pub fn builder() -> ModeStoreBuilder {
        ModeStoreBuilder::new()
    }

    fn from_parts(initial: ThemeMode, persistence: Option<Persistence>) -> Self {
        Self {
            inner: Rc::new(Inner {
                mode: Cell::new(initial),
                listeners: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                pending: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                persistence,
            }),
        }
    }

    pub fn get(&self) -> ThemeMode {
        self.inner.mode.get()
    }

    /// Sets the mode, persists it when enabled and notifies listeners.
    pub fn switch(&self, next: ThemeMode) {
        self.enqueue(Pending::Switch(next));
    }

    /// Parses and switches to a mode given by name.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidModeError`] and leaves the store untouched if `name`
    /// is not `light`, `dark` or `system`.
    pub fn switch_named(&self, name: &str) -> Result<(), InvalidModeError> {
        let mode: ThemeMode = name.parse()?;
        self.switch(mode);
        Ok(())
    }

    /// Switches to the next mode in the light, dark, system cycle.
    pub fn toggle(&self) {
        self.switch(self.get().next());
    }

    /// Notifies listeners without changing the mode.
    pub fn notify(&self) {
        self.enqueue(Pending::Nudge);
    }

    /// Forgets the persisted mode and goes back to `System`.
    pub fn reset(&self) {
        self.enqueue(Pending::Reset);
    }

    /// Registers a listener. It stays registered until
    /// [`Subscription::unsubscribe`] is called.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ModeChange) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            store: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// True if explicit switches are written to a storage backend.
    pub fn is_persistent(&self) -> bool {
        self.inner.persistence.is_some()
    }

    pub fn storage_key(&self) -> Option<&str> {
        self.inner.persistence.as_ref().map(|p| p.key.as_str())
    }

    fn enqueue(&self, pending: Pending) {
        self.inner.pending.borrow_mut().push_back(pending);
        if self.inner.dispatching.get() {
            return;
        }

        let _guard = DispatchGuard::enter(&self.inner);
        loop {
            let next = self.inner.pending.borrow_mut().pop_front();
            let Some(pending) = next else {
                break;
            };
            let change = self.apply(pending);
            self.dispatch(&change);
        }
    }

    fn apply(&self, pending: Pending) -> ModeChange {
        let previous = self.get();
        match pending {
            Pending::Switch(next) => {
                self.inner.mode.set(next);
                self.persist(next);
                ModeChange {
                    previous,
                    current: next,
                    cause: ChangeCause::Switched,
                }
            }
            Pending::Nudge => ModeChange {
                previous,
                current: previous,
                cause: ChangeCause::Nudged,
            },
            Pending::Reset => {
                self.forget();
                self.inner.mode.set(ThemeMode::System);
                ModeChange {
                    previous,
                    current: ThemeMode::System,
                    cause: ChangeCause::Reset,
                }
            }
        }
    }

    fn dispatch(&self, change: &ModeChange) {
        // Snapshot so listeners may subscribe or unsubscribe while we iterate.
        let snapshot: Vec<(u64, Listener)> = self.inner.listeners.borrow().clone();
        for (id, listener) in snapshot {
            let still_subscribed = self
                .inner
                .listeners
                .borrow()
                .iter()
                .any(|(other, _)| *other == id);
            if still_subscribed {
                listener(change);
            }
        }
    }

    fn persist(&self, mode: ThemeMode) {
        if let Some(p) = &self.inner.persistence {
            if let Err(err) = p.storage.set(&p.key, mode.as_str()) {
                dev_warn!("failed to persist theme mode '{}': {}", mode, err);
            }
        }
    }

    fn forget(&self) {
        if let Some(p) = &self.inner.persistence {
            if let Err(err) = p.storage.delete(&p.key) {
                dev_warn!("failed to clear persisted theme mode: {}", err);
            }
        }
    }
}

impl fmt::Debug for ModeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeStore")
            .field("mode", &self.get())
            .field("listeners", &self.listener_count())
            .field("persistent", &self.is_persistent())
            .finish()
    }
}

/// Clears the dispatching flag even if a listener panics. On a panic the
/// changes queued during the aborted pass are dropped with it.
struct DispatchGuard<'a> {
    inner: &'a Inner,
}

impl<'a> DispatchGuard<'a> {
    fn enter(inner: &'a Inner) -> Self {
        inner.dispatching.set(true);
        Self { inner }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.inner.pending.borrow_mut().clear();
        }
        self.inner.dispatching.set(false);
    }
}

/// Handle returned by [`ModeStore::subscribe`].
#[must_use = "dropping a Subscription keeps the listener registered; call unsubscribe() to detach"]
pub struct Subscription {
    store: Weak<Inner>,
    id: u64,
}

impl Subscription {
    /// Detaches the listener. Safe to call after the store is gone.
    pub fn unsubscribe(self) {
        if let Some(inner) = self.store.upgrade() {
            inner.listeners.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Builder for a [`ModeStore`] with optional persistence.
///
/// # Example
///
/// ```rust
/// use shade::{MemoryStorage, ModeStore, StorageChoice, ThemeMode};
///
/// let backend = MemoryStorage::new();
/// let store = ModeStore::builder()
///     .storage(StorageChoice::custom(backend.clone()))
///     .build()
///     .unwrap();
///
/// store.switch(ThemeMode::Dark);
///
/// // A later store on the same backend starts where the last one left off.
/// let restored = ModeStore::builder()
///     .storage(StorageChoice::custom(backend))
///     .build()
///     .unwrap();
/// assert_eq!(restored.get(), ThemeMode::Dark);
/// ```
#[derive(Debug)]
pub struct ModeStoreBuilder {
    default_mode: ThemeMode,
    storage: StorageChoice,
    key: String,
    persist: bool,
    require_storage: bool,
}

impl ModeStoreBuilder {
    pub fn new() -> Self {
        Self {
            default_mode: ThemeMode::System,
            storage: StorageChoice::None,
            key: DEFAULT_STORAGE_KEY.to_string(),
            persist: true,
            require_storage: false,
        }
    }

    /// Mode used when nothing has been persisted.
    pub fn default_mode(mut self, mode: ThemeMode) -> Self {
        self.default_mode = mode;
        self
    }

    pub fn storage(mut self, storage: StorageChoice) -> Self {
        self.storage = storage;
        self
    }

    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// With `false`, explicit switches are not written and any record left
    /// by an earlier run is deleted at build time.
    pub fn persist(mut self, persist: bool) -> Self {
        self.persist = persist;
        self
    }

    /// Fail the build instead of falling back to memory when no backend can
    /// be set up.
    pub fn require_storage(mut self, required: bool) -> Self {
        self.require_storage = required;
        self
    }

    /// Applies runtime settings (default mode, key, persistence flags).
    pub fn settings(self, settings: &ThemeSettings) -> Self {
        self.default_mode(settings.default_mode)
            .storage_key(settings.storage_key.clone())
            .persist(settings.persist)
            .require_storage(settings.require_storage)
    }

    /// Builds the store, restoring the persisted mode when there is one.
    ///
    /// # Errors
    ///
    /// With `require_storage(true)`, returns
    /// [`ThemeError::StorageUnavailable`] when no backend is available and
    /// [`ThemeError::Storage`] when the backend cannot be read.
    pub fn build(self) -> Result<ModeStore, ThemeError> {
        let storage: Option<Box<dyn ModeStorage>> = match self.storage {
            StorageChoice::None => {
                if self.require_storage {
                    return Err(ThemeError::storage_unavailable("no storage backend configured"));
                }
                None
            }
            StorageChoice::Default => match FileStorage::in_config_dir() {
                Some(file) => Some(Box::new(file) as Box<dyn ModeStorage>),
                None if self.require_storage => {
                    return Err(ThemeError::storage_unavailable(
                        "no platform config directory",
                    ));
                }
                None => {
                    dev_warn!("no platform config directory; theme mode will not persist");
                    None
                }
            },
            StorageChoice::Custom(storage) => Some(storage),
        };

        let Some(storage) = storage else {
            return Ok(ModeStore::from_parts(self.default_mode, None));
        };

        if !self.persist {
            if let Err(err) = storage.delete(&self.key) {
                dev_warn!("failed to clear persisted theme mode: {}", err);
            }
            dev_warn!("theme mode storage is disabled; mode will not persist");
            return Ok(ModeStore::from_parts(self.default_mode, None));
        }

        let initial = match storage.get_string(&self.key) {
            Ok(Some(stored)) => match stored.parse::<ThemeMode>() {
                Ok(mode) => mode,
                Err(err) => {
                    dev_warn!("ignoring persisted theme mode: {}", err);
                    self.default_mode
                }
            },
            Ok(None) => self.default_mode,
            Err(err) if self.require_storage => return Err(err.into()),
            Err(err) => {
                dev_warn!("failed to read persisted theme mode: {}", err);
                self.default_mode
            }
        };
        log::debug!("theme mode store ready (mode: {}, key: {})", initial, self.key);

        Ok(ModeStore::from_parts(
            initial,
            Some(Persistence {
                storage,
                key: self.key,
            }),
        ))
    }
}

impl Default for ModeStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
