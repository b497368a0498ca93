//! Property-based tests for the mode store using proptest.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;
use shade::{
    MemoryStorage, ModeStorage, ModeStore, StorageChoice, ThemeMode, DEFAULT_STORAGE_KEY,
};

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Op {
    Switch(ThemeMode),
    Toggle,
    Notify,
    Reset,
}

fn theme_mode() -> impl Strategy<Value = ThemeMode> {
    prop::sample::select(ThemeMode::ALL.to_vec())
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => theme_mode().prop_map(Op::Switch),
        1 => Just(Op::Toggle),
        1 => Just(Op::Notify),
        1 => Just(Op::Reset),
    ]
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Every operation notifies each listener exactly once, and the store
    /// and its persisted record track a simple model.
    #[test]
    fn store_matches_model(ops in prop::collection::vec(op(), 0..24)) {
        let backend = MemoryStorage::new();
        let store = ModeStore::builder()
            .storage(StorageChoice::custom(backend.clone()))
            .build()
            .unwrap();

        let calls = Rc::new(Cell::new(0usize));
        let sink = calls.clone();
        let _sub = store.subscribe(move |_| sink.set(sink.get() + 1));

        let mut mode = ThemeMode::System;
        let mut persisted: Option<ThemeMode> = None;
        for (i, op) in ops.iter().enumerate() {
            match *op {
                Op::Switch(next) => {
                    store.switch(next);
                    mode = next;
                    persisted = Some(next);
                }
                Op::Toggle => {
                    store.toggle();
                    mode = mode.next();
                    persisted = Some(mode);
                }
                Op::Notify => store.notify(),
                Op::Reset => {
                    store.reset();
                    mode = ThemeMode::System;
                    persisted = None;
                }
            }
            prop_assert_eq!(calls.get(), i + 1);
            prop_assert_eq!(store.get(), mode);
        }

        let stored = backend.get_string(DEFAULT_STORAGE_KEY).unwrap();
        prop_assert_eq!(stored, persisted.map(|m| m.as_str().to_string()));
    }

    /// A persisted mode is restored by a later store on the same backend.
    #[test]
    fn persisted_mode_is_restored(mode in theme_mode(), default in theme_mode()) {
        let backend = MemoryStorage::new();
        ModeStore::builder()
            .storage(StorageChoice::custom(backend.clone()))
            .build()
            .unwrap()
            .switch(mode);

        let restored = ModeStore::builder()
            .default_mode(default)
            .storage(StorageChoice::custom(backend))
            .build()
            .unwrap();
        prop_assert_eq!(restored.get(), mode);
    }

    /// Mode names parse back to the same mode; anything else is rejected
    /// without touching the store.
    #[test]
    fn switch_named_accepts_only_mode_names(name in "[a-z]{0,8}") {
        let store = ModeStore::new(ThemeMode::Light);
        let result = store.switch_named(&name);
        match name.as_str() {
            "light" | "dark" | "system" => {
                prop_assert!(result.is_ok());
                prop_assert_eq!(store.get().as_str(), name.as_str());
            }
            _ => {
                prop_assert!(result.is_err());
                prop_assert_eq!(store.get(), ThemeMode::Light);
            }
        }
    }
}
