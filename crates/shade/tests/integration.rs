//! Integration tests for shade.
//!
//! These drive a full theme (store, appearance source, container, bindings,
//! style sheets) through the scenarios a host app goes through: first launch,
//! user switching, OS flips, restart with a persisted choice.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::json;
use serial_test::serial;
use shade::{
    create_themed_style_sheet, reset_theme_detector, scope, set_theme_detector, AppTheme,
    Binding, ChangeCause, ColorMode, FileStorage, ManualAppearance, MemoryStorage, ModeStorage,
    ModeStore, OsAppearance, Platform, StorageChoice, ThemeConfig, ThemeError, ThemeMode,
    ThemeSettings, ThemedStyle, DEFAULT_STORAGE_KEY,
};
use tempfile::TempDir;

const CONFIG: &str = r##"
colors:
  light:
    background: "#ffffff"
    surface: "#f4f4f4"
    text: "#111111"
    accent: "#0a84ff"
  dark:
    background: "#000000"
    surface: "#1c1c1e"
    text: "#f2f2f2"
spacing:
  sm: 4
  md: 8
"##;

fn config() -> ThemeConfig {
    ThemeConfig::from_yaml(CONFIG).unwrap()
}

fn build(store: ModeStore, source: &ManualAppearance) -> AppTheme {
    AppTheme::builder(config())
        .store(store)
        .source(Rc::new(source.clone()))
        .platform(Platform::Other)
        .build()
        .unwrap()
}

fn notifications(theme: &AppTheme) -> Rc<RefCell<Vec<ChangeCause>>> {
    let causes = Rc::new(RefCell::new(Vec::new()));
    let sink = causes.clone();
    let _ = theme.subscribe(move |change| sink.borrow_mut().push(change.cause));
    causes
}

// ============================================================================
// OS appearance
// ============================================================================

#[test]
fn os_flip_in_system_mode_notifies_exactly_once() {
    let os = ManualAppearance::new(Some(ColorMode::Light));
    let theme = build(ModeStore::new(ThemeMode::System), &os);
    let causes = notifications(&theme);

    os.set_scheme(Some(ColorMode::Dark));

    assert_eq!(*causes.borrow(), vec![ChangeCause::Nudged]);
    assert_eq!(theme.mode(), ThemeMode::System);
    assert_eq!(theme.effective_mode(), ColorMode::Dark);
    assert_eq!(theme.theme().color_value("background"), Some(json!("#000000")));
}

#[test]
fn os_flip_with_explicit_mode_is_silent() {
    let os = ManualAppearance::new(Some(ColorMode::Light));
    let theme = build(ModeStore::new(ThemeMode::Dark), &os);
    let causes = notifications(&theme);

    os.set_scheme(Some(ColorMode::Light));
    os.set_scheme(Some(ColorMode::Dark));
    os.set_scheme(Some(ColorMode::Light));

    assert!(causes.borrow().is_empty());
    assert_eq!(theme.effective_mode(), ColorMode::Dark);
}

#[test]
fn os_scheme_lost_falls_back() {
    let os = ManualAppearance::new(Some(ColorMode::Dark));
    let theme = AppTheme::builder(config())
        .store(ModeStore::new(ThemeMode::System))
        .source(Rc::new(os.clone()))
        .fallback(ColorMode::Light)
        .platform(Platform::Other)
        .build()
        .unwrap();

    os.set_scheme(None);
    assert_eq!(theme.effective_mode(), ColorMode::Light);
}

#[test]
#[serial]
fn os_appearance_poll_drives_theme() {
    set_theme_detector(|| Some(ColorMode::Light));
    let os = OsAppearance::new();
    let theme = AppTheme::builder(config())
        .store(ModeStore::new(ThemeMode::System))
        .source(Rc::new(os.clone()))
        .platform(Platform::Other)
        .build()
        .unwrap();
    assert_eq!(theme.effective_mode(), ColorMode::Light);

    set_theme_detector(|| Some(ColorMode::Dark));
    assert!(os.poll());
    assert_eq!(theme.theme().color_mode(), ColorMode::Dark);
    reset_theme_detector();
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn persisted_mode_survives_restart() {
    let backend = MemoryStorage::new();
    let os = ManualAppearance::new(Some(ColorMode::Light));

    {
        let store = ModeStore::builder()
            .storage(StorageChoice::custom(backend.clone()))
            .build()
            .unwrap();
        let theme = build(store, &os);
        assert_eq!(theme.mode(), ThemeMode::System);
        theme.set_mode(ThemeMode::Dark);
    }

    let store = ModeStore::builder()
        .storage(StorageChoice::custom(backend))
        .build()
        .unwrap();
    let theme = build(store, &os);
    assert_eq!(theme.mode(), ThemeMode::Dark);
    assert!(theme.theme().is_dark());
}

#[test]
fn file_storage_round_trip_through_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("prefs").join("theme.json");
    let settings = ThemeSettings::from_yaml("storage_key: my-app.mode\n").unwrap();

    let first = AppTheme::builder(config())
        .settings(settings.clone())
        .storage(StorageChoice::custom(FileStorage::new(&path)))
        .source(Rc::new(ManualAppearance::new(None)))
        .platform(Platform::Other)
        .build()
        .unwrap();
    first.set_mode(ThemeMode::Light);
    drop(first);

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("my-app.mode"));

    let second = AppTheme::builder(config())
        .settings(settings)
        .storage(StorageChoice::custom(FileStorage::new(&path)))
        .source(Rc::new(ManualAppearance::new(None)))
        .platform(Platform::Other)
        .build()
        .unwrap();
    assert_eq!(second.mode(), ThemeMode::Light);

    second.reset_mode();
    let storage = FileStorage::new(&path);
    assert_eq!(storage.get_string("my-app.mode").unwrap(), None);
}

#[test]
fn disabled_persistence_clears_previous_choice() {
    let backend = MemoryStorage::new();
    backend.set(DEFAULT_STORAGE_KEY, "dark").unwrap();

    let settings = ThemeSettings {
        persist: false,
        ..ThemeSettings::default()
    };
    let theme = AppTheme::builder(config())
        .settings(settings)
        .storage(StorageChoice::custom(backend.clone()))
        .source(Rc::new(ManualAppearance::new(None)))
        .platform(Platform::Other)
        .build()
        .unwrap();

    assert_eq!(theme.mode(), ThemeMode::System);
    assert!(backend.is_empty());
}

#[test]
fn required_storage_without_backend_fails() {
    let settings = ThemeSettings {
        require_storage: true,
        ..ThemeSettings::default()
    };
    let err = AppTheme::builder(config())
        .settings(settings)
        .storage(StorageChoice::None)
        .source(Rc::new(ManualAppearance::new(None)))
        .build()
        .unwrap_err();
    assert!(matches!(err, ThemeError::StorageUnavailable { .. }));
}

// ============================================================================
// Derived values
// ============================================================================

#[test]
fn bindings_and_style_sheets_follow_the_mode() {
    let os = ManualAppearance::new(Some(ColorMode::Light));
    let theme = build(ModeStore::new(ThemeMode::System), &os);

    let renders = Rc::new(Cell::new(0));
    let counter = renders.clone();
    let card = ThemedStyle::new()
        .set("backgroundColor", "#fff")
        .set("backgroundDark", "#000")
        .set("padding", 12);
    let card = Binding::style(&theme, card, move || counter.set(counter.get() + 1)).unwrap();

    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    let sheet = create_themed_style_sheet(move |t| {
        sink.set(sink.get() + 1);
        json!({
            "screen": {"backgroundColor": t.color_value("background")},
            "title": {"color": t.color_value("text"), "marginBottom": t.section("spacing").and_then(|s| s.get("md")).cloned()},
        })
    });

    let light = sheet.use_styles(&theme);
    assert!(Rc::ptr_eq(&light, &sheet.use_styles(&theme)));
    assert_eq!(light["title"]["marginBottom"], json!(8));

    theme.toggle_mode(); // system -> light: same effective mode
    assert_eq!(renders.get(), 0);
    assert!(Rc::ptr_eq(&light, &sheet.use_styles(&theme)));

    theme.toggle_mode(); // light -> dark
    assert_eq!(renders.get(), 1);
    assert_eq!(card.value().get_str("backgroundColor"), Some("#000"));
    let dark = sheet.use_styles(&theme);
    assert_eq!(dark["screen"]["backgroundColor"], json!("#000000"));
    assert_eq!(calls.get(), 2);
}

#[test]
fn dynamic_palette_needs_no_rerender_on_ios() {
    let os = ManualAppearance::new(Some(ColorMode::Light));
    let theme = AppTheme::builder(config())
        .store(ModeStore::new(ThemeMode::System))
        .source(Rc::new(os.clone()))
        .platform(Platform::Ios)
        .build()
        .unwrap();

    let accent = theme.theme().color("accent").unwrap();
    assert!(accent.is_dynamic());
    assert_eq!(
        accent.to_value(),
        json!({"dynamic": {"light": "#0a84ff", "dark": "#0a84ff"}})
    );

    let renders = Rc::new(Cell::new(0));
    let counter = renders.clone();
    let background = Binding::mount(
        &theme,
        |t| t.color_value("background"),
        move || counter.set(counter.get() + 1),
    );
    let causes = notifications(&theme);

    os.set_scheme(Some(ColorMode::Dark));

    // The store still nudges, but the dynamic tokens are mode independent.
    assert_eq!(*causes.borrow(), vec![ChangeCause::Nudged]);
    assert_eq!(theme.effective_mode(), ColorMode::Dark);
    assert_eq!(renders.get(), 0);
    assert_eq!(
        background.value(),
        Some(json!({"dynamic": {"light": "#ffffff", "dark": "#000000"}}))
    );
}

// ============================================================================
// Provider scope
// ============================================================================

#[test]
fn scope_accessors_require_a_provider() {
    let err = scope::use_theme().unwrap_err();
    assert_eq!(err.to_string(), "use_theme must be used within AppTheme::provide");

    let os = ManualAppearance::new(None);
    let theme = build(ModeStore::new(ThemeMode::Light), &os);
    let text = theme.provide(|| {
        let set = scope::use_set_theme_mode().unwrap();
        set(ThemeMode::Dark);
        scope::use_theme().unwrap().color_value("text")
    });
    assert_eq!(text, Some(json!("#f2f2f2")));
}
