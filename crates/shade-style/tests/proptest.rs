//! Property-based tests for style resolution using proptest.

use proptest::prelude::*;
use serde_json::Value;
use shade_style::{is_truthy, resolve, ColorMode, OverrideKey, ThemedStyle};

// ============================================================================
// Strategies
// ============================================================================

const PLAIN_KEYS: [&str; 7] = [
    "backgroundColor",
    "color",
    "borderColor",
    "tintColor",
    "padding",
    "margin",
    "opacity",
];

fn style_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        "#[0-9a-f]{6}".prop_map(Value::from),
        Just(Value::from("")),
        (0i64..32).prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn plain_entries() -> impl Strategy<Value = Vec<(&'static str, Value)>> {
    prop::collection::vec((prop::sample::select(PLAIN_KEYS.to_vec()), style_value()), 0..6)
}

fn override_entries() -> impl Strategy<Value = Vec<(&'static str, Value)>> {
    let keys: Vec<&'static str> = OverrideKey::ALL.iter().map(|k| k.key()).collect();
    prop::collection::vec((prop::sample::select(keys), style_value()), 1..4)
}

fn themed_style() -> impl Strategy<Value = ThemedStyle> {
    (plain_entries(), override_entries()).prop_map(|(plain, overrides)| {
        let mut style = ThemedStyle::new();
        for (name, value) in plain.into_iter().chain(overrides) {
            style.insert(name, value);
        }
        style
    })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// No override key survives resolution, in either mode.
    #[test]
    fn output_never_contains_override_keys(style in themed_style()) {
        for mode in [ColorMode::Light, ColorMode::Dark] {
            let resolved = resolve(&style, mode).unwrap();
            for key in OverrideKey::ALL {
                prop_assert!(!resolved.contains_key(key.key()));
            }
        }
    }

    /// Light mode output is exactly the pass-through keys.
    #[test]
    fn light_keeps_pass_through_keys_unchanged(style in themed_style()) {
        let resolved = resolve(&style, ColorMode::Light).unwrap();
        let pass_through = style.iter().filter(|(k, _)| !OverrideKey::is_override(k)).count();
        prop_assert_eq!(resolved.len(), pass_through);
        for (name, value) in style.iter() {
            if !OverrideKey::is_override(name) {
                prop_assert_eq!(resolved.get(name), Some(value));
            }
        }
    }

    /// In dark mode a truthy override wins over the base property.
    #[test]
    fn dark_applies_truthy_overrides(style in themed_style()) {
        let resolved = resolve(&style, ColorMode::Dark).unwrap();
        for key in OverrideKey::ALL {
            match style.get(key.key()) {
                Some(value) if is_truthy(value) => {
                    prop_assert_eq!(resolved.get(key.base()), Some(value));
                }
                _ => {
                    prop_assert_eq!(resolved.get(key.base()), style.get(key.base()));
                }
            }
        }
    }

    /// Resolution is pure: same input and mode, same output, input untouched.
    #[test]
    fn resolution_is_pure(style in themed_style(), dark in any::<bool>()) {
        let mode = if dark { ColorMode::Dark } else { ColorMode::Light };
        let before = style.clone();
        let first = resolve(&style, mode).unwrap();
        let second = resolve(&style, mode).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(style, before);
    }

    /// Styles without override keys are always rejected.
    #[test]
    fn unthemed_styles_are_rejected(plain in plain_entries()) {
        let mut style = ThemedStyle::new();
        for (name, value) in plain {
            style.insert(name, value);
        }
        prop_assert!(resolve(&style, ColorMode::Dark).is_err());
        prop_assert!(resolve(&style, ColorMode::Light).is_err());
    }
}

#[test]
fn end_to_end_card_style() {
    let style = ThemedStyle::new()
        .set("backgroundColor", "#fff")
        .set("backgroundDark", "#000")
        .set("color", "#000")
        .set("colorDark", "#fff");

    let light = resolve(&style, ColorMode::Light).unwrap();
    assert_eq!(
        light.into_value(),
        serde_json::json!({"backgroundColor": "#fff", "color": "#000"})
    );

    let dark = resolve(&style, ColorMode::Dark).unwrap();
    assert_eq!(
        dark.into_value(),
        serde_json::json!({"backgroundColor": "#000", "color": "#fff"})
    );
}
