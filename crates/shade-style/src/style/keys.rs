//! The recognized dark-override keys.

/// A dark-mode override key and the base property it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverrideKey {
    /// `backgroundDark` → `backgroundColor`
    Background,
    /// `borderDark` → `borderColor`
    Border,
    /// `colorDark` → `color`
    Color,
    /// `tintColorDark` → `tintColor`
    TintColor,
}

impl OverrideKey {
    /// All override keys, in the order they are applied.
    pub const ALL: [OverrideKey; 4] = [
        OverrideKey::Background,
        OverrideKey::Border,
        OverrideKey::Color,
        OverrideKey::TintColor,
    ];

    /// The property name carrying the dark value.
    pub fn key(&self) -> &'static str {
        match self {
            OverrideKey::Background => "backgroundDark",
            OverrideKey::Border => "borderDark",
            OverrideKey::Color => "colorDark",
            OverrideKey::TintColor => "tintColorDark",
        }
    }

    /// The base property the dark value is written to.
    pub fn base(&self) -> &'static str {
        match self {
            OverrideKey::Background => "backgroundColor",
            OverrideKey::Border => "borderColor",
            OverrideKey::Color => "color",
            OverrideKey::TintColor => "tintColor",
        }
    }

    /// Looks up an override key by its property name.
    pub fn from_key(name: &str) -> Option<OverrideKey> {
        Self::ALL.into_iter().find(|k| k.key() == name)
    }

    pub fn is_override(name: &str) -> bool {
        Self::from_key(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_round_trip() {
        for key in OverrideKey::ALL {
            assert_eq!(OverrideKey::from_key(key.key()), Some(key));
        }
    }

    #[test]
    fn test_base_names_are_not_overrides() {
        for key in OverrideKey::ALL {
            assert!(!OverrideKey::is_override(key.base()));
        }
        assert!(!OverrideKey::is_override("margin"));
    }
}
