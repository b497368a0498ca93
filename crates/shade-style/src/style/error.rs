//! Style resolution errors.

/// Error returned when a style cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleError {
    /// The style carries none of the recognized dark-override keys.
    #[error(
        "style is not themed: expected at least one of backgroundDark, borderDark, colorDark, tintColorDark"
    )]
    NotThemed,

    /// The input was not a mapping of property names to values.
    #[error("style must be a mapping of properties, found {found}")]
    NotAMapping { found: &'static str },
}
