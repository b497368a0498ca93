//! Host color values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A color value as understood by the host (`"#fff"`, `"red"`, `"rgba(...)"`).
///
/// Colors are opaque strings here; interpreting them is the host's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Color {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<Color> for serde_json::Value {
    fn from(color: Color) -> Self {
        serde_json::Value::String(color.0)
    }
}

impl PartialEq<&str> for Color {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
