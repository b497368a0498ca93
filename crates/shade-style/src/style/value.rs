//! Style object types.
//!
//! Host style objects are JSON-like maps of property names to values. A
//! [`ThemedStyle`] may carry dark-override keys; a [`PlainStyle`] is what the
//! host actually receives and never does.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::StyleError;
use super::keys::OverrideKey;

/// A style object that may carry dark-override keys.
///
/// # Example
///
/// ```rust
/// use shade_style::ThemedStyle;
///
/// let card = ThemedStyle::new()
///     .set("backgroundColor", "#fff")
///     .set("backgroundDark", "#000")
///     .set("padding", 12);
///
/// assert!(card.is_themed());
/// assert_eq!(card.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemedStyle(Map<String, Value>);

impl ThemedStyle {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Sets a property, returning `self` for chaining.
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// True if at least one override key is present, whatever its value.
    pub fn is_themed(&self) -> bool {
        OverrideKey::ALL.iter().any(|k| self.0.contains_key(k.key()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ThemedStyle {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for ThemedStyle {
    type Error = StyleError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(StyleError::NotAMapping {
                found: json_kind(&other),
            }),
        }
    }
}

/// A resolved style object with no override keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlainStyle(Map<String, Value>);

impl PlainStyle {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Convenience accessor for string-valued properties such as colors.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub(crate) fn insert(&mut self, name: &str, value: Value) {
        self.0.insert(name.to_string(), value);
    }
}

impl From<PlainStyle> for Value {
    fn from(style: PlainStyle) -> Self {
        style.into_value()
    }
}

/// Whether an override value should be applied.
///
/// `null`, `false`, numeric zero and the empty string are treated as "no
/// override"; everything else applies.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
