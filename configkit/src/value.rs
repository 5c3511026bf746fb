//! The configuration tree shared by every conversion.
//!
//! [`ConfigValue`] is the native boundary type: YAML documents deserialise
//! into it, the merge engine combines it and the store bridge flattens it into
//! Tcl array entries.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub use serde_json::Number;

/// Ordered mapping from keys to configuration values.
///
/// Insertion order follows the source document, so projections and emitted
/// YAML keep the author's layout.
pub type Mapping = IndexMap<String, ConfigValue>;

/// A node in a configuration tree.
///
/// The enum is untagged for serde, so it reads and writes the natural YAML
/// representation of each variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit absence of a value (`~` or `null` in YAML).
    #[default]
    Null,
    /// A boolean flag.
    Bool(bool),
    /// An integer or finite floating point number.
    Number(Number),
    /// A text value.
    String(String),
    /// An ordered list of values.
    Sequence(Vec<ConfigValue>),
    /// A nested mapping.
    Mapping(Mapping),
}

impl ConfigValue {
    /// Returns the nested mapping when this value is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(mapping) => Some(mapping),
            _ => None,
        }
    }

    /// Returns the text when this value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Reports whether the value is a leaf, i.e. anything but a mapping.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self, Self::Mapping(_))
    }

    /// Short human-readable name of the variant, used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Number(Number::from(value))
    }
}

impl From<u64> for ConfigValue {
    fn from(value: u64) -> Self {
        Self::Number(Number::from(value))
    }
}

/// Non-finite floats have no numeric representation and become [`ConfigValue::Null`].
impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Self>> for ConfigValue {
    fn from(values: Vec<Self>) -> Self {
        Self::Sequence(values)
    }
}

impl From<Mapping> for ConfigValue {
    fn from(mapping: Mapping) -> Self {
        Self::Mapping(mapping)
    }
}

/// Converts JSON values, keeping object keys in document order.
///
/// # Examples
///
/// ```rust
/// use configkit::ConfigValue;
/// use serde_json::json;
///
/// let value = ConfigValue::from(json!({"server": {"port": 8080}}));
/// let server = value.as_mapping().and_then(|m| m.get("server"));
/// assert!(matches!(server, Some(ConfigValue::Mapping(_))));
/// ```
impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number),
            Value::String(text) => Self::String(text),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, item)| (key, Self::from(item)))
                    .collect(),
            ),
        }
    }
}

/// Builds a [`Mapping`] from a JSON object literal.
///
/// Non-object input yields an empty mapping; this helper exists for fixtures
/// and examples where the literal is always an object.
///
/// # Examples
///
/// ```rust
/// use configkit::mapping_from_json;
/// use serde_json::json;
///
/// let tree = mapping_from_json(json!({"a": 1}));
/// assert_eq!(tree.len(), 1);
/// ```
#[must_use]
pub fn mapping_from_json(value: serde_json::Value) -> Mapping {
    match ConfigValue::from(value) {
        ConfigValue::Mapping(mapping) => mapping,
        _ => Mapping::new(),
    }
}
