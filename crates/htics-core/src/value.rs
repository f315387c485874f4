//! Typed document values.
//!
//! Firestore encodes every field as a self-describing object whose single key
//! names the value kind (`{"stringValue": "..."}`, `{"mapValue": {...}}`, ...).
//! [`TypedValue`] collapses that encoding into one tagged union with
//! path-based accessors, so callers never need a dedicated struct per field
//! combination.

use std::collections::BTreeMap;

use serde::Deserialize;

/// A single value from a Firestore document.
///
/// Only the kinds the event decoder reads get their own variant. Every other
/// kind (booleans, doubles, timestamps, references, nulls, ...) is kept as
/// [`TypedValue::Other`] so unrelated fields never break parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireValue")]
pub enum TypedValue {
    /// `stringValue`.
    String(String),
    /// `integerValue`, kept as text to avoid precision loss.
    Integer(String),
    /// `arrayValue`, in document order.
    Array(Vec<TypedValue>),
    /// `mapValue`.
    Map(BTreeMap<String, TypedValue>),
    /// Any other value kind, identified by its wire key.
    Other {
        /// The wire key, e.g. `booleanValue` or `nullValue`.
        kind: String,
    },
}

impl TypedValue {
    /// Creates a `String` value.
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    /// Creates an `Integer` value.
    pub fn integer(value: i64) -> Self {
        Self::Integer(value.to_string())
    }

    /// Creates a `Map` value from `(name, value)` pairs.
    pub fn map<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TypedValue)>,
    {
        Self::Map(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Returns the static name of this value's kind, for diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Other { kind } => kind,
        }
    }

    /// Returns true for `Map` and `Array` values.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Map(_) | Self::Array(_))
    }

    /// Returns the text of a `String` or `Integer` scalar.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(text) | Self::Integer(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the elements of an `Array`, or an empty slice for any other kind.
    pub fn as_array(&self) -> &[TypedValue] {
        match self {
            Self::Array(values) => values,
            _ => &[],
        }
    }

    /// Looks up a dotted path (`"location.name"`) through nested maps.
    ///
    /// Returns `None` as soon as a segment is missing or a non-map value has
    /// to be traversed.
    pub fn get(&self, path: &str) -> Option<&TypedValue> {
        path.split('.').try_fold(self, |value, segment| match value {
            Self::Map(fields) => fields.get(segment),
            _ => None,
        })
    }
}

/// Looks up a dotted path in a document's top-level field map.
pub fn lookup<'a>(fields: &'a BTreeMap<String, TypedValue>, path: &str) -> Option<&'a TypedValue> {
    match path.split_once('.') {
        Some((head, rest)) => fields.get(head)?.get(rest),
        None => fields.get(path),
    }
}

/// Wire shape of a Firestore value.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireValue {
    string_value: Option<String>,
    integer_value: Option<String>,
    array_value: Option<WireArray>,
    map_value: Option<WireMap>,
    #[serde(flatten)]
    other: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WireArray {
    #[serde(default)]
    values: Vec<TypedValue>,
}

#[derive(Debug, Deserialize)]
struct WireMap {
    #[serde(default)]
    fields: BTreeMap<String, TypedValue>,
}

impl From<WireValue> for TypedValue {
    fn from(wire: WireValue) -> Self {
        if let Some(text) = wire.string_value {
            Self::String(text)
        } else if let Some(text) = wire.integer_value {
            Self::Integer(text)
        } else if let Some(array) = wire.array_value {
            Self::Array(array.values)
        } else if let Some(map) = wire.map_value {
            Self::Map(map.fields)
        } else {
            // An empty object carries no kind at all; treat it like nullValue.
            let kind = wire
                .other
                .into_keys()
                .next()
                .unwrap_or_else(|| "nullValue".to_string());
            Self::Other { kind }
        }
    }
}
