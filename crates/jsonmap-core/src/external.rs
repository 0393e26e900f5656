//! Boundary with `serde_json`.
//!
//! Input: any `serde_json::Value` becomes raw [`Value`]s (objects become
//! [`SharedMap`]s, never documents). Output: documents serialize as the plain
//! nested structure they store. Subtype instances contribute only their
//! stored fields; chars and symbols are written as strings, and non-finite
//! floats as `null`.

use crate::document::Document;
use crate::error::{DocumentError, Result};
use crate::shared::SharedMap;
use crate::value::Value;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number};

impl Value {
    /// Converts to a `serde_json::Value`, keeping insertion order.
    pub fn to_external(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::Number(Number::from(*n)),
            Value::Float(x) => {
                Number::from_f64(*x).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            Value::Char(c) => serde_json::Value::String(c.to_string()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Symbol(symbol) => serde_json::Value::String(symbol.name().to_string()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_external).collect())
            }
            Value::Map(_) | Value::Document(_) | Value::Typed(_) => match self.as_shared() {
                Some(map) => map_to_external(map),
                None => serde_json::Value::Null,
            },
        }
    }

    /// Converts parsed JSON into raw values.
    pub fn from_external(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from_external).collect())
            }
            serde_json::Value::Object(map) => Value::Map(object_to_shared(map)),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::from_external(value)
    }
}

impl Document {
    /// Builds a document over parsed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::InvalidArgument`] if `value` is `null` or is
    /// not an object; a document always needs a backing map.
    pub fn from_external(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(map) => Ok(Document::from(object_to_shared(map))),
            serde_json::Value::Null => Err(DocumentError::InvalidArgument(
                "backing map must not be null".to_string(),
            )),
            other => Err(DocumentError::InvalidArgument(format!(
                "expected a JSON object, found {}",
                json_kind(&other)
            ))),
        }
    }

    /// Parses JSON text into a document.
    ///
    /// ```
    /// use jsonmap_core::Document;
    ///
    /// let doc = Document::from_json_str(r#"{"count":"12","enabled":"TRUE"}"#).unwrap();
    /// assert_eq!(doc.get_int("count", 0), 12);
    /// assert!(doc.get_boolean("enabled", false));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::JsonParse`] for malformed JSON and
    /// [`DocumentError::InvalidArgument`] when the top level is not an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Document::from_external(value)
    }

    /// Returns the document as a `serde_json` object, built from the backing
    /// storage in insertion order.
    pub fn to_external_object(&self) -> serde_json::Value {
        map_to_external(self.shared())
    }

    /// Projects every value to its canonical text, in insertion order.
    ///
    /// ```
    /// use jsonmap_core::{Document, Value};
    ///
    /// let doc = Document::new();
    /// doc.put_value("a", 1).put_value("b", true).put_value("c", Value::Null);
    /// let text = doc.to_text_map();
    /// assert_eq!(text["a"], "1");
    /// assert_eq!(text["b"], "true");
    /// assert_eq!(text["c"], "null");
    /// ```
    pub fn to_text_map(&self) -> IndexMap<String, String> {
        self.shared()
            .borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }
}

fn object_to_shared(map: Map<String, serde_json::Value>) -> SharedMap {
    map.into_iter()
        .map(|(key, value)| (key, Value::from_external(value)))
        .collect()
}

fn map_to_external(map: &SharedMap) -> serde_json::Value {
    let object: Map<String, serde_json::Value> = map
        .borrow()
        .iter()
        .map(|(key, value)| (key.clone(), value.to_external()))
        .collect();
    serde_json::Value::Object(object)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(x) if x.is_finite() => serializer.serialize_f64(*x),
            Value::Float(_) => serializer.serialize_unit(),
            Value::Char(c) => serializer.serialize_char(*c),
            Value::String(s) => serializer.serialize_str(s),
            Value::Symbol(symbol) => serializer.serialize_str(symbol.name()),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(_) | Value::Document(_) | Value::Typed(_) => match self.as_shared() {
                Some(map) => map.serialize(serializer),
                None => serializer.serialize_unit(),
            },
        }
    }
}

impl Serialize for SharedMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.borrow();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.shared().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Document::from_external(value).map_err(D::Error::custom)
    }
}
