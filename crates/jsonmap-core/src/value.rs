//! The closed set of values a document can hold.
//!
//! Raw input from a JSON parser only ever uses `Null`, `Bool`, `Int`,
//! `Float`, `String`, `Map` and `List`. The remaining variants appear once
//! application code stores them directly (`Char`, `Symbol`) or once a read
//! memoizes a coercion (`Document`, `Typed`).

use crate::document::Document;
use crate::shared::SharedMap;
use crate::subtype::{DocumentType, TypedDocument};
use crate::symbol::{Symbol, SymbolValue};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A dynamically typed document value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    String(String),
    /// A member of an application-defined enumeration.
    Symbol(SymbolValue),
    /// A raw nested map that has not been wrapped yet.
    Map(SharedMap),
    /// A nested map wrapped as a [`Document`] view.
    Document(Document),
    /// An application-defined document subtype.
    Typed(TypedDocument),
    List(Vec<Value>),
}

impl Value {
    /// Wraps an enumeration member.
    pub fn symbol<E: Symbol>(member: E) -> Self {
        Value::Symbol(SymbolValue::of(member))
    }

    /// Wraps a constructed document subtype instance.
    pub fn typed<T: DocumentType>(instance: Rc<T>) -> Self {
        Value::Typed(TypedDocument::new(instance))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for the three map-like variants: raw maps, documents and
    /// typed documents.
    pub fn is_map(&self) -> bool {
        self.as_shared().is_some()
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the backing storage of any map-like value.
    pub fn as_shared(&self) -> Option<&SharedMap> {
        match self {
            Value::Map(map) => Some(map),
            Value::Document(doc) => Some(doc.shared()),
            Value::Typed(typed) => Some(typed.document().shared()),
            _ => None,
        }
    }

    /// Returns the type name as a string for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Map(_) => "map",
            Value::Document(_) => "document",
            Value::Typed(_) => "typed document",
            Value::List(_) => "list",
        }
    }
}

/// Structural equality.
///
/// Floats compare by bit pattern, so `NaN == NaN` and `0.0 != -0.0`; this
/// keeps `Eq` and `Hash` lawful. Map-like variants compare by entries only,
/// so a raw map equals the document wrapping an equal map.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Char(a), Value::Char(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => match (self.as_shared(), other.as_shared()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => state.write_u8(0),
            Value::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            Value::Int(n) => {
                state.write_u8(2);
                n.hash(state);
            }
            Value::Float(x) => {
                state.write_u8(3);
                x.to_bits().hash(state);
            }
            Value::Char(c) => {
                state.write_u8(4);
                c.hash(state);
            }
            Value::String(s) => {
                state.write_u8(5);
                s.hash(state);
            }
            Value::Symbol(symbol) => {
                state.write_u8(6);
                symbol.hash(state);
            }
            Value::List(items) => {
                state.write_u8(7);
                items.hash(state);
            }
            Value::Map(_) | Value::Document(_) | Value::Typed(_) => {
                state.write_u8(8);
                if let Some(map) = self.as_shared() {
                    map.hash(state);
                }
            }
        }
    }
}

/// Canonical text of a value.
///
/// Strings are written verbatim (no quotes); nested maps and lists are
/// written as compact JSON.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => f.write_str(&format_float(*x)),
            Value::Char(c) => write!(f, "{c}"),
            Value::String(s) => f.write_str(s),
            Value::Symbol(symbol) => f.write_str(symbol.name()),
            Value::Map(_) | Value::Document(_) | Value::Typed(_) | Value::List(_) => {
                write!(f, "{}", self.to_external())
            }
        }
    }
}

/// Shortest round-trip form with a trailing `.0` on integral values.
pub(crate) fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    match serde_json::Number::from_f64(x) {
        Some(n) => n.to_string(),
        None => x.to_string(),
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<SymbolValue> for Value {
    fn from(symbol: SymbolValue) -> Self {
        Value::Symbol(symbol)
    }
}

impl From<SharedMap> for Value {
    fn from(map: SharedMap) -> Self {
        Value::Map(map)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Document(doc)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
