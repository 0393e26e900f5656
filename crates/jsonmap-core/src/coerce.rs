//! Typed accessors over a [`Document`].
//!
//! Two failure policies coexist:
//!
//! - **Silent default**: the scalar accessors never fail. A missing key, a
//!   value of the wrong kind, or text that does not parse all yield the
//!   caller's default. `get_list` drops elements it cannot coerce.
//! - **Contract error**: [`Document::get_enum`] with text naming no member,
//!   and a subtype constructor that rejects its input, return
//!   [`DocumentError`]. These are programming errors and are never defaulted.
//!
//! [`Document::get_document`] and [`Document::get_document_as`] are reads
//! with a side effect: on success they overwrite the raw value under the key
//! with the wrapper they built, keeping the key's position. Later reads see
//! the wrapper directly.

use crate::document::Document;
use crate::error::{DocumentError, Result};
use crate::subtype::{construct, Coercible, DocumentType, TypedDocument};
use crate::symbol::Symbol;
use crate::value::Value;
use std::any::type_name;
use std::rc::Rc;
use tracing::{debug, trace};

impl Document {
    /// Returns the value under `key` as an `i32`, or `default`.
    ///
    /// Integers are narrowed by truncation, floats by saturating conversion,
    /// and text is parsed strictly (optional sign, no whitespace).
    pub fn get_int(&self, key: &str, default: i32) -> i32 {
        match self.shared().borrow().get(key) {
            Some(Value::Int(n)) => *n as i32,
            Some(Value::Float(x)) => *x as i32,
            Some(Value::String(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Returns the value under `key` as an `i64`, or `default`.
    pub fn get_long(&self, key: &str, default: i64) -> i64 {
        match self.shared().borrow().get(key) {
            Some(Value::Int(n)) => *n,
            Some(Value::Float(x)) => *x as i64,
            Some(Value::String(s)) => s.parse().unwrap_or(default),
            _ => default,
        }
    }

    /// Returns the value under `key` as an `f64`, or `default`.
    ///
    /// Text is parsed after trimming surrounding whitespace and control
    /// characters. The accepted form is an optional sign, digits with an
    /// optional fraction and exponent, and an optional `f` or `d` suffix in
    /// either case (`"1.5f"` reads as 1.5). Non-finite values must be
    /// spelled exactly `NaN` or `Infinity`; `"inf"` and `"nan"` yield
    /// `default`. Hexadecimal float text is not accepted.
    pub fn get_double(&self, key: &str, default: f64) -> f64 {
        match self.shared().borrow().get(key) {
            Some(Value::Float(x)) => *x,
            Some(Value::Int(n)) => *n as f64,
            Some(Value::String(s)) => {
                parse_decimal(s.trim_matches(|c: char| c <= ' ')).unwrap_or(default)
            }
            _ => default,
        }
    }

    /// Returns the value under `key` as a `char`, or `default`.
    ///
    /// Text converts only when it holds exactly one character.
    pub fn get_char(&self, key: &str, default: char) -> char {
        match self.shared().borrow().get(key) {
            Some(Value::Char(c)) => *c,
            Some(Value::String(s)) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c,
                    _ => default,
                }
            }
            _ => default,
        }
    }

    /// Returns the value under `key` as text.
    ///
    /// Every present value has a canonical text form (see [`Value`]'s
    /// `Display`), so this returns `None` only when the key is absent.
    pub fn get_string(&self, key: &str) -> Option<String> {
        match self.shared().borrow().get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(value) => Some(value.to_string()),
            None => None,
        }
    }

    /// Returns the value under `key` as a `bool`, or `default`.
    ///
    /// Text is true when it equals `"true"` ignoring ASCII case, and false
    /// otherwise; it never falls back to `default`.
    pub fn get_boolean(&self, key: &str, default: bool) -> bool {
        match self.shared().borrow().get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => default,
        }
    }

    /// Returns the value under `key` as a member of enumeration `E`.
    ///
    /// A stored member of `E` is returned as is, and text is resolved by exact
    /// member name. Text that names no member is a
    /// [`DocumentError::UnknownSymbol`]. Any other value, or a missing key,
    /// yields `Ok(None)`.
    pub fn get_enum<E: Symbol>(&self, key: &str) -> Result<Option<E>> {
        match self.shared().borrow().get(key) {
            Some(Value::Symbol(symbol)) if symbol.is::<E>() => Ok(symbol.get::<E>()),
            Some(Value::String(s)) => match E::from_name(s) {
                Some(member) => Ok(Some(member)),
                None => {
                    debug!(key, name = %s, "text names no member of {}", type_name::<E>());
                    Err(DocumentError::UnknownSymbol {
                        type_name: type_name::<E>(),
                        name: s.clone(),
                    })
                }
            },
            _ => Ok(None),
        }
    }

    /// Returns the nested document under `key`.
    ///
    /// A raw nested map is wrapped as a view over the same storage, and the
    /// wrapper replaces the raw map under `key`. While a view of this
    /// document is alive the wrapper is returned but not stored. Scalars,
    /// lists and missing keys yield `None`.
    pub fn get_document(&self, key: &str) -> Option<Document> {
        let raw = match self.shared().borrow().get(key) {
            Some(Value::Document(doc)) => return Some(doc.clone()),
            Some(Value::Typed(typed)) => return Some(typed.document().clone()),
            Some(Value::Map(map)) => map.clone(),
            _ => return None,
        };
        let doc = Document::view(&raw);
        if self.replace(key, Value::Document(doc.clone())) {
            trace!(key, "wrapped raw map as document");
        }
        Some(doc)
    }

    /// Returns the nested value under `key` as subtype `T`.
    ///
    /// An existing `T` instance is returned unchanged. A map-like value
    /// (raw map, document, or a different subtype) is handed to
    /// [`DocumentType::from_shared`]; the constructed instance then replaces
    /// the stored value so the next call returns the same `Rc`. As with
    /// [`get_document`](Self::get_document), nothing is stored while a view
    /// is alive. Scalars, lists and missing keys yield `Ok(None)`.
    ///
    /// A constructor failure is a [`DocumentError::Construction`].
    pub fn get_document_as<T: DocumentType>(&self, key: &str) -> Result<Option<Rc<T>>> {
        let source = match self.shared().borrow().get(key) {
            Some(value) => Coercible::<T>::inspect(value),
            None => return Ok(None),
        };
        let raw = match source {
            Coercible::Ready(instance) => return Ok(Some(instance)),
            Coercible::Raw(raw) => raw,
            Coercible::Incoercible => return Ok(None),
        };
        let instance = construct::<T>(raw)?;
        if self.replace(key, Value::Typed(TypedDocument::new(Rc::clone(&instance)))) {
            trace!(key, type_name = type_name::<T>(), "memoized typed document");
        }
        Ok(Some(instance))
    }

    /// Returns the list under `key` with every element coerced to `T`.
    ///
    /// Elements that are already `T` pass through, map-like elements are
    /// constructed, and anything else is dropped from the result. The stored
    /// list is left untouched. Yields `Ok(None)` when the value is not a list.
    ///
    /// A constructor failure on any element is a
    /// [`DocumentError::Construction`].
    pub fn get_list<T: DocumentType>(&self, key: &str) -> Result<Option<Vec<Rc<T>>>> {
        let sources: Vec<Coercible<T>> = match self.shared().borrow().get(key) {
            Some(Value::List(items)) => items.iter().map(Coercible::<T>::inspect).collect(),
            _ => return Ok(None),
        };
        let mut typed = Vec::with_capacity(sources.len());
        let mut dropped = 0usize;
        for source in sources {
            match source {
                Coercible::Ready(instance) => typed.push(instance),
                Coercible::Raw(raw) => typed.push(construct::<T>(raw)?),
                Coercible::Incoercible => dropped += 1,
            }
        }
        if dropped > 0 {
            debug!(key, dropped, "dropped list elements not coercible to {}", type_name::<T>());
        }
        Ok(Some(typed))
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    match unsigned {
        "NaN" => return Some(f64::NAN),
        "Infinity" => return text.parse().ok(),
        _ => {}
    }
    // Rejects the lowercase `inf`/`nan` spellings that `f64::from_str` allows.
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    text.strip_suffix(['f', 'F', 'd', 'D'])
        .unwrap_or(text)
        .parse()
        .ok()
}
