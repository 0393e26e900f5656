//! The ordered document container.
//!
//! A [`Document`] is a handle to a [`SharedMap`]. Every operation takes
//! `&self`: handles are cheap to clone, and two handles over the same storage
//! observe each other's writes. Iteration always follows insertion order, and
//! overwriting a key keeps its original position.

use crate::shared::SharedMap;
use crate::value::Value;
use indexmap::IndexMap;
use std::cell::Ref;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// An ordered, mutable key-to-value document with typed accessors.
///
/// The scalar and nested accessors live in the coercion module; this type
/// provides the plain container contract.
#[derive(Clone, Default)]
pub struct Document {
    map: SharedMap,
}

impl Document {
    /// Creates an empty document that owns fresh storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document over `map` without copying it. Writes through the
    /// document land in the caller's map.
    pub fn view(map: &SharedMap) -> Self {
        Self { map: map.clone() }
    }

    /// The backing storage.
    pub fn shared(&self) -> &SharedMap {
        &self.map
    }

    /// Returns true if both documents share the same storage.
    pub fn ptr_eq(a: &Document, b: &Document) -> bool {
        SharedMap::ptr_eq(&a.map, &b.map)
    }

    pub fn len(&self) -> usize {
        self.map.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.borrow().is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.borrow().contains_key(key)
    }

    /// Returns true if any entry's value equals `value`.
    pub fn contains_value(&self, value: &Value) -> bool {
        self.map.borrow().values().any(|stored| stored == value)
    }

    /// Returns a clone of the value under `key`. Nested maps are cloned as
    /// handles, so writes to a returned map reach this document.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.map.borrow().get(key).cloned()
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn put(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.map.borrow_mut().insert(key.into(), value.into())
    }

    /// Chainable form of [`put`](Self::put).
    ///
    /// ```
    /// use jsonmap_core::Document;
    ///
    /// let doc = Document::new();
    /// doc.put_value("event", "Order Completed")
    ///     .put_value("revenue", 42.5)
    ///     .put_value("coupon", "7");
    /// assert_eq!(doc.len(), 3);
    /// assert_eq!(doc.get_int("coupon", 0), 7);
    /// ```
    pub fn put_value(&self, key: impl Into<String>, value: impl Into<Value>) -> &Self {
        self.put(key, value);
        self
    }

    /// Copies every entry of `other` into this document.
    pub fn put_all(&self, other: &Document) {
        // `other` may share our storage; take its entries before borrowing mutably.
        let entries = other.map.snapshot();
        self.map.borrow_mut().extend(entries);
    }

    /// Inserts every `(key, value)` pair in iteration order. Takes `&self`
    /// like the other mutators; `Extend` delegates here.
    pub fn put_entries<K, V>(&self, entries: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        // Collect first: the iterator may read this document.
        let pairs: Vec<(String, Value)> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self.map.borrow_mut().extend(pairs);
    }

    /// Removes `key`, returning its value. Remaining entries keep their order.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.map.borrow_mut().shift_remove(key)
    }

    pub fn clear(&self) {
        self.map.borrow_mut().clear();
    }

    /// Keeps only the entries for which `keep` returns true.
    pub fn retain(&self, mut keep: impl FnMut(&str, &mut Value) -> bool) {
        self.map.borrow_mut().retain(|key, value| keep(key.as_str(), value));
    }

    /// Live view of the keys. The view holds a shared borrow of the storage,
    /// so writing to the document while it is alive panics. Reads, including
    /// [`get_document`](Self::get_document), are fine; they skip memoizing.
    pub fn keys(&self) -> KeysView<'_> {
        KeysView {
            entries: self.map.borrow(),
        }
    }

    /// Live view of the values.
    pub fn values(&self) -> ValuesView<'_> {
        ValuesView {
            entries: self.map.borrow(),
        }
    }

    /// Live view of the `(key, value)` pairs.
    pub fn entries(&self) -> EntriesView<'_> {
        EntriesView {
            entries: self.map.borrow(),
        }
    }

    /// Overwrites the value of an existing key in place. Used by the
    /// memoizing accessors; does nothing if the key has gone away.
    ///
    /// Returns false without writing while a view or other borrow of the
    /// storage is alive, so reads stay infallible during iteration.
    pub(crate) fn replace(&self, key: &str, value: Value) -> bool {
        let Some(mut entries) = self.map.try_borrow_mut() else {
            debug!(key, "storage is borrowed, result not memoized");
            return false;
        };
        match entries.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Borrowed view of a document's keys, in insertion order.
pub struct KeysView<'a> {
    entries: Ref<'a, IndexMap<String, Value>>,
}

impl KeysView<'_> {
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Borrowed view of a document's values, in insertion order.
pub struct ValuesView<'a> {
    entries: Ref<'a, IndexMap<String, Value>>,
}

impl ValuesView<'_> {
    pub fn iter(&self) -> indexmap::map::Values<'_, String, Value> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.entries.values().any(|stored| stored == value)
    }
}

/// Borrowed view of a document's entries, in insertion order.
pub struct EntriesView<'a> {
    entries: Ref<'a, IndexMap<String, Value>>,
}

impl EntriesView<'_> {
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }
}

impl<'v, 'a> IntoIterator for &'v EntriesView<'a> {
    type Item = (&'v String, &'v Value);
    type IntoIter = indexmap::map::Iter<'v, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<'v, 'a> IntoIterator for &'v ValuesView<'a> {
    type Item = &'v Value;
    type IntoIter = indexmap::map::Values<'v, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}

/// Two documents are equal when their entries are equal, regardless of
/// insertion order.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.map, f)
    }
}

/// Compact JSON text of the document.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_external_object())
    }
}

impl From<SharedMap> for Document {
    fn from(map: SharedMap) -> Self {
        Self { map }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Document {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_entries(iter);
    }
}
