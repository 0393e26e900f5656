//! Shared ordered storage behind documents and raw nested maps.
//!
//! A [`SharedMap`] is a reference-counted handle to an insertion-ordered
//! `IndexMap`. Cloning the handle never copies entries, so a [`Document`]
//! built as a view over a caller's map mutates that same map.
//!
//! [`Document`]: crate::Document

use crate::value::Value;
use indexmap::IndexMap;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Reference-counted, insertion-ordered map of string keys to [`Value`]s.
///
/// This is the "raw structure" produced by the JSON input adapter. It is not
/// thread-safe (`Rc` keeps it `!Send`), and nested borrows follow `RefCell`
/// rules: mutating while a borrow is alive panics.
#[derive(Clone, Default)]
pub struct SharedMap(Rc<RefCell<IndexMap<String, Value>>>);

impl SharedMap {
    /// Creates a handle to a new, empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrows the entries immutably.
    pub fn borrow(&self) -> Ref<'_, IndexMap<String, Value>> {
        self.0.borrow()
    }

    /// Borrows the entries mutably.
    pub fn borrow_mut(&self) -> RefMut<'_, IndexMap<String, Value>> {
        self.0.borrow_mut()
    }

    /// Borrows the entries mutably, or returns `None` while any other borrow
    /// is alive.
    pub fn try_borrow_mut(&self) -> Option<RefMut<'_, IndexMap<String, Value>>> {
        self.0.try_borrow_mut().ok()
    }

    /// Returns true if both handles point at the same storage.
    pub fn ptr_eq(a: &SharedMap, b: &SharedMap) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Clones every entry out of the map. Used where user code may run
    /// against the same storage while we iterate.
    pub(crate) fn snapshot(&self) -> Vec<(String, Value)> {
        self.borrow()
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl From<IndexMap<String, Value>> for SharedMap {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self(Rc::new(RefCell::new(entries)))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SharedMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let entries: IndexMap<String, Value> = iter
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        Self::from(entries)
    }
}

/// Map equality ignores insertion order: same keys, equal values.
impl PartialEq for SharedMap {
    fn eq(&self, other: &Self) -> bool {
        SharedMap::ptr_eq(self, other) || *self.borrow() == *other.borrow()
    }
}

impl Eq for SharedMap {}

/// Order-insensitive: the sum of per-entry hashes, so that maps which
/// compare equal hash equal regardless of insertion order.
impl Hash for SharedMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let entries = self.borrow();
        let mut sum: u64 = 0;
        for (key, value) in entries.iter() {
            let mut entry_hasher = DefaultHasher::new();
            key.hash(&mut entry_hasher);
            value.hash(&mut entry_hasher);
            sum = sum.wrapping_add(entry_hasher.finish());
        }
        state.write_usize(entries.len());
        state.write_u64(sum);
    }
}

impl fmt::Debug for SharedMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.borrow().iter()).finish()
    }
}
