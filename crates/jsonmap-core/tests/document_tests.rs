/// Container contract tests for `Document`.
///
/// Covers the plain ordered-map operations: insertion order, overwrite
/// position, removal, bulk insertion, shared views over caller storage, the
/// live key/value/entry views, and structural equality and hashing.
use jsonmap_core::{Document, SharedMap, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn keys_of(doc: &Document) -> Vec<String> {
    doc.keys().iter().map(str::to_string).collect()
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// ============================================================================
// 1. Basic operations
// ============================================================================

#[test]
fn new_document_is_empty() {
    let doc = Document::new();
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
    assert_eq!(doc.get("anything"), None);
}

#[test]
fn put_and_get_round_values() {
    let doc = Document::new();
    assert_eq!(doc.put("name", "Alice"), None);
    doc.put("age", 30);

    assert_eq!(doc.len(), 2);
    assert!(doc.contains_key("name"));
    assert!(!doc.contains_key("email"));
    assert_eq!(doc.get("name"), Some(Value::from("Alice")));
    assert_eq!(doc.get("age"), Some(Value::Int(30)));
}

#[test]
fn put_returns_previous_value() {
    let doc = Document::new();
    doc.put("k", 1);
    assert_eq!(doc.put("k", 2), Some(Value::Int(1)));
    assert_eq!(doc.get("k"), Some(Value::Int(2)));
}

#[test]
fn contains_value_uses_value_equality() {
    let doc = Document::new();
    doc.put_value("a", "x").put_value("b", 2.5);
    assert!(doc.contains_value(&Value::from("x")));
    assert!(doc.contains_value(&Value::Float(2.5)));
    assert!(!doc.contains_value(&Value::Int(2)));
}

#[test]
fn put_value_chains() {
    let doc = Document::new();
    doc.put_value("a", 1).put_value("b", 2).put_value("c", 3);
    assert_eq!(keys_of(&doc), vec!["a", "b", "c"]);
}

#[test]
fn remove_returns_value_and_keeps_order() {
    let doc = Document::new();
    doc.put_value("a", 1).put_value("b", 2).put_value("c", 3);

    assert_eq!(doc.remove("b"), Some(Value::Int(2)));
    assert_eq!(doc.remove("b"), None);
    assert_eq!(keys_of(&doc), vec!["a", "c"]);
}

#[test]
fn clear_removes_everything() {
    let doc = Document::new();
    doc.put_value("a", 1).put_value("b", 2);
    doc.clear();
    assert!(doc.is_empty());
}

#[test]
fn retain_filters_entries() {
    let doc = Document::new();
    doc.put_value("keep", 1).put_value("drop", 2).put_value("also", 3);
    doc.retain(|key, _| key != "drop");
    assert_eq!(keys_of(&doc), vec!["keep", "also"]);
}

// ============================================================================
// 2. Insertion order
// ============================================================================

#[test]
fn iteration_follows_insertion_not_key_order() {
    let doc = Document::new();
    doc.put_value("zeta", 1)
        .put_value("alpha", 2)
        .put_value("mid", 3);
    assert_eq!(keys_of(&doc), vec!["zeta", "alpha", "mid"]);
}

#[test]
fn overwrite_keeps_original_position() {
    let doc = Document::new();
    doc.put_value("first", 1)
        .put_value("second", 2)
        .put_value("third", 3);
    doc.put("first", "replaced");

    assert_eq!(keys_of(&doc), vec!["first", "second", "third"]);
    assert_eq!(doc.get("first"), Some(Value::from("replaced")));
}

#[test]
fn parsed_json_keeps_source_order() {
    let doc = Document::from_json_str(r#"{"b":1,"a":2,"c":{"y":1,"x":2}}"#).unwrap();
    assert_eq!(keys_of(&doc), vec!["b", "a", "c"]);
    let nested = doc.get_document("c").unwrap();
    assert_eq!(keys_of(&nested), vec!["y", "x"]);
}

// ============================================================================
// 3. Bulk insertion
// ============================================================================

#[test]
fn put_all_copies_entries_and_overwrites_in_place() {
    let target = Document::new();
    target.put_value("a", 1).put_value("b", 2);
    let source = Document::new();
    source.put_value("b", 20).put_value("c", 30);

    target.put_all(&source);

    assert_eq!(keys_of(&target), vec!["a", "b", "c"]);
    assert_eq!(target.get("b"), Some(Value::Int(20)));
    assert_eq!(source.len(), 2, "source is not modified");
}

#[test]
fn put_all_from_same_storage_is_a_no_op() {
    let doc = Document::new();
    doc.put_value("a", 1);
    let alias = doc.clone();
    doc.put_all(&alias);
    assert_eq!(doc.len(), 1);
}

#[test]
fn put_entries_takes_a_shared_reference() {
    let doc = Document::new();
    doc.put_value("a", 1);
    doc.put_entries(vec![("b", 2), ("a", 10)]);
    assert_eq!(keys_of(&doc), vec!["a", "b"]);
    assert_eq!(doc.get("a"), Some(Value::Int(10)));
}

#[test]
fn put_entries_source_may_read_the_same_document() {
    let doc = Document::new();
    doc.put_value("a", 1).put_value("b", 2);
    doc.put_entries(
        ["a", "b"]
            .into_iter()
            .map(|key| (format!("{key}_copy"), doc.get_int(key, 0))),
    );
    assert_eq!(keys_of(&doc), vec!["a", "b", "a_copy", "b_copy"]);
    assert_eq!(doc.get("b_copy"), Some(Value::Int(2)));
}

#[test]
fn extend_and_collect() {
    let mut doc: Document = vec![("a", 1), ("b", 2)].into_iter().collect();
    doc.extend(vec![("c", 3)]);
    assert_eq!(keys_of(&doc), vec!["a", "b", "c"]);
}

// ============================================================================
// 4. Shared storage
// ============================================================================

#[test]
fn view_shares_the_callers_map() {
    let raw = SharedMap::new();
    raw.borrow_mut().insert("seed".to_string(), Value::Int(1));

    let doc = Document::view(&raw);
    doc.put("added", true);

    assert!(raw.borrow().contains_key("added"));
    assert_eq!(doc.get("seed"), Some(Value::Int(1)));
    assert!(SharedMap::ptr_eq(doc.shared(), &raw));
}

#[test]
fn cloned_handles_see_each_others_writes() {
    let doc = Document::new();
    let alias = doc.clone();
    alias.put("k", "v");
    assert_eq!(doc.get("k"), Some(Value::from("v")));
    assert!(Document::ptr_eq(&doc, &alias));
}

#[test]
fn nested_map_returned_by_get_is_a_handle() {
    let doc = Document::from_json_str(r#"{"inner":{"a":1}}"#).unwrap();
    let inner = doc.get("inner").unwrap();
    let map = inner.as_shared().unwrap();
    map.borrow_mut().insert("b".to_string(), Value::Int(2));

    assert_eq!(doc.get_document("inner").unwrap().len(), 2);
}

// ============================================================================
// 5. Views
// ============================================================================

#[test]
fn views_reflect_current_contents() {
    let doc = Document::new();
    doc.put_value("a", 1).put_value("b", "two");

    {
        let keys = doc.keys();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains("a"));
        assert!(!keys.contains("z"));
    }

    doc.put("c", Value::Null);

    let values = doc.values();
    assert_eq!(values.len(), 3);
    assert!(values.contains(&Value::from("two")));
    let collected: Vec<&Value> = values.iter().collect();
    assert_eq!(collected[2], &Value::Null);
}

#[test]
fn entries_view_iterates_pairs_in_order() {
    let doc = Document::new();
    doc.put_value("x", 1).put_value("y", 2);

    let entries = doc.entries();
    let pairs: Vec<(String, i64)> = entries
        .iter()
        .map(|(k, v)| (k.clone(), v.as_i64().unwrap()))
        .collect();
    assert_eq!(pairs, vec![("x".to_string(), 1), ("y".to_string(), 2)]);
    assert_eq!(entries.get("y"), Some(&Value::Int(2)));
}

// ============================================================================
// 6. Equality and hashing
// ============================================================================

#[test]
fn equality_ignores_insertion_order() {
    let a = Document::new();
    a.put_value("x", 1).put_value("y", 2);
    let b = Document::new();
    b.put_value("y", 2).put_value("x", 1);

    assert_eq!(a, b);
    assert_eq!(hash_of(&a), hash_of(&b));
}

#[test]
fn different_values_are_not_equal() {
    let a = Document::new();
    a.put("x", 1);
    let b = Document::new();
    b.put("x", 1.0);
    assert_ne!(a, b, "integer 1 and float 1.0 are different values");
}

#[test]
fn raw_map_equals_wrapping_document() {
    let doc = Document::from_json_str(r#"{"n":{"a":1}}"#).unwrap();
    let raw = doc.get("n").unwrap();
    let wrapped = Value::Document(doc.get_document("n").unwrap());
    assert_eq!(raw, wrapped);
    assert_eq!(hash_of(&raw), hash_of(&wrapped));
}

#[test]
fn nan_floats_compare_equal() {
    let a = Document::new();
    a.put("x", f64::NAN);
    let b = Document::new();
    b.put("x", f64::NAN);
    assert_eq!(a, b);
}

#[test]
fn documents_work_as_hash_set_members() {
    let mut set = std::collections::HashSet::new();
    let a = Document::new();
    a.put_value("k", "v");
    let b = Document::new();
    b.put_value("k", "v");
    set.insert(a);
    assert!(set.contains(&b));
}
