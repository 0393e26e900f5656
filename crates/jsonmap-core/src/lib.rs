//! # jsonmap-core
//!
//! An ordered, dynamically typed JSON document with best-effort typed
//! accessors, for payloads whose shape is only partly known ahead of time.
//!
//! Reads tolerate type drift: numbers stored as strings parse, booleans
//! stored as strings compare against `"true"`, and anything missing or
//! malformed falls back to the caller's default. Nested maps can be coerced
//! into application-defined document subtypes, and the constructed instance
//! is memoized in place.
//!
//! ## Quick start
//!
//! ```rust
//! use jsonmap_core::Document;
//!
//! let doc = Document::from_json_str(
//!     r#"{"event":"Signed Up","properties":{"plan":"pro","seats":"5"}}"#,
//! )
//! .unwrap();
//!
//! assert_eq!(doc.get_string("event").as_deref(), Some("Signed Up"));
//! assert_eq!(doc.get_int("missing", -1), -1);
//!
//! let properties = doc.get_document("properties").unwrap();
//! assert_eq!(properties.get_int("seats", 0), 5);
//!
//! // The wrapper is now stored under "properties".
//! let again = doc.get_document("properties").unwrap();
//! assert!(jsonmap_core::Document::ptr_eq(&properties, &again));
//! ```
//!
//! ## Modules
//!
//! - [`document`] — the ordered container and its live views
//! - [`coerce`] — typed accessors and subtype coercion
//! - [`value`] — the closed [`Value`] model and its canonical text
//! - [`subtype`] — [`DocumentType`], the constructor capability for subtypes
//! - [`symbol`] — [`Symbol`], enumerations recoverable from text
//! - [`shared`] — [`SharedMap`], the reference-counted backing storage
//! - [`external`] — conversion to and from `serde_json`
//! - [`error`] — error types
//!
//! Documents are single-threaded: the storage is `Rc`-based and not `Send`.

pub mod coerce;
pub mod document;
pub mod error;
pub mod external;
pub mod shared;
pub mod subtype;
pub mod symbol;
pub mod value;

pub use document::{Document, EntriesView, KeysView, ValuesView};
pub use error::{BoxError, DocumentError, Result};
pub use shared::SharedMap;
pub use subtype::{DocumentType, TypedDocument};
pub use symbol::{Symbol, SymbolValue};
pub use value::Value;
