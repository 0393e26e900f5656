//! Application-defined document subtypes.
//!
//! A subtype is any type that can be built over a [`SharedMap`] and hands
//! back the [`Document`] it wraps. [`Document::get_document_as`] and
//! [`Document::get_list`] construct subtypes through [`DocumentType::from_shared`]
//! and store the result as a [`TypedDocument`], so later reads return the very
//! same `Rc` instance.

use crate::document::Document;
use crate::error::{BoxError, DocumentError, Result};
use crate::shared::SharedMap;
use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

/// A document subtype that can be constructed from a raw nested map.
///
/// ```
/// use jsonmap_core::{BoxError, Document, DocumentType, SharedMap};
///
/// struct Product(Document);
///
/// impl DocumentType for Product {
///     fn from_shared(map: SharedMap) -> Result<Self, BoxError> {
///         Ok(Product(Document::view(&map)))
///     }
///
///     fn document(&self) -> &Document {
///         &self.0
///     }
/// }
///
/// let doc = Document::from_json_str(r#"{"product":{"sku":"A-1","price":"9.5"}}"#).unwrap();
/// let product = doc.get_document_as::<Product>("product").unwrap().unwrap();
/// assert_eq!(product.document().get_double("price", 0.0), 9.5);
/// ```
pub trait DocumentType: Any {
    /// Builds the subtype over `map`, sharing its storage.
    ///
    /// An `Err` here is a programming error: the caller reports it as
    /// [`DocumentError::Construction`] and never substitutes a default.
    fn from_shared(map: SharedMap) -> std::result::Result<Self, BoxError>
    where
        Self: Sized;

    /// The document this instance wraps.
    fn document(&self) -> &Document;
}

/// A constructed subtype instance as stored inside a document.
#[derive(Clone)]
pub struct TypedDocument {
    instance: Rc<dyn Any>,
    document: Document,
    type_name: &'static str,
}

impl TypedDocument {
    pub fn new<T: DocumentType>(instance: Rc<T>) -> Self {
        let document = instance.document().clone();
        Self {
            instance,
            document,
            type_name: type_name::<T>(),
        }
    }

    /// Returns true if the stored instance is a `T`.
    pub fn is<T: DocumentType>(&self) -> bool {
        self.instance.is::<T>()
    }

    /// Returns the stored instance if it is a `T`.
    pub fn downcast<T: DocumentType>(&self) -> Option<Rc<T>> {
        Rc::clone(&self.instance).downcast::<T>().ok()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if both point at the same instance.
    pub fn ptr_eq(a: &TypedDocument, b: &TypedDocument) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&a.instance), Rc::as_ptr(&b.instance))
    }
}

impl fmt::Debug for TypedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedDocument")
            .field("type", &self.type_name)
            .field("document", &self.document)
            .finish()
    }
}

/// Outcome of inspecting a stored value against a subtype.
pub(crate) enum Coercible<T> {
    /// Already an instance of the subtype.
    Ready(Rc<T>),
    /// A map-like value the subtype can be built over.
    Raw(SharedMap),
    Incoercible,
}

impl<T: DocumentType> Coercible<T> {
    pub(crate) fn inspect(value: &crate::Value) -> Self {
        use crate::Value;
        match value {
            Value::Typed(typed) => match typed.downcast::<T>() {
                Some(instance) => Coercible::Ready(instance),
                None => Coercible::Raw(typed.document().shared().clone()),
            },
            Value::Document(doc) => Coercible::Raw(doc.shared().clone()),
            Value::Map(map) => Coercible::Raw(map.clone()),
            _ => Coercible::Incoercible,
        }
    }
}

/// Runs the subtype constructor, turning its failure into a contract error.
pub(crate) fn construct<T: DocumentType>(map: SharedMap) -> Result<Rc<T>> {
    match T::from_shared(map) {
        Ok(instance) => Ok(Rc::new(instance)),
        Err(source) => {
            tracing::debug!(type_name = type_name::<T>(), "document subtype construction failed");
            Err(DocumentError::Construction {
                type_name: type_name::<T>(),
                source,
            })
        }
    }
}
