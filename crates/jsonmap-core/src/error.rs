//! Error types for document construction and coercion.
//!
//! Only programming errors surface here. Malformed or missing data never
//! produces an error: the scalar accessors fall back to their defaults instead.

use thiserror::Error;

/// Boxed error returned by a subtype constructor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building or coercing a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Text stored under a key did not name any member of the requested
    /// enumeration.
    #[error("No symbol named '{name}' in {type_name}")]
    UnknownSymbol {
        type_name: &'static str,
        name: String,
    },

    /// A document subtype constructor rejected the raw structure it was given.
    #[error("Could not construct {type_name} from a raw map: {source}")]
    Construction {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    /// A precondition on a constructor argument was violated.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input text was not valid JSON.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl DocumentError {
    /// Returns true for the errors that signal a broken contract between the
    /// document and the application types it coerces into.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            DocumentError::UnknownSymbol { .. } | DocumentError::Construction { .. }
        )
    }
}

/// Convenience alias used throughout jsonmap-core.
pub type Result<T> = std::result::Result<T, DocumentError>;
