//! Error types for type-info resolution.

use crate::protocol::describe::ObjectKind;
use crate::typeinfo::TypeKind;
use thiserror::Error;

/// Result type alias for type-info operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for type-info resolution and the metadata cache.
#[derive(Error, Debug)]
pub enum Error {
    /// A required argument was missing or out of range.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Identifier longer than the configured bound (reject policy only).
    #[error("Identifier '{identifier}' exceeds {max_len} characters")]
    IdentifierTooLong { identifier: String, max_len: usize },

    /// The catalog described an object that has no type info.
    #[error("Unsupported object kind {kind:?} for '{name}'")]
    UnsupportedObject { name: String, kind: ObjectKind },

    /// The described object is not of the requested kind.
    #[error("Type info '{name}' has wrong type: expected {expected}, got {actual}")]
    TypeMismatch {
        name: String,
        expected: TypeKind,
        actual: TypeKind,
    },

    /// A remote describe step failed.
    #[error("Describe of '{name}' failed: {source}")]
    Describe {
        name: String,
        #[source]
        source: Box<Error>,
    },

    /// Protocol error reported by a catalog.
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    /// Oracle database error.
    #[error("ORA-{code:05}: {message}")]
    Oracle { code: u32, message: String },

    /// Allocation for the column or offset arrays failed.
    #[error("Out of memory allocating {count} {what}")]
    OutOfMemory { what: &'static str, count: usize },

    /// A synonym chain leads back to a name already visited.
    #[error("Synonym '{name}' is part of a cycle: {}", .chain.join(" -> "))]
    SynonymCycle { name: String, chain: Vec<String> },

    /// A synonym chain is longer than allowed.
    #[error("Synonym chain starting at '{name}' exceeds {max_depth} levels")]
    SynonymDepthExceeded { name: String, max_depth: usize },

    /// Column index out of bounds.
    #[error("Column index {index} out of bounds (columns: {count})")]
    ColumnIndexOutOfBounds { index: usize, count: usize },

    /// Unsupported Oracle data type.
    #[error("Unsupported Oracle data type: {type_num}")]
    UnsupportedType { type_num: u8 },
}

impl Error {
    /// Create a protocol error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Create an Oracle database error.
    pub fn oracle(code: u32, message: impl Into<String>) -> Self {
        Self::Oracle {
            code,
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Wrap a catalog failure with the name being described.
    pub(crate) fn describe(name: &str, source: Error) -> Self {
        Self::Describe {
            name: name.to_string(),
            source: Box::new(source),
        }
    }
}
