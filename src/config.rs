//! Type-info resolution options.

use crate::protocol::constants::{MAX_SYNONYM_DEPTH, OBJ_NAME_SIZE};
use crate::protocol::describe::DescribeRequest;

/// What to do with an identifier longer than `max_identifier_len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierOverflow {
    /// Keep the leading characters and log a warning.
    #[default]
    Truncate,
    /// Fail with `Error::IdentifierTooLong`.
    Reject,
}

/// Options for one connection's type-info resolution.
#[derive(Debug, Clone)]
pub struct TypeInfoOptions {
    /// Maximum length of each name part, in characters.
    pub max_identifier_len: usize,
    /// Overflow policy for name parts.
    pub identifier_overflow: IdentifierOverflow,
    /// Maximum number of synonyms followed in one resolution.
    pub max_synonym_depth: usize,
    /// Include public synonyms in describe requests.
    pub public_synonyms: bool,
}

impl TypeInfoOptions {
    /// Create options with the catalog defaults.
    pub fn new() -> Self {
        Self {
            max_identifier_len: OBJ_NAME_SIZE,
            identifier_overflow: IdentifierOverflow::Truncate,
            max_synonym_depth: MAX_SYNONYM_DEPTH,
            public_synonyms: true,
        }
    }

    /// Set the maximum identifier length.
    ///
    /// # Example
    ///
    /// ```
    /// use oracle_typeinfo::TypeInfoOptions;
    ///
    /// let options = TypeInfoOptions::new().with_max_identifier_len(30);
    /// assert_eq!(options.max_identifier_len, 30);
    /// ```
    pub fn with_max_identifier_len(mut self, max_len: usize) -> Self {
        self.max_identifier_len = max_len;
        self
    }

    /// Set the identifier overflow policy.
    pub fn with_identifier_overflow(mut self, overflow: IdentifierOverflow) -> Self {
        self.identifier_overflow = overflow;
        self
    }

    /// Set the maximum synonym chain depth.
    pub fn with_max_synonym_depth(mut self, depth: usize) -> Self {
        self.max_synonym_depth = depth;
        self
    }

    /// Include or exclude public synonyms from describe requests.
    pub fn with_public_synonyms(mut self, public: bool) -> Self {
        self.public_synonyms = public;
        self
    }

    pub(crate) fn describe_request(&self) -> DescribeRequest {
        DescribeRequest {
            public_scope: self.public_synonyms,
        }
    }
}

impl Default for TypeInfoOptions {
    fn default() -> Self {
        Self::new()
    }
}
