//! The describe-any contract consumed by type-info resolution.
//!
//! A `Catalog` is the remote end of a describe request: it turns a qualified
//! object name into a parameter handle, and then answers attribute queries on
//! that handle. Only `describe_any` and `type_by_ref` may round-trip to the
//! server; the attribute getters read data the describe already returned.

use std::fmt;
use std::future::Future;

use bytes::Bytes;

use crate::error::Result;
use crate::protocol::constants::*;
use crate::protocol::types::ColumnMetadata;

/// Kind of object a describe resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Table,
    View,
    TableAlias,
    Type,
    Synonym,
    /// Any other catalog object (procedure, package, sequence, ...).
    Other(u8),
}

impl ObjectKind {
    /// Map a raw describe parameter type.
    pub fn from_raw(ptype: u8) -> Self {
        match ptype {
            PTYPE_TABLE => ObjectKind::Table,
            PTYPE_VIEW => ObjectKind::View,
            PTYPE_TABLE_ALIAS => ObjectKind::TableAlias,
            PTYPE_TYPE => ObjectKind::Type,
            PTYPE_SYN => ObjectKind::Synonym,
            other => ObjectKind::Other(other),
        }
    }

    /// Raw describe parameter type.
    pub fn raw(&self) -> u8 {
        match self {
            ObjectKind::Table => PTYPE_TABLE,
            ObjectKind::View => PTYPE_VIEW,
            ObjectKind::TableAlias => PTYPE_TABLE_ALIAS,
            ObjectKind::Type => PTYPE_TYPE,
            ObjectKind::Synonym => PTYPE_SYN,
            ObjectKind::Other(raw) => *raw,
        }
    }
}

/// Typecode of a user-defined type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCode {
    Object,
    /// Named collection; the element kind is a separate collection typecode.
    NamedCollection,
    Varray,
    NestedTable,
    Ref,
    Opaque,
    Other(u16),
}

impl TypeCode {
    pub fn from_raw(code: u16) -> Self {
        match code {
            TYPECODE_OBJECT => TypeCode::Object,
            TYPECODE_NAMED_COLLECTION => TypeCode::NamedCollection,
            TYPECODE_VARRAY => TypeCode::Varray,
            TYPECODE_TABLE => TypeCode::NestedTable,
            TYPECODE_REF => TypeCode::Ref,
            TYPECODE_OPAQUE => TypeCode::Opaque,
            other => TypeCode::Other(other),
        }
    }

    pub fn raw(&self) -> u16 {
        match self {
            TypeCode::Object => TYPECODE_OBJECT,
            TypeCode::NamedCollection => TYPECODE_NAMED_COLLECTION,
            TypeCode::Varray => TYPECODE_VARRAY,
            TypeCode::NestedTable => TYPECODE_TABLE,
            TypeCode::Ref => TYPECODE_REF,
            TypeCode::Opaque => TYPECODE_OPAQUE,
            TypeCode::Other(raw) => *raw,
        }
    }

    /// Whether the type's children are a single collection element.
    pub fn is_collection(&self) -> bool {
        matches!(self, TypeCode::NamedCollection)
    }
}

/// Which child list of a described object to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildList {
    /// Columns of a table or view.
    Columns,
    /// Attributes of an object type.
    TypeAttributes,
}

/// How a child attribute is described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnContext {
    TableColumn,
    TypeAttribute,
    CollectionElement,
}

impl ChildList {
    /// Description context for the children of this list.
    pub fn context(&self) -> ColumnContext {
        match self {
            ChildList::Columns => ColumnContext::TableColumn,
            ChildList::TypeAttributes => ColumnContext::TypeAttribute,
        }
    }
}

/// Options attached to a describe-any request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescribeRequest {
    /// Search public synonyms as well as the current schema.
    pub public_scope: bool,
}

impl Default for DescribeRequest {
    fn default() -> Self {
        Self { public_scope: true }
    }
}

/// Schema, object and database link a synonym points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTarget {
    pub schema: String,
    pub object: String,
    pub link: Option<String>,
}

impl SynonymTarget {
    pub fn new(schema: impl Into<String>, object: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            object: object.into(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// REF to a type definition, as returned in a describe of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef(pub Bytes);

/// Resolved type definition (the catalog's type descriptor object).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeHandle {
    /// Object identifier of the type.
    pub oid: Bytes,
    /// Type version.
    pub version: u32,
}

impl fmt::Display for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.oid.iter() {
            write!(f, "{:02X}", b)?;
        }
        write!(f, "/v{}", self.version)
    }
}

/// Remote describe service for one session.
///
/// `Param` is the handle to a described object or to one of its child lists.
pub trait Catalog: Send {
    /// Handle to a describe result.
    type Param: Send + Sync;

    /// Describe a qualified object name of any kind.
    fn describe_any(
        &mut self,
        name: &str,
        request: DescribeRequest,
    ) -> impl Future<Output = Result<Self::Param>> + Send;

    /// Load a full type definition from a type REF.
    fn type_by_ref(&mut self, type_ref: &TypeRef)
        -> impl Future<Output = Result<TypeHandle>> + Send;

    /// Kind of the described object.
    fn object_kind(&self, param: &Self::Param) -> Result<ObjectKind>;

    /// REF to the type definition (types only).
    fn type_ref(&self, param: &Self::Param) -> Result<TypeRef>;

    /// Whether the type is a system-predefined type (types only).
    fn is_predefined_type(&self, param: &Self::Param) -> Result<bool>;

    /// Typecode of a user-defined type. Not allowed on predefined types.
    fn typecode(&self, param: &Self::Param) -> Result<TypeCode>;

    /// Typecode of a named collection (varray or nested table).
    fn collection_typecode(&self, param: &Self::Param) -> Result<TypeCode>;

    /// Handle to one of the object's child lists.
    fn child_list(&self, param: &Self::Param, list: ChildList) -> Result<Self::Param>;

    /// Number of entries in one of the object's child lists.
    fn child_count(&self, param: &Self::Param, list: ChildList) -> Result<u16>;

    /// Target of a synonym.
    fn synonym_target(&self, param: &Self::Param) -> Result<SynonymTarget>;

    /// Describe the child at a 1-based ordinal of `source`.
    fn describe_column(
        &self,
        source: &Self::Param,
        ordinal: u16,
        context: ColumnContext,
    ) -> Result<ColumnMetadata>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_kind_raw() {
        assert_eq!(ObjectKind::from_raw(PTYPE_VIEW), ObjectKind::View);
        assert_eq!(ObjectKind::from_raw(PTYPE_TABLE_ALIAS), ObjectKind::TableAlias);
        assert_eq!(ObjectKind::from_raw(PTYPE_SEQ), ObjectKind::Other(PTYPE_SEQ));
        assert_eq!(ObjectKind::Other(PTYPE_PKG).raw(), PTYPE_PKG);
    }

    #[test]
    fn test_typecode_collection() {
        assert!(TypeCode::from_raw(TYPECODE_NAMED_COLLECTION).is_collection());
        assert!(!TypeCode::Object.is_collection());
        assert_eq!(TypeCode::from_raw(TYPECODE_VARRAY), TypeCode::Varray);
    }

    #[test]
    fn test_type_handle_display() {
        let handle = TypeHandle {
            oid: Bytes::from_static(&[0x0A, 0xFF]),
            version: 3,
        };
        assert_eq!(handle.to_string(), "0AFF/v3");
    }
}
