//! Type-info descriptors.
//!
//! A `TypeInfo` is the resolved shape of one table, view or user-defined
//! type: its canonical identity, column list and memory layout. Descriptors
//! are created by `Connection::get_type_info`, owned by the connection's
//! cache, and shared with callers until released.

pub mod cache;
pub mod layout;
pub mod name;
pub mod resolve;

use std::fmt;

use crate::connection::ConnectionId;
use crate::error::{Error, Result};
use crate::protocol::constants::{TIF_TABLE, TIF_TYPE, TIF_VIEW};
use crate::protocol::describe::{TypeCode, TypeHandle};
use crate::protocol::types::ColumnMetadata;

pub use layout::{ColumnMapping, Layout, OFFSET_UNSET};
pub use name::ObjectName;

use name::eq_ignore_case;

/// Kind of a resolved descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Table,
    View,
    /// User-defined object or collection type.
    Type,
}

impl TypeKind {
    /// Parse a public kind value (table = 1, view = 2, type = 3).
    pub fn from_raw(raw: u32) -> Result<Self> {
        match raw {
            TIF_TABLE => Ok(TypeKind::Table),
            TIF_VIEW => Ok(TypeKind::View),
            TIF_TYPE => Ok(TypeKind::Type),
            other => Err(Error::invalid_argument(format!(
                "invalid type info kind {}",
                other
            ))),
        }
    }

    /// Public kind value.
    pub fn raw(&self) -> u32 {
        match self {
            TypeKind::Table => TIF_TABLE,
            TypeKind::View => TIF_VIEW,
            TypeKind::Type => TIF_TYPE,
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Table => write!(f, "TABLE"),
            TypeKind::View => write!(f, "VIEW"),
            TypeKind::Type => write!(f, "TYPE"),
        }
    }
}

/// Kind-specific part of a descriptor, fixed when it is built.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    Table,
    View,
    Object(ObjectType),
}

impl TypeShape {
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeShape::Table => TypeKind::Table,
            TypeShape::View => TypeKind::View,
            TypeShape::Object(_) => TypeKind::Type,
        }
    }
}

/// Details of a user-defined type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectType {
    /// Resolved type definition.
    pub handle: TypeHandle,
    /// Typecode; `None` for system-predefined types.
    pub typecode: Option<TypeCode>,
    /// Collection typecode, for named collections.
    pub collection_typecode: Option<TypeCode>,
}

/// Resolved metadata for one catalog object.
#[derive(Debug)]
pub struct TypeInfo {
    connection_id: ConnectionId,
    name: ObjectName,
    shape: TypeShape,
    layout: Layout,
}

impl TypeInfo {
    pub(crate) fn new(
        connection_id: ConnectionId,
        name: ObjectName,
        shape: TypeShape,
        layout: Layout,
    ) -> Self {
        Self {
            connection_id,
            name,
            shape,
            layout,
        }
    }

    /// Kind of the object.
    pub fn kind(&self) -> TypeKind {
        self.shape.kind()
    }

    /// Kind-specific details.
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    /// Connection this descriptor was resolved on.
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Canonical identity.
    pub fn object_name(&self) -> &ObjectName {
        &self.name
    }

    /// Canonical object name.
    pub fn name(&self) -> &str {
        &self.name.object
    }

    /// Canonical schema name, empty if the object was not qualified.
    pub fn schema(&self) -> &str {
        &self.name.schema
    }

    /// Database link, if the object is remote.
    pub fn link(&self) -> Option<&str> {
        self.name.link.as_deref()
    }

    /// `schema.object[@link]`.
    pub fn full_name(&self) -> String {
        self.name.qualified()
    }

    pub fn column_count(&self) -> usize {
        self.layout.columns.len()
    }

    pub fn columns(&self) -> &[ColumnMetadata] {
        &self.layout.columns
    }

    /// Column at a 1-based index.
    pub fn column(&self, index: usize) -> Result<&ColumnMetadata> {
        let count = self.column_count();
        if index == 0 || index > count {
            return Err(Error::ColumnIndexOutOfBounds { index, count });
        }
        Ok(&self.layout.columns[index - 1])
    }

    /// Find a column's 1-based index by name (case-insensitive).
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.layout
            .columns
            .iter()
            .position(|c| eq_ignore_case(&c.name, name))
            .map(|i| i + 1)
    }

    /// Cached byte offsets, parallel to `columns()`.
    pub fn offsets(&self) -> &[i32] {
        &self.layout.offsets
    }

    /// Byte offset of the column at a 1-based index, if laid out.
    pub fn offset(&self, index: usize) -> Option<usize> {
        let offset = *self.layout.offsets.get(index.checked_sub(1)?)?;
        usize::try_from(offset).ok()
    }

    /// In-memory mapping of each column, parallel to `columns()`.
    pub fn mappings(&self) -> &[ColumnMapping] {
        &self.layout.mappings
    }

    /// Size of the materialized record.
    pub fn struct_size(&self) -> usize {
        self.layout.struct_size
    }

    /// Alignment of the materialized record.
    pub fn struct_align(&self) -> usize {
        self.layout.struct_align
    }

    /// Typecode of a user-defined type.
    pub fn typecode(&self) -> Option<TypeCode> {
        match &self.shape {
            TypeShape::Object(object) => object.typecode,
            _ => None,
        }
    }

    /// Element typecode of a collection type.
    pub fn collection_typecode(&self) -> Option<TypeCode> {
        match &self.shape {
            TypeShape::Object(object) => object.collection_typecode,
            _ => None,
        }
    }

    /// Type definition of a user-defined type.
    pub fn type_handle(&self) -> Option<&TypeHandle> {
        match &self.shape {
            TypeShape::Object(object) => Some(&object.handle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::constants::{ORA_TYPE_NUM_NUMBER, ORA_TYPE_NUM_VARCHAR};
    use crate::typeinfo::layout::lay_out;

    fn make_info() -> TypeInfo {
        let columns = vec![
            ColumnMetadata::new("ID", ORA_TYPE_NUM_NUMBER as u8).with_precision(10, 0),
            ColumnMetadata::new("NAME", ORA_TYPE_NUM_VARCHAR as u8).with_max_size(100),
        ];
        TypeInfo::new(
            ConnectionId::next(),
            ObjectName::new("HR", "EMP"),
            TypeShape::Table,
            lay_out(columns).unwrap(),
        )
    }

    #[test]
    fn test_kind_raw_values() {
        assert_eq!(TypeKind::from_raw(1).unwrap(), TypeKind::Table);
        assert_eq!(TypeKind::from_raw(3).unwrap(), TypeKind::Type);
        assert_eq!(TypeKind::View.raw(), 2);
        assert!(matches!(
            TypeKind::from_raw(7),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_column_access_is_one_based() {
        let info = make_info();
        assert_eq!(info.column_count(), 2);
        assert_eq!(info.column(1).unwrap().name, "ID");
        assert_eq!(info.column(2).unwrap().name, "NAME");
        assert!(matches!(
            info.column(0),
            Err(Error::ColumnIndexOutOfBounds { index: 0, count: 2 })
        ));
        assert!(info.column(3).is_err());
        assert_eq!(info.find_column("name"), Some(2));
        assert_eq!(info.find_column("SALARY"), None);
    }

    #[test]
    fn test_identity_accessors() {
        let info = make_info();
        assert_eq!(info.kind(), TypeKind::Table);
        assert_eq!(info.schema(), "HR");
        assert_eq!(info.name(), "EMP");
        assert_eq!(info.full_name(), "HR.EMP");
        assert_eq!(info.link(), None);
        assert!(info.type_handle().is_none());
        assert_eq!(info.offset(1), Some(0));
        assert_eq!(info.offset(0), None);
    }
}
