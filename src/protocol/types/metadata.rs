//! Column metadata as reported by the describe collaborator.
//!
//! One `ColumnMetadata` describes a table/view column, an object-type
//! attribute, or the element of a collection type.

use crate::error::Result;

use super::oracle_type::OracleType;

/// Column descriptor filled in by `Catalog::describe_column`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMetadata {
    /// Column or attribute name.
    pub name: String,
    /// Oracle data type number.
    pub oracle_type: u8,
    /// Numeric precision.
    pub precision: i8,
    /// Numeric scale.
    pub scale: i8,
    /// Maximum size in bytes.
    pub max_size: u32,
    /// Whether NULL values are allowed.
    pub nullable: bool,
    /// Qualified name of the user-defined type, for object and REF columns.
    pub type_name: Option<String>,
}

impl ColumnMetadata {
    /// Create new column metadata with minimal info.
    pub fn new(name: impl Into<String>, oracle_type: u8) -> Self {
        Self {
            name: name.into(),
            oracle_type,
            precision: 0,
            scale: 0,
            max_size: 0,
            nullable: true,
            type_name: None,
        }
    }

    /// Set precision and scale.
    pub fn with_precision(mut self, precision: i8, scale: i8) -> Self {
        self.precision = precision;
        self.scale = scale;
        self
    }

    /// Set the maximum size in bytes.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set nullability.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Set the user-defined type name.
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Typed view of this column's data type.
    pub fn data_type(&self) -> Result<OracleType> {
        OracleType::from_metadata(self)
    }
}
