//! Catalog describe protocol for type-info resolution.

pub mod constants;
pub mod describe;
pub mod memory;
pub mod types;

pub use describe::{
    Catalog, ChildList, ColumnContext, DescribeRequest, ObjectKind, SynonymTarget, TypeCode,
    TypeHandle, TypeRef,
};
pub use memory::MemoryCatalog;
pub use types::{ColumnMetadata, OracleType};
