//! Type-info resolution for Oracle clients.
//!
//! Resolves table, view and user-defined type names into cached,
//! reference-counted metadata descriptors: column list, typecodes and the
//! memory layout used by binding code. Descriptors are cached per connection
//! so repeated lookups skip the describe round trip.
//!
//! # Example
//!
//! ```
//! use oracle_typeinfo::protocol::memory::MemoryCatalog;
//! use oracle_typeinfo::{ColumnMetadata, Connection, Result, TypeKind};
//!
//! async fn describe_emp() -> Result<()> {
//!     let mut catalog = MemoryCatalog::new("HR");
//!     catalog.add_table(
//!         "HR",
//!         "EMP",
//!         vec![
//!             ColumnMetadata::new("EMPNO", 2).with_precision(4, 0),
//!             ColumnMetadata::new("ENAME", 1).with_max_size(10),
//!         ],
//!     );
//!
//!     let mut conn = Connection::new(catalog);
//!     let emp = conn.get_type_info("emp", Some(TypeKind::Table)).await?;
//!     for (i, column) in emp.columns().iter().enumerate() {
//!         println!("{} {} at offset {:?}", column.name, column.data_type()?, emp.offset(i + 1));
//!     }
//!     conn.release_type_info(&emp)?;
//!     Ok(())
//! }
//!
//! tokio_test::block_on(describe_emp()).unwrap();
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod protocol;
pub mod typeinfo;

// Re-export main types
pub use config::{IdentifierOverflow, TypeInfoOptions};
pub use connection::{Connection, ConnectionId, SharedConnection};
pub use error::{Error, Result};
pub use protocol::describe::{Catalog, ObjectKind, SynonymTarget, TypeCode, TypeHandle};
pub use protocol::types::{ColumnMetadata, OracleType};
pub use typeinfo::{ObjectName, TypeInfo, TypeKind, TypeShape};
