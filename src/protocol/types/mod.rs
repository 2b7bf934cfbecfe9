//! Column metadata types returned by the describe collaborator.

mod metadata;
mod oracle_type;

pub use metadata::ColumnMetadata;
pub use oracle_type::OracleType;
