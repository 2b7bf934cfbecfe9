//! Catalog describe constants.
//!
//! Object-kind tags and typecodes follow the values the Oracle catalog
//! reports for a describe-any request.

// Object-kind tags (describe parameter type)
pub const PTYPE_UNK: u8 = 0;
pub const PTYPE_TABLE: u8 = 1;
pub const PTYPE_VIEW: u8 = 2;
pub const PTYPE_PROC: u8 = 3;
pub const PTYPE_FUNC: u8 = 4;
pub const PTYPE_PKG: u8 = 5;
pub const PTYPE_TYPE: u8 = 6;
pub const PTYPE_SYN: u8 = 7;
pub const PTYPE_SEQ: u8 = 8;
pub const PTYPE_SCHEMA: u8 = 17;
pub const PTYPE_DATABASE: u8 = 18;
pub const PTYPE_TABLE_ALIAS: u8 = 22;

// Public type-info kind values
pub const TIF_TABLE: u32 = 1;
pub const TIF_VIEW: u32 = 2;
pub const TIF_TYPE: u32 = 3;

// Typecodes
pub const TYPECODE_REF: u16 = 110;
pub const TYPECODE_OBJECT: u16 = 108;
pub const TYPECODE_NAMED_COLLECTION: u16 = 122;
pub const TYPECODE_VARRAY: u16 = 247;
pub const TYPECODE_TABLE: u16 = 248;
pub const TYPECODE_OPAQUE: u16 = 58;

// Size of an object name in characters
pub const OBJ_NAME_SIZE: usize = 128;

// Default bound on synonym chains
pub const MAX_SYNONYM_DEPTH: usize = 16;

// Oracle data type numbers
pub const ORA_TYPE_NUM_BFILE: u16 = 114;
pub const ORA_TYPE_NUM_BINARY_DOUBLE: u16 = 101;
pub const ORA_TYPE_NUM_BINARY_FLOAT: u16 = 100;
pub const ORA_TYPE_NUM_BINARY_INTEGER: u16 = 3;
pub const ORA_TYPE_NUM_BLOB: u16 = 113;
pub const ORA_TYPE_NUM_BOOLEAN: u16 = 252;
pub const ORA_TYPE_NUM_CHAR: u16 = 96;
pub const ORA_TYPE_NUM_CLOB: u16 = 112;
pub const ORA_TYPE_NUM_DATE: u16 = 12;
pub const ORA_TYPE_NUM_INTERVAL_DS: u16 = 183;
pub const ORA_TYPE_NUM_INTERVAL_YM: u16 = 182;
pub const ORA_TYPE_NUM_LONG: u16 = 8;
pub const ORA_TYPE_NUM_LONG_RAW: u16 = 24;
pub const ORA_TYPE_NUM_NUMBER: u16 = 2;
pub const ORA_TYPE_NUM_OBJECT: u16 = 109;
pub const ORA_TYPE_NUM_RAW: u16 = 23;
pub const ORA_TYPE_NUM_REF: u16 = 111;
pub const ORA_TYPE_NUM_ROWID: u16 = 11;
pub const ORA_TYPE_NUM_TIMESTAMP: u16 = 180;
pub const ORA_TYPE_NUM_TIMESTAMP_LTZ: u16 = 231;
pub const ORA_TYPE_NUM_TIMESTAMP_TZ: u16 = 181;
pub const ORA_TYPE_NUM_UROWID: u16 = 208;
pub const ORA_TYPE_NUM_VARCHAR: u16 = 1;

// In-memory sizes of mapped column values
pub const NUMBER_SIZE: usize = 22;
pub const DATE_SIZE: usize = 8;
pub const HANDLE_SIZE: usize = std::mem::size_of::<usize>();
