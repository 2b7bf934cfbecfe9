//! Oracle data type enum with type-specific attributes.
//!
//! Note: Nullability is a column property, not a type property.

use crate::error::{Error, Result};
use crate::protocol::constants::*;

use super::metadata::ColumnMetadata;

/// Oracle data type with type-specific attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum OracleType {
    /// VARCHAR2(max_length) - variable-length string.
    Varchar2 { max_size: u32 },
    /// NUMBER(precision, scale) - numeric type.
    Number { precision: i8, scale: i8 },
    /// BINARY_INTEGER - integer type.
    BinaryInteger,
    /// BINARY_FLOAT.
    BinaryFloat,
    /// BINARY_DOUBLE.
    BinaryDouble,
    /// BOOLEAN.
    Boolean,
    /// LONG - legacy large text type.
    Long,
    /// LONG RAW.
    LongRaw,
    /// CHAR(size) - fixed-length string.
    Char { max_size: u32 },
    /// RAW(size).
    Raw { max_size: u32 },
    /// DATE - date/time (no timezone).
    Date,
    /// TIMESTAMP.
    Timestamp,
    /// TIMESTAMP WITH TIME ZONE.
    TimestampTz,
    /// TIMESTAMP WITH LOCAL TIME ZONE.
    TimestampLtz,
    /// INTERVAL YEAR TO MONTH.
    IntervalYm,
    /// INTERVAL DAY TO SECOND.
    IntervalDs,
    /// ROWID / UROWID.
    Rowid,
    /// CLOB - Character Large Object.
    Clob,
    /// BLOB - Binary Large Object.
    Blob,
    /// BFILE - external binary file.
    Bfile,
    /// Embedded object or collection of a user-defined type.
    Object { type_name: String },
    /// REF to an object of a user-defined type.
    Ref { type_name: String },
}

impl OracleType {
    /// Create from raw Oracle type number and metadata.
    ///
    /// Returns `Err(Error::UnsupportedType)` for unsupported types, including
    /// user-defined types, which need a type name (see `from_metadata`).
    pub fn from_raw(oracle_type: u8, precision: i8, scale: i8, max_size: u32) -> Result<Self> {
        match oracle_type as u16 {
            ORA_TYPE_NUM_VARCHAR => Ok(OracleType::Varchar2 { max_size }),
            ORA_TYPE_NUM_NUMBER => Ok(OracleType::Number { precision, scale }),
            ORA_TYPE_NUM_BINARY_INTEGER => Ok(OracleType::BinaryInteger),
            ORA_TYPE_NUM_BINARY_FLOAT => Ok(OracleType::BinaryFloat),
            ORA_TYPE_NUM_BINARY_DOUBLE => Ok(OracleType::BinaryDouble),
            ORA_TYPE_NUM_BOOLEAN => Ok(OracleType::Boolean),
            ORA_TYPE_NUM_LONG => Ok(OracleType::Long),
            ORA_TYPE_NUM_LONG_RAW => Ok(OracleType::LongRaw),
            ORA_TYPE_NUM_CHAR => Ok(OracleType::Char { max_size }),
            ORA_TYPE_NUM_RAW => Ok(OracleType::Raw { max_size }),
            ORA_TYPE_NUM_DATE => Ok(OracleType::Date),
            ORA_TYPE_NUM_TIMESTAMP => Ok(OracleType::Timestamp),
            ORA_TYPE_NUM_TIMESTAMP_TZ => Ok(OracleType::TimestampTz),
            ORA_TYPE_NUM_TIMESTAMP_LTZ => Ok(OracleType::TimestampLtz),
            ORA_TYPE_NUM_INTERVAL_YM => Ok(OracleType::IntervalYm),
            ORA_TYPE_NUM_INTERVAL_DS => Ok(OracleType::IntervalDs),
            ORA_TYPE_NUM_ROWID | ORA_TYPE_NUM_UROWID => Ok(OracleType::Rowid),
            ORA_TYPE_NUM_CLOB => Ok(OracleType::Clob),
            ORA_TYPE_NUM_BLOB => Ok(OracleType::Blob),
            ORA_TYPE_NUM_BFILE => Ok(OracleType::Bfile),
            _ => Err(Error::UnsupportedType {
                type_num: oracle_type,
            }),
        }
    }

    /// Create from a described column, including user-defined types.
    pub fn from_metadata(meta: &ColumnMetadata) -> Result<Self> {
        match (meta.oracle_type as u16, &meta.type_name) {
            (ORA_TYPE_NUM_OBJECT, Some(type_name)) => Ok(OracleType::Object {
                type_name: type_name.clone(),
            }),
            (ORA_TYPE_NUM_REF, Some(type_name)) => Ok(OracleType::Ref {
                type_name: type_name.clone(),
            }),
            _ => Self::from_raw(meta.oracle_type, meta.precision, meta.scale, meta.max_size),
        }
    }

    /// Get the Oracle type number.
    pub fn type_num(&self) -> u8 {
        let num = match self {
            OracleType::Varchar2 { .. } => ORA_TYPE_NUM_VARCHAR,
            OracleType::Number { .. } => ORA_TYPE_NUM_NUMBER,
            OracleType::BinaryInteger => ORA_TYPE_NUM_BINARY_INTEGER,
            OracleType::BinaryFloat => ORA_TYPE_NUM_BINARY_FLOAT,
            OracleType::BinaryDouble => ORA_TYPE_NUM_BINARY_DOUBLE,
            OracleType::Boolean => ORA_TYPE_NUM_BOOLEAN,
            OracleType::Long => ORA_TYPE_NUM_LONG,
            OracleType::LongRaw => ORA_TYPE_NUM_LONG_RAW,
            OracleType::Char { .. } => ORA_TYPE_NUM_CHAR,
            OracleType::Raw { .. } => ORA_TYPE_NUM_RAW,
            OracleType::Date => ORA_TYPE_NUM_DATE,
            OracleType::Timestamp => ORA_TYPE_NUM_TIMESTAMP,
            OracleType::TimestampTz => ORA_TYPE_NUM_TIMESTAMP_TZ,
            OracleType::TimestampLtz => ORA_TYPE_NUM_TIMESTAMP_LTZ,
            OracleType::IntervalYm => ORA_TYPE_NUM_INTERVAL_YM,
            OracleType::IntervalDs => ORA_TYPE_NUM_INTERVAL_DS,
            OracleType::Rowid => ORA_TYPE_NUM_ROWID,
            OracleType::Clob => ORA_TYPE_NUM_CLOB,
            OracleType::Blob => ORA_TYPE_NUM_BLOB,
            OracleType::Bfile => ORA_TYPE_NUM_BFILE,
            OracleType::Object { .. } => ORA_TYPE_NUM_OBJECT,
            OracleType::Ref { .. } => ORA_TYPE_NUM_REF,
        };
        num as u8
    }
}

impl std::fmt::Display for OracleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleType::Varchar2 { max_size } => write!(f, "VARCHAR2({})", max_size),
            OracleType::Number { precision, scale } => {
                if *precision == 0 && *scale == 0 {
                    write!(f, "NUMBER")
                } else if *scale == 0 {
                    write!(f, "NUMBER({})", precision)
                } else {
                    write!(f, "NUMBER({},{})", precision, scale)
                }
            }
            OracleType::BinaryInteger => write!(f, "BINARY_INTEGER"),
            OracleType::BinaryFloat => write!(f, "BINARY_FLOAT"),
            OracleType::BinaryDouble => write!(f, "BINARY_DOUBLE"),
            OracleType::Boolean => write!(f, "BOOLEAN"),
            OracleType::Long => write!(f, "LONG"),
            OracleType::LongRaw => write!(f, "LONG RAW"),
            OracleType::Char { max_size } => write!(f, "CHAR({})", max_size),
            OracleType::Raw { max_size } => write!(f, "RAW({})", max_size),
            OracleType::Date => write!(f, "DATE"),
            OracleType::Timestamp => write!(f, "TIMESTAMP"),
            OracleType::TimestampTz => write!(f, "TIMESTAMP WITH TIME ZONE"),
            OracleType::TimestampLtz => write!(f, "TIMESTAMP WITH LOCAL TIME ZONE"),
            OracleType::IntervalYm => write!(f, "INTERVAL YEAR TO MONTH"),
            OracleType::IntervalDs => write!(f, "INTERVAL DAY TO SECOND"),
            OracleType::Rowid => write!(f, "ROWID"),
            OracleType::Clob => write!(f, "CLOB"),
            OracleType::Blob => write!(f, "BLOB"),
            OracleType::Bfile => write!(f, "BFILE"),
            OracleType::Object { type_name } => write!(f, "{}", type_name),
            OracleType::Ref { type_name } => write!(f, "REF {}", type_name),
        }
    }
}
