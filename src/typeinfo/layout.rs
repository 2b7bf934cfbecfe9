//! Column materialization and record layout.
//!
//! Children of a described object are described one by one into a column
//! array; each column is mapped to its in-memory representation and placed
//! in a record with natural alignment. The resulting offsets are cached on
//! the descriptor for field access by binding code.

use log::trace;

use crate::error::{Error, Result};
use crate::protocol::constants::{DATE_SIZE, HANDLE_SIZE, NUMBER_SIZE};
use crate::protocol::describe::{Catalog, ColumnContext};
use crate::protocol::types::{ColumnMetadata, OracleType};

/// Offset of a column that has not been laid out.
pub const OFFSET_UNSET: i32 = -1;

/// In-memory representation of one column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub size: usize,
    pub align: usize,
}

impl ColumnMapping {
    const fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }

    const fn handle() -> Self {
        Self::new(HANDLE_SIZE, HANDLE_SIZE)
    }
}

/// Map a described column to its in-memory representation.
///
/// Numbers and dates are stored inline in their catalog formats, fixed-size
/// binary scalars natively, and everything variable-length or user-defined
/// as a handle.
pub fn map_column(column: &ColumnMetadata) -> Result<ColumnMapping> {
    let mapping = match column.data_type()? {
        OracleType::Number { .. } => ColumnMapping::new(NUMBER_SIZE, 1),
        OracleType::Date => ColumnMapping::new(DATE_SIZE, 2),
        OracleType::BinaryInteger | OracleType::BinaryFloat | OracleType::Boolean => {
            ColumnMapping::new(4, 4)
        }
        OracleType::BinaryDouble => ColumnMapping::new(8, 8),
        OracleType::Varchar2 { .. }
        | OracleType::Char { .. }
        | OracleType::Long
        | OracleType::Raw { .. }
        | OracleType::LongRaw
        | OracleType::Rowid
        | OracleType::Timestamp
        | OracleType::TimestampTz
        | OracleType::TimestampLtz
        | OracleType::IntervalYm
        | OracleType::IntervalDs
        | OracleType::Clob
        | OracleType::Blob
        | OracleType::Bfile
        | OracleType::Object { .. }
        | OracleType::Ref { .. } => ColumnMapping::handle(),
    };
    Ok(mapping)
}

/// Columns of a descriptor and their layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub columns: Vec<ColumnMetadata>,
    pub mappings: Vec<ColumnMapping>,
    /// Byte offset per column, `OFFSET_UNSET` until placed.
    pub offsets: Vec<i32>,
    pub struct_size: usize,
    pub struct_align: usize,
}

impl Layout {
    /// A layout with no columns.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            mappings: Vec::new(),
            offsets: Vec::new(),
            struct_size: 0,
            struct_align: 1,
        }
    }

    /// Allocate arrays for `count` columns, every offset unset.
    fn with_capacity(count: usize) -> Result<Self> {
        let mut offsets = allocate("offsets", count)?;
        offsets.resize(count, OFFSET_UNSET);
        Ok(Self {
            columns: allocate("columns", count)?,
            mappings: allocate("column mappings", count)?,
            offsets,
            struct_size: 0,
            struct_align: 1,
        })
    }

    /// Map and place the next column.
    fn push(&mut self, column: ColumnMetadata) -> Result<()> {
        let mapping = map_column(&column)?;
        let offset = align_up(self.struct_size, mapping.align);
        let index = self.columns.len();

        self.offsets[index] = i32::try_from(offset)
            .map_err(|_| Error::protocol(format!("record offset {} out of range", offset)))?;
        self.struct_size = offset + mapping.size;
        self.struct_align = self.struct_align.max(mapping.align);

        trace!(
            "column {} '{}' at offset {} (size {}, align {})",
            index + 1,
            column.name,
            offset,
            mapping.size,
            mapping.align
        );

        self.columns.push(column);
        self.mappings.push(mapping);
        Ok(())
    }

    fn finish(mut self) -> Self {
        self.struct_size = align_up(self.struct_size, self.struct_align);
        self
    }
}

/// Lay out columns that are already described.
pub fn lay_out(columns: Vec<ColumnMetadata>) -> Result<Layout> {
    let mut layout = Layout::with_capacity(columns.len())?;
    for column in columns {
        layout.push(column)?;
    }
    Ok(layout.finish())
}

/// Describe `count` children of `source` and lay them out.
///
/// Stops at the first child that fails to describe or map; everything
/// built so far is dropped with the error.
pub(crate) fn materialize<C: Catalog>(
    catalog: &C,
    name: &str,
    source: &C::Param,
    count: u16,
    context: ColumnContext,
) -> Result<Layout> {
    if count == 0 {
        return Ok(Layout::empty());
    }

    let mut layout = Layout::with_capacity(count as usize)?;
    for ordinal in 1..=count {
        let column = catalog
            .describe_column(source, ordinal, context)
            .map_err(|e| Error::describe(name, e))?;
        layout.push(column)?;
    }
    Ok(layout.finish())
}

fn allocate<T>(what: &'static str, count: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(count)
        .map_err(|_| Error::OutOfMemory { what, count })?;
    Ok(v)
}

fn align_up(offset: usize, align: usize) -> usize {
    offset.div_ceil(align) * align
}
