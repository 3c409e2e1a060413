//! Error types for table structure validation

use crate::RowId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableFormatError {
    #[error("ragged grid: row {row} has {cells} cells, table has {columns} columns")]
    RaggedGrid {
        row: RowId,
        cells: usize,
        columns: usize,
    },

    #[error("duplicate row id within table: {0}")]
    DuplicateRowId(RowId),

    #[error("duplicate cell id within row {row}: {cell}")]
    DuplicateCellId { row: RowId, cell: String },
}

pub type Result<T> = std::result::Result<T, TableFormatError>;
