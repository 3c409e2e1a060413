//! Table locator - resolve a document position to its enclosing table
//!
//! Locating is a read-only query used on every click, so it never fails:
//! positions outside a cell line resolve to the not-found sentinel rather
//! than an error.

use crate::{cell_identity, table_at_line, TableCell, TableContainer, TableRow};
use delta_doc::{Document, Range};
use serde::{Deserialize, Serialize};

/// Result of locating a position: the enclosing table, row, and cell,
/// plus the offset within the located cell line. The not-found sentinel
/// carries three `None`s and offset `-1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableLookup {
    pub table: Option<TableContainer>,
    pub row: Option<TableRow>,
    pub cell: Option<TableCell>,
    pub offset: isize,
}

impl TableLookup {
    /// The sentinel returned when the position is absent or not inside a
    /// cell line
    pub fn not_found() -> Self {
        Self {
            table: None,
            row: None,
            cell: None,
            offset: -1,
        }
    }

    pub fn is_found(&self) -> bool {
        self.table.is_some()
    }
}

/// Resolve the table, row, and cell enclosing a position.
///
/// With no explicit range the document's current selection is used. The
/// lookup is side-effect-free; all structure is synthesized on demand.
pub fn locate(document: &Document, range: Option<Range>) -> TableLookup {
    let Some(range) = range.or_else(|| document.selection()) else {
        return TableLookup::not_found();
    };
    let Some((line_number, line, offset)) = document.line_at(range.index) else {
        return TableLookup::not_found();
    };
    let Some(identity) = cell_identity(&line.attributes) else {
        return TableLookup::not_found();
    };
    let Some(table) = table_at_line(document, line_number) else {
        return TableLookup::not_found();
    };

    let row = table.row(identity.row).cloned();
    let cell = table.cell(identity.row, identity.cell).cloned();
    TableLookup {
        table: Some(table),
        row,
        cell,
        offset: offset as isize,
    }
}
