//! Table module facade
//!
//! Owns the document and the interaction router, and exposes the public
//! operations: `insert_table`, `get_table`, and the two event entry
//! points. Construction registers every table format with the document
//! schema, so structural attributes survive delta application.

use crate::{InteractionRouter, MenuDefault, PointerEvent, Result, Surface};
use delta_doc::{Delta, Document, Range, Source};
use table_format::{
    cell_line_attributes, col_attributes, locate, table_schema, CellId, RowId, TableLookup,
};

/// The table module over one document
#[derive(Debug)]
pub struct TableModule {
    document: Document,
    router: InteractionRouter,
}

impl TableModule {
    /// Create a module over a fresh document with the table formats
    /// registered
    pub fn new() -> Self {
        Self {
            document: Document::new(table_schema()),
            router: InteractionRouter::new(),
        }
    }

    /// Create a module over an existing document. The document must have
    /// been created with the table formats registered.
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            router: InteractionRouter::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn router(&self) -> &InteractionRouter {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut InteractionRouter {
        &mut self.router
    }

    /// Insert a `rows` x `columns` table at the current selection.
    ///
    /// The edit retains up to the cursor, opens the table on its own line,
    /// seeds the column group with `columns` markers, then one cell line
    /// per cell with a fresh row id per row and a fresh cell id per cell.
    /// The cursor moves to just after the table's opening line. Without a
    /// selection, or with a zero dimension, nothing happens: a
    /// zero-dimension table would violate the rectangular-grid invariant.
    pub fn insert_table(&mut self, rows: usize, columns: usize) -> Result<()> {
        if rows == 0 || columns == 0 {
            return Ok(());
        }
        let Some(range) = self.document.selection() else {
            return Ok(());
        };

        let mut delta = Delta::new().retain(range.index).insert("\n");
        for _ in 0..columns {
            delta = delta.insert_with("\n", col_attributes());
        }
        for _ in 0..rows {
            let row_id = RowId::new();
            for _ in 0..columns {
                delta = delta.insert_with("\n", cell_line_attributes(row_id, CellId::new()));
            }
        }

        self.document.apply(&delta, Source::User)?;
        self.document
            .set_selection(Range::collapsed(range.index + 1), Source::Silent)?;
        tracing::debug!(rows, columns, at = range.index, "table inserted");
        Ok(())
    }

    /// Resolve the table, row, and cell enclosing a range, defaulting to
    /// the current selection
    pub fn get_table(&self, range: Option<Range>) -> TableLookup {
        locate(&self.document, range)
    }

    /// Route a primary click on the rendered surface
    pub fn handle_click(&mut self, surface: &Surface, event: &PointerEvent) {
        self.router.handle_click(surface, event);
    }

    /// Route a right click on the rendered surface
    pub fn handle_context_menu(&mut self, surface: &Surface, event: &PointerEvent) -> MenuDefault {
        self.router.handle_context_menu(surface, event)
    }
}

impl Default for TableModule {
    fn default() -> Self {
        Self::new()
    }
}
