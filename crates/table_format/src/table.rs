//! Synthesized table hierarchy
//!
//! Tables are not stored as trees. The only table content in the document
//! stream is the flat run of tagged lines: column markers followed by cell
//! lines carrying `{row, cell}` identity. The grouping pass below
//! reconstructs the full ownership hierarchy (container → column group →
//! columns; container → body → rows → cells → cell lines) from any
//! contiguous run of tagged lines, so the hierarchy can never diverge from
//! the linear document.

use crate::{
    cell_identity, column_width, is_column_marker, CellId, Result, RowId, TableFormatError,
};
use delta_doc::Document;
use serde::{Deserialize, Serialize};

/// One table column, synthesized from a column marker line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableColumn {
    width: Option<f64>,
}

impl TableColumn {
    /// Column width in pixels, if one has been set
    pub fn width(&self) -> Option<f64> {
        self.width
    }
}

/// The ordered column sequence of a table, left to right
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnGroup {
    columns: Vec<TableColumn>,
}

impl ColumnGroup {
    pub fn columns(&self) -> &[TableColumn] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// The leaf content unit: one line of text inside a cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellLine {
    row: RowId,
    cell: CellId,
    text: String,
    line_number: usize,
}

impl CellLine {
    /// Row identity carried by this line
    pub fn row_id(&self) -> RowId {
        self.row
    }

    /// Cell identity carried by this line
    pub fn cell_id(&self) -> CellId {
        self.cell
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Position of this line in the flat document
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// A table cell: ordered cell lines sharing one `{row, cell}` identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    id: CellId,
    row: RowId,
    lines: Vec<CellLine>,
}

impl TableCell {
    pub fn id(&self) -> CellId {
        self.id
    }

    /// Back-reference to the owning row
    pub fn row_id(&self) -> RowId {
        self.row
    }

    pub fn lines(&self) -> &[CellLine] {
        &self.lines
    }
}

/// A table row: ordered cells sharing one row identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    id: RowId,
    cells: Vec<TableCell>,
}

impl TableRow {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&TableCell> {
        self.cells.iter().find(|c| c.id == id)
    }
}

/// The ordered row sequence of a table, top to bottom
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBody {
    rows: Vec<TableRow>,
}

impl TableBody {
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// A synthesized table: one column group and one body, identified by the
/// line span it was grouped from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableContainer {
    start_line: usize,
    end_line: usize,
    column_group: ColumnGroup,
    body: TableBody,
}

impl TableContainer {
    pub fn column_group(&self) -> &ColumnGroup {
        &self.column_group
    }

    pub fn body(&self) -> &TableBody {
        &self.body
    }

    /// First document line of the table (first column marker)
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Last document line of the table (inclusive)
    pub fn end_line(&self) -> usize {
        self.end_line
    }

    pub fn contains_line(&self, line_number: usize) -> bool {
        line_number >= self.start_line && line_number <= self.end_line
    }

    pub fn column_count(&self) -> usize {
        self.column_group.column_count()
    }

    pub fn row_count(&self) -> usize {
        self.body.row_count()
    }

    /// Back-reference resolution: the row with the given id
    pub fn row(&self, id: RowId) -> Option<&TableRow> {
        self.body.rows.iter().find(|r| r.id == id)
    }

    /// Back-reference resolution: the cell with the given identity
    pub fn cell(&self, row: RowId, cell: CellId) -> Option<&TableCell> {
        self.row(row).and_then(|r| r.cell(cell))
    }

    /// Rectangular-grid check: every row has as many cells as there are
    /// columns
    pub fn is_rectangular(&self) -> bool {
        let columns = self.column_count();
        self.body.rows.iter().all(|r| r.cells.len() == columns)
    }

    /// Check the structural invariants: unique row ids, unique cell ids
    /// per row, rectangular grid
    pub fn validate(&self) -> Result<()> {
        for (i, row) in self.body.rows.iter().enumerate() {
            if self.body.rows[..i].iter().any(|r| r.id == row.id) {
                return Err(TableFormatError::DuplicateRowId(row.id));
            }
            for (j, cell) in row.cells.iter().enumerate() {
                if row.cells[..j].iter().any(|c| c.id == cell.id) {
                    return Err(TableFormatError::DuplicateCellId {
                        row: row.id,
                        cell: cell.id.to_string(),
                    });
                }
            }
            if row.cells.len() != self.column_count() {
                return Err(TableFormatError::RaggedGrid {
                    row: row.id,
                    cells: row.cells.len(),
                    columns: self.column_count(),
                });
            }
        }
        Ok(())
    }
}

/// Synthesize every table in the document.
///
/// A table is a maximal contiguous run of tagged lines: leading column
/// markers seed the column group, and the cell lines that follow are
/// grouped by adjacency — a new row whenever the row id changes, a new
/// cell whenever the cell id changes within a row. A column marker after
/// cell lines starts the next table.
pub fn tables(document: &Document) -> Vec<TableContainer> {
    let mut out = Vec::new();
    let lines = document.lines();
    let mut i = 0;

    while i < lines.len() {
        if !is_column_marker(&lines[i].attributes) && cell_identity(&lines[i].attributes).is_none()
        {
            i += 1;
            continue;
        }

        let start_line = i;
        let mut columns = Vec::new();
        while i < lines.len() && is_column_marker(&lines[i].attributes) {
            columns.push(TableColumn {
                width: column_width(&lines[i].attributes),
            });
            i += 1;
        }

        let mut rows: Vec<TableRow> = Vec::new();
        while i < lines.len() {
            let Some(identity) = cell_identity(&lines[i].attributes) else {
                break;
            };
            let cell_line = CellLine {
                row: identity.row,
                cell: identity.cell,
                text: lines[i].text.clone(),
                line_number: i,
            };

            let same_row = rows.last().is_some_and(|r| r.id == identity.row);
            if !same_row {
                rows.push(TableRow {
                    id: identity.row,
                    cells: Vec::new(),
                });
            }
            if let Some(row) = rows.last_mut() {
                let same_cell = row.cells.last().is_some_and(|c| c.id == identity.cell);
                if !same_cell {
                    row.cells.push(TableCell {
                        id: identity.cell,
                        row: identity.row,
                        lines: Vec::new(),
                    });
                }
                if let Some(cell) = row.cells.last_mut() {
                    cell.lines.push(cell_line);
                }
            }
            i += 1;
        }

        out.push(TableContainer {
            start_line,
            end_line: i - 1,
            column_group: ColumnGroup { columns },
            body: TableBody { rows },
        });
    }

    out
}

/// Synthesize the table containing a given document line, if any
pub fn table_at_line(document: &Document, line_number: usize) -> Option<TableContainer> {
    tables(document)
        .into_iter()
        .find(|t| t.contains_line(line_number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cell_line_attributes, col_attributes, table_schema};
    use delta_doc::{Delta, Source};

    /// Build a rows x cols table at the start of a fresh document.
    fn table_document(row_count: usize, col_count: usize) -> Document {
        let mut delta = Delta::new().insert("\n");
        for _ in 0..col_count {
            delta = delta.insert_with("\n", col_attributes());
        }
        for _ in 0..row_count {
            let row = RowId::new();
            for _ in 0..col_count {
                delta = delta.insert_with("\n", cell_line_attributes(row, CellId::new()));
            }
        }
        let mut doc = Document::new(table_schema());
        doc.apply(&delta, Source::User).unwrap();
        doc
    }

    #[test]
    fn test_grouping_synthesizes_grid() {
        let doc = table_document(2, 3);
        let tables = tables(&doc);
        assert_eq!(tables.len(), 1);

        let table = &tables[0];
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.row_count(), 2);
        assert!(table.is_rectangular());
        table.validate().unwrap();

        for row in table.body().rows() {
            assert_eq!(row.cells().len(), 3);
            for cell in row.cells() {
                assert_eq!(cell.row_id(), row.id());
                assert_eq!(cell.lines().len(), 1);
            }
        }
    }

    #[test]
    fn test_adjacent_tables_stay_distinct() {
        let mut doc = table_document(1, 2);
        // second table after the trailing plain line
        let mut delta = Delta::new().retain(doc.len() - 1).insert("\n");
        for _ in 0..2 {
            delta = delta.insert_with("\n", col_attributes());
        }
        let row = RowId::new();
        for _ in 0..2 {
            delta = delta.insert_with("\n", cell_line_attributes(row, CellId::new()));
        }
        doc.apply(&delta, Source::User).unwrap();

        let tables = tables(&doc);
        assert_eq!(tables.len(), 2);
        assert!(tables[0].end_line() < tables[1].start_line());
    }

    #[test]
    fn test_multi_line_cell_groups_into_one_cell() {
        let row = RowId::new();
        let cell = CellId::new();
        let delta = Delta::new()
            .insert("\n")
            .insert_with("\n", col_attributes())
            .insert_with("first\n", cell_line_attributes(row, cell))
            .insert_with("second\n", cell_line_attributes(row, cell));

        let mut doc = Document::new(table_schema());
        doc.apply(&delta, Source::User).unwrap();

        let tables = tables(&doc);
        assert_eq!(tables.len(), 1);
        let cells = tables[0].body().rows()[0].cells();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].lines().len(), 2);
        assert_eq!(cells[0].lines()[0].text(), "first");
        assert_eq!(cells[0].lines()[1].text(), "second");
    }

    #[test]
    fn test_ragged_grid_fails_validation() {
        let row_a = RowId::new();
        let row_b = RowId::new();
        let delta = Delta::new()
            .insert("\n")
            .insert_with("\n", col_attributes())
            .insert_with("\n", col_attributes())
            .insert_with("\n", cell_line_attributes(row_a, CellId::new()))
            .insert_with("\n", cell_line_attributes(row_a, CellId::new()))
            .insert_with("\n", cell_line_attributes(row_b, CellId::new()));

        let mut doc = Document::new(table_schema());
        doc.apply(&delta, Source::User).unwrap();

        let tables = tables(&doc);
        assert!(!tables[0].is_rectangular());
        assert!(matches!(
            tables[0].validate(),
            Err(TableFormatError::RaggedGrid { cells: 1, columns: 2, .. })
        ));
    }

    #[test]
    fn test_navigation_resolves_back_to_table() {
        let doc = table_document(2, 2);
        let table = &tables(&doc)[0];

        for row in table.body().rows() {
            for cell in row.cells() {
                let owning_row = table.row(cell.row_id()).unwrap();
                assert_eq!(owning_row.id(), row.id());
                assert!(table.cell(cell.row_id(), cell.id()).is_some());
            }
        }
    }

    #[test]
    fn test_table_at_line() {
        let doc = table_document(1, 2);
        // line 0 is the plain separator, lines 1-2 columns, 3-4 cells
        assert!(table_at_line(&doc, 0).is_none());
        assert!(table_at_line(&doc, 1).is_some());
        assert!(table_at_line(&doc, 4).is_some());
        assert!(table_at_line(&doc, 5).is_none());
    }
}
