//! Table attribute formats and schema registration
//!
//! Two block formats participate directly in the content stream: the
//! column marker (`table-col`) and the cell line (`table-cell-line`, which
//! carries `{row, cell}` identity). Every other table entity is a
//! container synthesized by grouping, registered so the rendered surface
//! and hit-testing predicates agree on tags, classes, and data attributes.

use crate::{CellId, RowId};
use delta_doc::{Attributes, BlotDefinition, SchemaRegistry};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Attribute key tagging a line as a column marker
pub const TABLE_COL_FORMAT: &str = "table-col";
/// Attribute key tagging a line as a cell line
pub const TABLE_CELL_LINE_FORMAT: &str = "table-cell-line";

/// Style class the rendered table element carries
pub const TABLE_CLASS: &str = "deltatable";
/// Style class of the scrollable wrapper around a rendered table
pub const TABLE_WRAPPER_CLASS: &str = "deltatable-wrapper";
/// Data attribute carrying row identity on rendered rows and cells
pub const ROW_DATA_ATTRIBUTE: &str = "data-row";

/// The `{row, cell}` identity carried by a cell line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIdentity {
    pub row: RowId,
    pub cell: CellId,
}

/// Attributes for a column marker line
pub fn col_attributes() -> Attributes {
    Attributes::new().with(TABLE_COL_FORMAT, json!(true))
}

/// Attributes for a column marker line with an explicit width
pub fn col_attributes_with_width(width: f64) -> Attributes {
    Attributes::new().with(TABLE_COL_FORMAT, json!({ "width": width }))
}

/// Attributes for a cell line with row/cell identity
pub fn cell_line_attributes(row: RowId, cell: CellId) -> Attributes {
    Attributes::new().with(
        TABLE_CELL_LINE_FORMAT,
        json!({ "row": row.to_string(), "cell": cell.to_string() }),
    )
}

/// Check whether attributes tag a column marker line
pub fn is_column_marker(attributes: &Attributes) -> bool {
    attributes.contains_key(TABLE_COL_FORMAT)
}

/// Column width recorded on a marker line, if any
pub fn column_width(attributes: &Attributes) -> Option<f64> {
    attributes
        .get(TABLE_COL_FORMAT)
        .and_then(|v| v.get("width"))
        .and_then(Value::as_f64)
}

/// Parse the `{row, cell}` identity off a cell line's attributes.
/// Lines with a missing or malformed identity are not cell lines.
pub fn cell_identity(attributes: &Attributes) -> Option<CellIdentity> {
    let value = attributes.get(TABLE_CELL_LINE_FORMAT)?;
    let row = value
        .get("row")
        .and_then(Value::as_str)
        .and_then(RowId::from_string)?;
    let cell = value
        .get("cell")
        .and_then(Value::as_str)
        .and_then(CellId::from_string)?;
    Some(CellIdentity { row, cell })
}

/// Register every table entity type with the schema.
///
/// Must run before a document containing tables is loaded or edited;
/// otherwise delta application drops the structural attributes.
pub fn register_table_formats(registry: &mut SchemaRegistry) {
    registry.register(BlotDefinition::block(TABLE_COL_FORMAT).with_tag("COL"));
    registry.register(BlotDefinition::container("table-col-group").with_tag("COLGROUP"));
    registry.register(
        BlotDefinition::block(TABLE_CELL_LINE_FORMAT)
            .with_tag("DIV")
            .with_data_attribute(ROW_DATA_ATTRIBUTE),
    );
    registry.register(
        BlotDefinition::container("table-cell")
            .with_tag("TD")
            .with_data_attribute(ROW_DATA_ATTRIBUTE),
    );
    registry.register(
        BlotDefinition::container("table-row")
            .with_tag("TR")
            .with_data_attribute(ROW_DATA_ATTRIBUTE),
    );
    registry.register(BlotDefinition::container("table-body").with_tag("TBODY"));
    registry.register(
        BlotDefinition::container("table-container")
            .with_tag("TABLE")
            .with_class(TABLE_CLASS),
    );
    registry.register(
        BlotDefinition::container("table-view")
            .with_tag("DIV")
            .with_class(TABLE_WRAPPER_CLASS),
    );
}

/// A registry preloaded with the table formats
pub fn table_schema() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    register_table_formats(&mut registry);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_covers_all_entities() {
        let registry = table_schema();
        assert_eq!(registry.len(), 8);
        assert!(registry.is_block_format(TABLE_COL_FORMAT));
        assert!(registry.is_block_format(TABLE_CELL_LINE_FORMAT));
        assert!(!registry.is_block_format("table-container"));
    }

    #[test]
    fn test_cell_identity_round_trip() {
        let row = RowId::new();
        let cell = CellId::new();
        let attrs = cell_line_attributes(row, cell);

        let identity = cell_identity(&attrs).unwrap();
        assert_eq!(identity.row, row);
        assert_eq!(identity.cell, cell);
    }

    #[test]
    fn test_malformed_identity_rejected() {
        let attrs = Attributes::new().with(TABLE_CELL_LINE_FORMAT, json!({ "row": "bogus" }));
        assert!(cell_identity(&attrs).is_none());
        assert!(cell_identity(&Attributes::new()).is_none());
    }

    #[test]
    fn test_column_marker_width() {
        assert!(is_column_marker(&col_attributes()));
        assert_eq!(column_width(&col_attributes()), None);
        assert_eq!(column_width(&col_attributes_with_width(120.0)), Some(120.0));
    }
}
