//! Per-table tool instances
//!
//! The column tool, selection tracker, and operation menu are specified
//! here at their interface boundary: construction scoped to a table,
//! state the router reads and updates, and explicit destruction. Overlay
//! rendering, drag logic, and menu commands live outside this crate.

use crate::{Rect, SurfaceNodeId};
use serde::{Deserialize, Serialize};

/// Column resize handles for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnTool {
    table: SurfaceNodeId,
}

impl ColumnTool {
    pub fn new(table: SurfaceNodeId) -> Self {
        tracing::debug!(?table, "column tool created");
        Self { table }
    }

    pub fn table(&self) -> SurfaceNodeId {
        self.table
    }

    /// Release the tool's resources
    pub fn destroy(self) {
        tracing::debug!(table = ?self.table, "column tool destroyed");
    }
}

/// Multi-cell selection state for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionTracker {
    table: SurfaceNodeId,
    selected_cells: Vec<SurfaceNodeId>,
    anchor: Option<Rect>,
    focus: Option<Rect>,
}

impl SelectionTracker {
    pub fn new(table: SurfaceNodeId) -> Self {
        tracing::debug!(?table, "selection tracker created");
        Self {
            table,
            selected_cells: Vec::new(),
            anchor: None,
            focus: None,
        }
    }

    pub fn table(&self) -> SurfaceNodeId {
        self.table
    }

    /// Cells currently part of the selection, by surface node identity
    pub fn selected_cells(&self) -> &[SurfaceNodeId] {
        &self.selected_cells
    }

    pub fn contains(&self, cell: SurfaceNodeId) -> bool {
        self.selected_cells.contains(&cell)
    }

    pub fn anchor(&self) -> Option<Rect> {
        self.anchor
    }

    pub fn focus(&self) -> Option<Rect> {
        self.focus
    }

    /// Set the selection bounds. The cell set itself is maintained by the
    /// drag logic (external) or by [`SelectionTracker::select_cell`].
    pub fn set_selection(&mut self, anchor: Rect, focus: Rect) {
        self.anchor = Some(anchor);
        self.focus = Some(focus);
    }

    /// Replace the selected cell set (drag logic hook)
    pub fn set_selected_cells(&mut self, cells: Vec<SurfaceNodeId>) {
        self.selected_cells = cells;
    }

    /// Collapse the selection to a single cell, its bounds serving as both
    /// anchor and focus
    pub fn select_cell(&mut self, cell: SurfaceNodeId, bounds: Rect) {
        self.selected_cells = vec![cell];
        self.set_selection(bounds, bounds);
    }

    /// Release the tracker's resources
    pub fn destroy(mut self) {
        self.selected_cells.clear();
        self.anchor = None;
        self.focus = None;
        tracing::debug!(table = ?self.table, "selection tracker destroyed");
    }
}

/// Placement and target context for an operation menu
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MenuContext {
    pub table: SurfaceNodeId,
    pub row: Option<SurfaceNodeId>,
    pub cell: Option<SurfaceNodeId>,
    /// Page x coordinate of the triggering event
    pub left: f32,
    /// Page y coordinate of the triggering event
    pub top: f32,
}

/// The right-click operation menu for one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationMenu {
    context: MenuContext,
}

impl OperationMenu {
    pub fn new(context: MenuContext) -> Self {
        tracing::debug!(table = ?context.table, "operation menu opened");
        Self { context }
    }

    pub fn context(&self) -> &MenuContext {
        &self.context
    }

    /// Close the menu and release its resources
    pub fn destroy(self) {
        tracing::debug!(table = ?self.context.table, "operation menu destroyed");
    }
}
