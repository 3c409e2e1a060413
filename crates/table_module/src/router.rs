//! Interaction router - event routing and tool lifecycle
//!
//! Maps pointer and context-menu events on the rendered surface to the
//! active table and its tooling. The tooling slot is an explicit two-state
//! machine: `Idle`, or `Active` owning the table reference and its tool
//! instances, so activation and deactivation are strictly paired and no
//! two tables ever hold tooling at once.

use crate::{
    is_cell_node, is_row_node, is_table_node, ColumnTool, MenuContext, OperationMenu,
    SelectionTracker, Surface, SurfaceNodeId,
};
use serde::{Deserialize, Serialize};

/// A pointer or context-menu event on the rendered surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// The surface node the event was dispatched to
    pub target: SurfaceNodeId,
    /// Page x coordinate
    pub page_x: f32,
    /// Page y coordinate
    pub page_y: f32,
}

impl PointerEvent {
    pub fn new(target: SurfaceNodeId, page_x: f32, page_y: f32) -> Self {
        Self {
            target,
            page_x,
            page_y,
        }
    }
}

/// Whether the browser's default context menu should proceed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuDefault {
    /// No table active: let the native menu open
    Allow,
    /// A table is active: suppress the native menu
    Prevent,
}

/// Tooling owned while a table is active
#[derive(Debug)]
struct ActiveTooling {
    table: SurfaceNodeId,
    column_tool: ColumnTool,
    selection: SelectionTracker,
    operation_menu: Option<OperationMenu>,
}

#[derive(Debug, Default)]
enum ToolingState {
    #[default]
    Idle,
    Active(ActiveTooling),
}

/// Routes surface events and drives the per-table tool lifecycle
#[derive(Debug, Default)]
pub struct InteractionRouter {
    state: ToolingState,
}

impl InteractionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table currently holding tooling, if any
    pub fn active_table(&self) -> Option<SurfaceNodeId> {
        match &self.state {
            ToolingState::Idle => None,
            ToolingState::Active(tooling) => Some(tooling.table),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, ToolingState::Active(_))
    }

    /// The active table's selection tracker
    pub fn selection_tracker(&self) -> Option<&SelectionTracker> {
        match &self.state {
            ToolingState::Idle => None,
            ToolingState::Active(tooling) => Some(&tooling.selection),
        }
    }

    /// Mutable access for the (external) drag logic
    pub fn selection_tracker_mut(&mut self) -> Option<&mut SelectionTracker> {
        match &mut self.state {
            ToolingState::Idle => None,
            ToolingState::Active(tooling) => Some(&mut tooling.selection),
        }
    }

    /// The currently open operation menu
    pub fn operation_menu(&self) -> Option<&OperationMenu> {
        match &self.state {
            ToolingState::Idle => None,
            ToolingState::Active(tooling) => tooling.operation_menu.as_ref(),
        }
    }

    /// Primary click: resolve the enclosing table and adjust tooling.
    pub fn handle_click(&mut self, surface: &Surface, event: &PointerEvent) {
        match surface.nearest_ancestor(event.target, is_table_node) {
            Some(table) if self.active_table() == Some(table) => {
                // current table clicked: no state change
            }
            Some(table) => {
                self.deactivate();
                self.activate(table);
            }
            None => {
                self.deactivate();
            }
        }
    }

    /// Right click: suppress the native menu while a table is active, and
    /// open the operation menu for the clicked cell.
    pub fn handle_context_menu(&mut self, surface: &Surface, event: &PointerEvent) -> MenuDefault {
        let ToolingState::Active(tooling) = &mut self.state else {
            return MenuDefault::Allow;
        };

        let table = surface.nearest_ancestor(event.target, is_table_node);
        let row = surface.nearest_ancestor(event.target, is_row_node);
        let cell = surface.nearest_ancestor(event.target, is_cell_node);

        // right-clicking outside the current multi-cell selection collapses
        // it to the clicked cell
        if let Some(cell) = cell {
            if tooling.selection.selected_cells().is_empty() || !tooling.selection.contains(cell) {
                let bounds = surface.node(cell).bounds();
                tooling.selection.select_cell(cell, bounds);
            }
        }

        if let Some(menu) = tooling.operation_menu.take() {
            menu.destroy();
        }

        if let Some(table) = table {
            tooling.operation_menu = Some(OperationMenu::new(MenuContext {
                table,
                row,
                cell,
                left: event.page_x,
                top: event.page_y,
            }));
        }

        MenuDefault::Prevent
    }

    /// Construct and retain tooling for a table. Any previously active
    /// tooling is released first, preserving the pairing invariant.
    pub fn activate(&mut self, table: SurfaceNodeId) {
        self.deactivate();
        tracing::debug!(?table, "table tooling activated");
        self.state = ToolingState::Active(ActiveTooling {
            table,
            column_tool: ColumnTool::new(table),
            selection: SelectionTracker::new(table),
            operation_menu: None,
        });
    }

    /// Destroy the active tooling and clear all retained references.
    /// A no-op when nothing is active; a missing operation menu is
    /// tolerated.
    pub fn deactivate(&mut self) {
        match std::mem::take(&mut self.state) {
            ToolingState::Idle => {}
            ToolingState::Active(tooling) => {
                tracing::debug!(table = ?tooling.table, "table tooling deactivated");
                tooling.column_tool.destroy();
                tooling.selection.destroy();
                if let Some(menu) = tooling.operation_menu {
                    menu.destroy();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rect, SurfaceNode};
    use table_format::{ROW_DATA_ATTRIBUTE, TABLE_CLASS};

    struct Fixture {
        surface: Surface,
        table_a: SurfaceNodeId,
        cell_a: SurfaceNodeId,
        cell_a2: SurfaceNodeId,
        table_b: SurfaceNodeId,
        cell_b: SurfaceNodeId,
        outside: SurfaceNodeId,
    }

    /// Two rendered tables and a plain paragraph under one root.
    fn fixture() -> Fixture {
        let mut surface = Surface::new();
        let root = surface.insert(SurfaceNode::new("DIV"), None);

        let mut add_table = |surface: &mut Surface, x: f32| {
            let table = surface.insert(
                SurfaceNode::new("TABLE").with_class(TABLE_CLASS),
                Some(root),
            );
            let body = surface.insert(SurfaceNode::new("TBODY"), Some(table));
            let row = surface.insert(
                SurfaceNode::new("TR").with_attribute(ROW_DATA_ATTRIBUTE, "r"),
                Some(body),
            );
            let cell = surface.insert(
                SurfaceNode::new("TD")
                    .with_attribute(ROW_DATA_ATTRIBUTE, "r")
                    .with_bounds(Rect::new(x, 0.0, 100.0, 40.0)),
                Some(row),
            );
            let cell2 = surface.insert(
                SurfaceNode::new("TD")
                    .with_attribute(ROW_DATA_ATTRIBUTE, "r")
                    .with_bounds(Rect::new(x + 100.0, 0.0, 100.0, 40.0)),
                Some(row),
            );
            (table, cell, cell2)
        };

        let (table_a, cell_a, cell_a2) = add_table(&mut surface, 0.0);
        let (table_b, cell_b, _) = add_table(&mut surface, 400.0);
        let outside = surface.insert(SurfaceNode::new("P"), Some(root));

        Fixture {
            surface,
            table_a,
            cell_a,
            cell_a2,
            table_b,
            cell_b,
            outside,
        }
    }

    #[test]
    fn test_click_activates_enclosing_table() {
        let f = fixture();
        let mut router = InteractionRouter::new();

        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));
        assert_eq!(router.active_table(), Some(f.table_a));
    }

    #[test]
    fn test_click_same_table_keeps_state() {
        let f = fixture();
        let mut router = InteractionRouter::new();

        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));
        router
            .selection_tracker_mut()
            .unwrap()
            .set_selected_cells(vec![f.cell_a]);

        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a2, 0.0, 0.0));
        assert_eq!(router.active_table(), Some(f.table_a));
        // tooling was not recreated
        assert_eq!(router.selection_tracker().unwrap().selected_cells(), &[f.cell_a]);
    }

    #[test]
    fn test_click_other_table_swaps_tooling() {
        let f = fixture();
        let mut router = InteractionRouter::new();

        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));
        router.handle_click(&f.surface, &PointerEvent::new(f.cell_b, 0.0, 0.0));

        assert_eq!(router.active_table(), Some(f.table_b));
        assert_eq!(router.selection_tracker().unwrap().table(), f.table_b);
    }

    #[test]
    fn test_click_outside_deactivates() {
        let f = fixture();
        let mut router = InteractionRouter::new();

        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));
        router.handle_click(&f.surface, &PointerEvent::new(f.outside, 0.0, 0.0));

        assert!(!router.is_active());
        assert!(router.selection_tracker().is_none());
    }

    #[test]
    fn test_click_outside_while_idle_is_noop() {
        let f = fixture();
        let mut router = InteractionRouter::new();
        router.handle_click(&f.surface, &PointerEvent::new(f.outside, 0.0, 0.0));
        assert!(!router.is_active());
    }

    #[test]
    fn test_context_menu_idle_allows_default() {
        let f = fixture();
        let mut router = InteractionRouter::new();

        let outcome = router.handle_context_menu(&f.surface, &PointerEvent::new(f.cell_a, 5.0, 5.0));
        assert_eq!(outcome, MenuDefault::Allow);
        assert!(router.operation_menu().is_none());
    }

    #[test]
    fn test_context_menu_opens_menu_with_context() {
        let f = fixture();
        let mut router = InteractionRouter::new();
        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));

        let outcome =
            router.handle_context_menu(&f.surface, &PointerEvent::new(f.cell_a, 120.0, 60.0));
        assert_eq!(outcome, MenuDefault::Prevent);

        let context = router.operation_menu().unwrap().context();
        assert_eq!(context.table, f.table_a);
        assert!(context.row.is_some());
        assert_eq!(context.cell, Some(f.cell_a));
        assert_eq!((context.left, context.top), (120.0, 60.0));
    }

    #[test]
    fn test_context_menu_outside_selection_collapses_to_cell() {
        let f = fixture();
        let mut router = InteractionRouter::new();
        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));
        router
            .selection_tracker_mut()
            .unwrap()
            .set_selected_cells(vec![f.cell_a2]);

        router.handle_context_menu(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));

        let tracker = router.selection_tracker().unwrap();
        assert_eq!(tracker.selected_cells(), &[f.cell_a]);
        let bounds = f.surface.node(f.cell_a).bounds();
        assert_eq!(tracker.anchor(), Some(bounds));
        assert_eq!(tracker.focus(), Some(bounds));
    }

    #[test]
    fn test_context_menu_inside_selection_preserves_it() {
        let f = fixture();
        let mut router = InteractionRouter::new();
        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));
        router
            .selection_tracker_mut()
            .unwrap()
            .set_selected_cells(vec![f.cell_a, f.cell_a2]);

        router.handle_context_menu(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));

        let tracker = router.selection_tracker().unwrap();
        assert_eq!(tracker.selected_cells(), &[f.cell_a, f.cell_a2]);
    }

    #[test]
    fn test_reopening_menu_replaces_previous() {
        let f = fixture();
        let mut router = InteractionRouter::new();
        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));

        router.handle_context_menu(&f.surface, &PointerEvent::new(f.cell_a, 10.0, 10.0));
        router.handle_context_menu(&f.surface, &PointerEvent::new(f.cell_a2, 30.0, 40.0));

        let context = router.operation_menu().unwrap().context();
        assert_eq!(context.cell, Some(f.cell_a2));
        assert_eq!((context.left, context.top), (30.0, 40.0));
    }

    #[test]
    fn test_deactivate_without_menu_does_not_fail() {
        let f = fixture();
        let mut router = InteractionRouter::new();
        router.handle_click(&f.surface, &PointerEvent::new(f.cell_a, 0.0, 0.0));
        assert!(router.operation_menu().is_none());
        router.deactivate();
        assert!(!router.is_active());
    }

    #[test]
    fn test_deactivate_while_idle_is_noop() {
        let mut router = InteractionRouter::new();
        router.deactivate();
        router.deactivate();
        assert!(!router.is_active());
    }
}
