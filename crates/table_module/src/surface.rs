//! Rendered surface abstraction
//!
//! An arena tree standing in for the rendered document surface. Hit
//! testing works the way it does against a live DOM: walk the event
//! target's ancestor chain for the nearest node satisfying a predicate.
//! The predicates are pure functions over node tag, class, and data
//! attributes, matching the registered table formats.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use table_format::{ROW_DATA_ATTRIBUTE, TABLE_CLASS};

/// An axis-aligned rectangle in page coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Identifier of a node within one surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceNodeId(usize);

/// One element of the rendered surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceNode {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    bounds: Rect,
    parent: Option<SurfaceNodeId>,
}

impl SurfaceNode {
    /// Create a node with a tag and no parent; the parent is assigned on
    /// insertion into a surface
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            bounds: Rect::default(),
            parent: None,
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn parent(&self) -> Option<SurfaceNodeId> {
        self.parent
    }
}

/// The rendered surface: an arena of nodes with parent links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Surface {
    nodes: Vec<SurfaceNode>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under a parent (or as a root), returning its id
    pub fn insert(&mut self, mut node: SurfaceNode, parent: Option<SurfaceNodeId>) -> SurfaceNodeId {
        node.parent = parent;
        self.nodes.push(node);
        SurfaceNodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: SurfaceNodeId) -> &SurfaceNode {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node and its ancestors, nearest first
    pub fn ancestors_inclusive(
        &self,
        id: SurfaceNodeId,
    ) -> impl Iterator<Item = SurfaceNodeId> + '_ {
        std::iter::successors(Some(id), move |&current| self.node(current).parent)
    }

    /// Nearest node on the ancestor chain (inclusive) satisfying a
    /// predicate
    pub fn nearest_ancestor<P>(&self, from: SurfaceNodeId, predicate: P) -> Option<SurfaceNodeId>
    where
        P: Fn(&SurfaceNode) -> bool,
    {
        self.ancestors_inclusive(from)
            .find(|&id| predicate(self.node(id)))
    }
}

/// Is this a rendered table: a `TABLE` element carrying the recognized
/// style class
pub fn is_table_node(node: &SurfaceNode) -> bool {
    node.tag().eq_ignore_ascii_case("table") && node.has_class(TABLE_CLASS)
}

/// Is this a rendered row: a `TR` element bearing row identity
pub fn is_row_node(node: &SurfaceNode) -> bool {
    node.tag().eq_ignore_ascii_case("tr") && node.attribute(ROW_DATA_ATTRIBUTE).is_some()
}

/// Is this a rendered cell: a `TD` element bearing row identity
pub fn is_cell_node(node: &SurfaceNode) -> bool {
    node.tag().eq_ignore_ascii_case("td") && node.attribute(ROW_DATA_ATTRIBUTE).is_some()
}
