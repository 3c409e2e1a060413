//! Row and cell identity generation
//!
//! Identifiers are UUID v4 based: collision-free within a session (and
//! beyond), and generation never fails. Row ids are unique within a table,
//! cell ids within a row; both are immutable once assigned.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(Uuid);

impl RowId {
    /// Create a new random RowId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a RowId from a string representation
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a table cell, scoped within its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellId(Uuid);

impl CellId {
    /// Create a new random CellId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a CellId from a string representation
    pub fn from_string(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for CellId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
