//! Delta operations - ordered retain/insert sequences
//!
//! A delta describes a structural edit as an ordered list of operations:
//! retains skip over existing content, inserts add new content with optional
//! attributes. A delta is applied to a document atomically as a single
//! change (see [`crate::Document::apply`]).

use crate::Attributes;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A single delta operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DeltaOp {
    /// Skip over `length` graphemes of existing content
    Retain { length: usize },
    /// Insert text, optionally tagged with attributes
    Insert {
        text: String,
        #[serde(default, skip_serializing_if = "Attributes::is_empty")]
        attributes: Attributes,
    },
}

/// An ordered sequence of delta operations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    ops: Vec<DeltaOp>,
}

impl Delta {
    /// Create an empty delta
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a retain (zero-length retains are dropped)
    pub fn retain(mut self, length: usize) -> Self {
        if length > 0 {
            self.ops.push(DeltaOp::Retain { length });
        }
        self
    }

    /// Append an unformatted insert
    pub fn insert(self, text: &str) -> Self {
        self.insert_with(text, Attributes::new())
    }

    /// Append an insert with attributes
    pub fn insert_with(mut self, text: &str, attributes: Attributes) -> Self {
        if !text.is_empty() {
            self.ops.push(DeltaOp::Insert {
                text: text.to_string(),
                attributes,
            });
        }
        self
    }

    /// The operations in order
    pub fn ops(&self) -> &[DeltaOp] {
        &self.ops
    }

    /// Check whether the delta has no operations
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Total grapheme length retained by this delta
    pub fn retain_len(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                DeltaOp::Retain { length } => *length,
                DeltaOp::Insert { .. } => 0,
            })
            .sum()
    }

    /// Total grapheme length inserted by this delta
    pub fn insert_len(&self) -> usize {
        self.ops
            .iter()
            .map(|op| match op {
                DeltaOp::Retain { .. } => 0,
                DeltaOp::Insert { text, .. } => text.graphemes(true).count(),
            })
            .sum()
    }
}
