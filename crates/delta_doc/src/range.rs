//! Range model - flat-offset cursor position and selection
//!
//! The engine addresses content by flat grapheme offsets; a range has an
//! index and a length. When length is zero the range is collapsed (just a
//! caret).

use serde::{Deserialize, Serialize};

/// A range in the flat document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Start offset in graphemes
    pub index: usize,
    /// Number of graphemes covered
    pub length: usize,
}

impl Range {
    /// Create a new range
    pub fn new(index: usize, length: usize) -> Self {
        Self { index, length }
    }

    /// Create a collapsed range (caret only)
    pub fn collapsed(index: usize) -> Self {
        Self { index, length: 0 }
    }

    /// Check if this range is collapsed (just a caret)
    pub fn is_collapsed(&self) -> bool {
        self.length == 0
    }

    /// End offset (exclusive)
    pub fn end(&self) -> usize {
        self.index + self.length
    }

    /// Check whether the range covers an offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.index && offset < self.end()
    }
}
