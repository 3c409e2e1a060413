//! Error types for document engine operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeltaDocError {
    #[error("retain extends past document end: retained {retained}, document length {len}")]
    RetainPastEnd { retained: usize, len: usize },

    #[error("invalid selection: index {index} + length {length} exceeds document length {len}")]
    InvalidSelection {
        index: usize,
        length: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, DeltaDocError>;
