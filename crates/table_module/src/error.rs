//! Error types for table module operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableModuleError {
    #[error("document engine error: {0}")]
    Engine(#[from] delta_doc::DeltaDocError),
}

pub type Result<T> = std::result::Result<T, TableModuleError>;
