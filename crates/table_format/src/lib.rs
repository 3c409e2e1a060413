//! Table Formats - identity, structure, and location
//!
//! This crate defines the table blot hierarchy over the flat delta
//! document: row/cell identity generation, the attribute formats that tag
//! column markers and cell lines, the grouping pass that synthesizes
//! container/row/cell structure from adjacent tagged lines, and the
//! locator that resolves a document position to its enclosing table.

mod error;
mod formats;
mod ids;
mod locate;
mod table;

pub use error::*;
pub use formats::*;
pub use ids::*;
pub use locate::*;
pub use table::*;
