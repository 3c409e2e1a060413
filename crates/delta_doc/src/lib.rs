//! Delta Document - flat delta-based document engine
//!
//! This crate provides the document engine consumed by the table formats and
//! the table module: a flat ordered sequence of line records with line-level
//! attributes, edited through retain/insert deltas applied atomically, plus
//! a selection slot and a structural schema registry.

mod attributes;
mod delta;
mod document;
mod error;
mod range;
mod schema;

pub use attributes::*;
pub use delta::*;
pub use document::*;
pub use error::*;
pub use range::*;
pub use schema::*;
