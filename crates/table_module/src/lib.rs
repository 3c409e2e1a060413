//! Table Module - insertion, lookup, and per-table tooling
//!
//! The user-facing surface of the table system: `insert_table` /
//! `get_table` over the flat document engine, plus the interaction router
//! that maps pointer and context-menu events on the rendered surface to an
//! active table and drives the lifecycle of its tools (column tool,
//! selection tracker, operation menu). At most one table has active
//! tooling at any time.

mod error;
mod module;
mod router;
mod surface;
mod tools;

pub use error::*;
pub use module::*;
pub use router::*;
pub use surface::*;
pub use tools::*;
