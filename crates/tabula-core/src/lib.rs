//! Core types for the Tabula table layout engine.
//!
//! This crate provides the foundational types used across the other tabula crates:
//! - The table model (documents, tables, rows, cells, table references)
//! - Value types (identifiers, colours)
//! - The styling fallback chain
//! - Error types
//!
//! Models are produced by an external parser and are treated as read-only by
//! the layout engine.

pub mod errors;
pub mod style;
pub mod summary;
pub mod table;
pub mod types;

pub use errors::*;
pub use table::*;
pub use types::*;
