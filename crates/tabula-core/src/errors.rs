//! Error types for the Tabula engine.

use thiserror::Error;

/// Top-level error type for the Tabula engine.
#[derive(Debug, Error)]
pub enum TabulaError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Which span of a cell an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanAxis {
    Column,
    Row,
}

impl std::fmt::Display for SpanAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpanAxis::Column => f.write_str("colspan"),
            SpanAxis::Row => f.write_str("rowspan"),
        }
    }
}

/// Errors in a table model handed over by the parser.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Cell {cell} in row {row} of table '{table}' has a {axis} of zero")]
    ZeroSpan {
        table: String,
        row: usize,
        cell: usize,
        axis: SpanAxis,
    },

    #[error("Cell {cell} in row {row} of table '{table}' has a {axis} of {span}, above the limit of {}", crate::MAX_SPAN)]
    SpanTooLarge {
        table: String,
        row: usize,
        cell: usize,
        axis: SpanAxis,
        span: usize,
    },

    #[error("Cell {cell} in row {row} of table '{table}' references a table without an identifier")]
    MissingReferenceId {
        table: String,
        row: usize,
        cell: usize,
    },

    #[error("Invalid color format: {value}")]
    InvalidColor { value: String },

    #[error("Unknown inner table alignment: {value}")]
    UnknownAlignment { value: String },

    #[error("Unknown inner table scale mode: {value}")]
    UnknownScaleMode { value: String },

    #[error("Table '{id}' is not defined in the document")]
    UnknownTable { id: String },

    #[error("Table '{id}' is defined more than once")]
    DuplicateTable { id: String },
}

/// Errors during layout computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Circular table reference: {}", .cycle.join(" -> "))]
    CyclicReference { cycle: Vec<String> },

    #[error("Maximum table nesting depth ({depth}) exceeded")]
    MaxDepthExceeded { depth: usize },

    #[error("Table '{id}' is not defined in the document")]
    UnknownTable { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_message_joins_path() {
        let err = LayoutError::CyclicReference {
            cycle: vec!["main".into(), "inner".into(), "main".into()],
        };
        assert_eq!(err.to_string(), "Circular table reference: main -> inner -> main");
    }

    #[test]
    fn test_top_level_wraps_stage_errors() {
        let err: TabulaError = ModelError::InvalidColor { value: "#zz".into() }.into();
        assert_eq!(err.to_string(), "Invalid color format: #zz");

        let err: TabulaError = LayoutError::MaxDepthExceeded { depth: 4 }.into();
        assert!(matches!(err, TabulaError::Layout(_)));
    }
}
