//! Error types for the analysis core

use thiserror::Error;

/// Ways an adjacency matrix can fail validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedInput {
    #[error("matrix has no header row")]
    Empty,

    #[error("matrix is not square: {rows} rows, {columns} columns (row {row} has {cells} cells)")]
    NotSquare {
        rows: usize,
        columns: usize,
        row: usize,
        cells: usize,
    },

    #[error("duplicate node label {0:?}")]
    DuplicateLabel(String),

    #[error("row label {row:?} does not match column label {column:?} at position {position}")]
    LabelMismatch {
        position: usize,
        row: String,
        column: String,
    },

    #[error("nonzero diagonal entry {value} for node {label:?}")]
    NonZeroDiagonal { label: String, value: f64 },

    #[error("invalid cell {value:?} at row {row:?}, column {column:?}")]
    InvalidCell {
        row: String,
        column: String,
        value: String,
    },
}

/// Errors raised by the loader, graph builder and metric lookups
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("malformed adjacency matrix: {0}")]
    MalformedInput(#[from] MalformedInput),

    #[error("unknown node {0:?}")]
    UnknownNode(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// An iterative solver stopped before reaching its tolerance.
///
/// This is a warning, not a failure: the estimate it accompanies is the
/// solver's last iterate.
#[derive(Debug, Clone, PartialEq, Error, serde::Serialize)]
#[error("{measure} did not converge after {iterations} iterations (residual {residual:.3e}, tolerance {tolerance:.1e})")]
pub struct NonConvergence {
    pub measure: String,
    pub iterations: usize,
    pub residual: f64,
    pub tolerance: f64,
}
