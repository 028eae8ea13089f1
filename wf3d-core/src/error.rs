/// Error types for the geometry kernel

use std::io;
use thiserror::Error;

/// Main error type for kernel operations
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Two operands of a matrix operation have incompatible shapes
    #[error("Dimension mismatch in {operation}: {left:?} vs {right:?}")]
    DimensionMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Homogeneous divide hit a zero weight
    #[error("Degenerate projection: row {row} has a zero homogeneous coordinate")]
    DegenerateProjection { row: usize },

    /// A triangle references a vertex that does not exist
    #[error("Triangle {triangle} references vertex {index}, but the mesh has {vertex_count} vertices")]
    InvalidTriangle {
        triangle: usize,
        index: usize,
        vertex_count: usize,
    },

    /// Entry access outside the matrix
    #[error("Index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Unrecognised solid name
    #[error("Unknown solid: {0:?}")]
    UnknownSolid(String),

    /// A mesh name that cannot be used as a single file name
    #[error("Invalid mesh name for a file: {0:?}")]
    InvalidName(String),

    /// Inf or NaN cannot be written to a mesh file
    #[error("Vertex {row} has a non-finite coordinate and cannot be saved")]
    NonFiniteCoordinate { row: usize },

    /// Malformed mesh file
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error while reading or writing a mesh file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for kernel operations
pub type Result<T> = std::result::Result<T, GeometryError>;
