//! Error types for sparse matrix operations

use thiserror::Error;

/// Matrix axis an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// Row index (dimension 0)
    Row,
    /// Column index (dimension 1)
    Column,
}

impl Axis {
    /// Map a dimension selector to an axis
    pub const fn from_dimension(dimension: usize) -> Option<Self> {
        match dimension {
            0 => Some(Axis::Row),
            1 => Some(Axis::Column),
            _ => None,
        }
    }
}

impl core::fmt::Display for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur during sparse matrix operations
///
/// Every error is local and synchronous: an operation that returns one of
/// these leaves the matrix exactly as it was.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// Row or column index negative or past the current bound
    #[error("{axis} index {index} out of bounds for length {bound}")]
    IndexOutOfBounds {
        /// Axis the index was checked against
        axis: Axis,
        /// The rejected index
        index: i64,
        /// Current bound of that axis
        bound: i64,
    },

    /// Line requested for a row with no stored entries
    #[error("row {row} has no stored entries")]
    RowNotFound {
        /// The empty row
        row: i64,
    },

    /// Dimension selector other than 0 (rows) or 1 (columns)
    #[error("invalid dimension {dimension}, expected 0 or 1")]
    InvalidDimension {
        /// The rejected selector
        dimension: usize,
    },

    /// Line handle used after it was disposed
    #[error("line handle used after dispose")]
    DisposedHandle,

    /// Line handle used with a matrix other than the one that issued it
    #[error("line handle belongs to a different matrix")]
    ForeignHandle,

    /// Negative row or column count at construction
    #[error("invalid matrix shape {rows}x{cols}")]
    InvalidShape {
        /// Requested row count
        rows: i64,
        /// Requested column count
        cols: i64,
    },
}

impl MatrixError {
    /// Shorthand for an out-of-bounds row index
    pub const fn row_out_of_bounds(index: i64, bound: i64) -> Self {
        MatrixError::IndexOutOfBounds {
            axis: Axis::Row,
            index,
            bound,
        }
    }

    /// Shorthand for an out-of-bounds column index
    pub const fn column_out_of_bounds(index: i64, bound: i64) -> Self {
        MatrixError::IndexOutOfBounds {
            axis: Axis::Column,
            index,
            bound,
        }
    }

    /// Whether this error reports a bad coordinate
    pub const fn is_bounds_error(&self) -> bool {
        matches!(self, MatrixError::IndexOutOfBounds { .. })
    }
}

/// Result type for sparse matrix operations
pub type Result<T> = core::result::Result<T, MatrixError>;

/// Check `index` against `[0, bound)` on the given axis
pub const fn check_index(axis: Axis, index: i64, bound: i64) -> Result<()> {
    if index < 0 || index >= bound {
        return Err(MatrixError::IndexOutOfBounds { axis, index, bound });
    }
    Ok(())
}
