//! Construction configuration for sparse matrices
//!
//! A [`MatrixConfig`] carries the shape and sizing hints a backend is
//! created with. The default value and comparer are passed separately
//! because they are typed by the element.

use spmat_core::{MatrixError, Result};

/// Shape and sizing configuration for a new matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixConfig {
    /// Row bound (one past the last valid row)
    pub rows: i64,
    /// Column bound (one past the last valid column)
    pub cols: i64,
    /// Number of entries to reserve room for up front
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: usize,
}

impl MatrixConfig {
    /// Config for a `rows` x `cols` matrix with no reserved capacity
    pub const fn new(rows: i64, cols: i64) -> Self {
        Self {
            rows,
            cols,
            capacity: 0,
        }
    }

    /// Reserve room for `capacity` entries
    pub const fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the row bound
    pub const fn with_rows(mut self, rows: i64) -> Self {
        self.rows = rows;
        self
    }

    /// Set the column bound
    pub const fn with_cols(mut self, cols: i64) -> Self {
        self.cols = cols;
        self
    }

    /// `(rows, cols)`
    pub const fn shape(&self) -> (i64, i64) {
        (self.rows, self.cols)
    }

    /// Reject negative bounds
    pub const fn validate(&self) -> Result<()> {
        if self.rows < 0 || self.cols < 0 {
            return Err(MatrixError::InvalidShape {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}
