//! Core matrix contract traits
//!
//! These traits define what every sparse matrix exposes to consumers,
//! independent of the backend. Read-only consumers (submatrix views,
//! symmetry checks, elimination drivers) depend on [`SparseMatrix`] alone
//! and may rely on its ascending enumeration order.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::error::{check_index, Axis, MatrixError, Result};

/// Read-only sparse matrix contract
///
/// Every enumeration is ascending: rows ascending, and columns ascending
/// within a row. Consumers are allowed to depend on this.
pub trait SparseMatrix {
    /// The element type stored in this matrix
    type Element: Clone;

    /// Value at `(row, col)`, the default when nothing is stored there
    fn get(&self, row: i64, col: i64) -> Result<Self::Element>;

    /// Stored value at `(row, col)`, `None` when the cell holds the default
    fn get_stored(&self, row: i64, col: i64) -> Result<Option<&Self::Element>>;

    /// Current `(rows, cols)` bounds
    fn dimensions(&self) -> (i64, i64);

    /// Bound of one dimension: 0 for rows, 1 for columns
    fn get_length(&self, dimension: usize) -> Result<i64> {
        let (rows, cols) = self.dimensions();
        match Axis::from_dimension(dimension) {
            Some(Axis::Row) => Ok(rows),
            Some(Axis::Column) => Ok(cols),
            None => Err(MatrixError::InvalidDimension { dimension }),
        }
    }

    /// The value every absent cell reads as
    fn default_value(&self) -> &Self::Element;

    /// Number of rows with at least one stored entry
    fn number_of_lines(&self) -> usize;

    /// Whether `row` has at least one stored entry
    fn contains_line(&self, row: i64) -> bool;

    /// Number of stored entries
    fn nnz(&self) -> usize;

    /// Stored `(column, value)` pairs of `row`, ascending by column
    fn columns(&self, row: i64) -> Result<Box<dyn Iterator<Item = (i64, &Self::Element)> + '_>>;

    /// Rows with at least one stored entry, strictly ascending
    fn line_rows(&self) -> Box<dyn Iterator<Item = i64> + '_>;

    /// Every stored `(row, column, value)`, row-major ascending
    fn entries(&self) -> Box<dyn Iterator<Item = (i64, i64, &Self::Element)> + '_>;
}

/// Mutating sparse matrix contract
pub trait SparseMatrixMut: SparseMatrix {
    /// Store `value` at `(row, col)`; a default-equal value removes the entry
    fn set(&mut self, row: i64, col: i64, value: Self::Element) -> Result<()>;

    /// Remove every entry of `row`; `true` if anything was removed
    fn remove_line(&mut self, row: i64) -> Result<bool>;

    /// Exchange the contents of rows `i` and `j`
    fn swap_lines(&mut self, i: i64, j: i64) -> Result<()>;

    /// Exchange the contents of columns `i` and `j`
    fn swap_columns(&mut self, i: i64, j: i64) -> Result<()>;

    /// Remove every entry, keeping the bounds
    fn clear(&mut self);
}

/// Materializing row/column operations
///
/// Implemented for every [`SparseMatrix`]; the results own clones of the
/// stored values.
pub trait MatrixOperations: SparseMatrix {
    /// All stored `(column, value)` pairs of a row, ascending by column
    fn get_row(&self, row: i64) -> Result<Vec<(i64, Self::Element)>> {
        Ok(self
            .columns(row)?
            .map(|(col, value)| (col, value.clone()))
            .collect())
    }

    /// All stored `(row, value)` pairs of a column, ascending by row
    fn get_col(&self, col: i64) -> Result<Vec<(i64, Self::Element)>> {
        let (_, cols) = self.dimensions();
        check_index(Axis::Column, col, cols)?;

        let mut out = Vec::new();
        for row in self.line_rows() {
            if let Some(value) = self.get_stored(row, col)? {
                out.push((row, value.clone()));
            }
        }
        Ok(out)
    }
}

impl<M: SparseMatrix + ?Sized> MatrixOperations for M {}
