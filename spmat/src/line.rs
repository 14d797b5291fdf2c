//! Line handles: row views stamped with a structural generation
//!
//! A [`Line`] does not borrow its matrix. It records the owner's identity,
//! the row it views and the generation its cached position was computed
//! at; every operation takes the owning matrix explicitly and re-resolves
//! the position when the matrix has changed structurally since. A disposed
//! line rejects every operation with [`MatrixError::DisposedHandle`].

use std::cell::Cell;

use spmat_core::{check_index, Axis, ElementComparer, LineStorage, MatrixError, Result, RowSpan};
use tracing::trace;

use crate::matrix::{Matrix, MatrixId};

/// Handle over one row of a [`Matrix`]
#[derive(Debug)]
pub struct Line {
    owner: MatrixId,
    row: i64,
    // (generation, span at that generation); None until first resolved
    stamp: Cell<Option<(u64, Option<RowSpan>)>>,
    disposed: bool,
}

impl Line {
    pub(crate) fn resolved(owner: MatrixId, row: i64, generation: u64, span: RowSpan) -> Self {
        Self {
            owner,
            row,
            stamp: Cell::new(Some((generation, Some(span)))),
            disposed: false,
        }
    }

    pub(crate) fn unresolved(owner: MatrixId, row: i64) -> Self {
        Self {
            owner,
            row,
            stamp: Cell::new(None),
            disposed: false,
        }
    }

    /// The row this line views
    pub fn row(&self) -> Result<i64> {
        self.check_live()?;
        Ok(self.row)
    }

    /// Release the handle; every later call fails with `DisposedHandle`
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.stamp.set(None);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Value at column `col` of this row
    pub fn get<T, S, C>(&self, matrix: &Matrix<T, S, C>, col: i64) -> Result<T>
    where
        T: Clone,
        S: LineStorage<T>,
        C: ElementComparer<T>,
    {
        let span = matrix.resolve(self)?;
        let (_, cols) = matrix.dimensions();
        check_index(Axis::Column, col, cols)?;

        let stored = span.and_then(|span| matrix.storage().get_in_span(self.row, span, col));
        Ok(stored
            .cloned()
            .unwrap_or_else(|| matrix.default_value().clone()))
    }

    /// Store `value` at column `col` of this row
    ///
    /// Same semantics as [`Matrix::set`]; the handle is re-stamped so it
    /// stays current after its own write.
    pub fn set<T, S, C>(&self, matrix: &mut Matrix<T, S, C>, col: i64, value: T) -> Result<()>
    where
        T: Clone,
        S: LineStorage<T>,
        C: ElementComparer<T>,
    {
        matrix.resolve(self)?;
        matrix.set(self.row, col, value)?;
        self.restamp(matrix.generation(), matrix.storage().row_span(self.row));
        Ok(())
    }

    /// Stored `(column, value)` pairs of this row, ascending by column
    pub fn columns<'m, T, S, C>(
        &self,
        matrix: &'m Matrix<T, S, C>,
    ) -> Result<Box<dyn Iterator<Item = (i64, &'m T)> + 'm>>
    where
        T: Clone,
        S: LineStorage<T>,
        C: ElementComparer<T>,
    {
        match matrix.resolve(self)? {
            Some(span) => Ok(matrix.storage().span_entries(self.row, span)),
            None => Ok(Box::new(std::iter::empty())),
        }
    }

    /// Number of stored entries in this row
    pub fn len<T, S, C>(&self, matrix: &Matrix<T, S, C>) -> Result<usize>
    where
        T: Clone,
        S: LineStorage<T>,
        C: ElementComparer<T>,
    {
        Ok(matrix.resolve(self)?.map_or(0, |span| span.len()))
    }

    pub fn is_empty<T, S, C>(&self, matrix: &Matrix<T, S, C>) -> Result<bool>
    where
        T: Clone,
        S: LineStorage<T>,
        C: ElementComparer<T>,
    {
        Ok(self.len(matrix)? == 0)
    }

    /// Whether column `col` of this row holds a stored entry
    pub fn contains_column<T, S, C>(&self, matrix: &Matrix<T, S, C>, col: i64) -> Result<bool>
    where
        T: Clone,
        S: LineStorage<T>,
        C: ElementComparer<T>,
    {
        let span = matrix.resolve(self)?;
        Ok(span.is_some_and(|span| matrix.storage().get_in_span(self.row, span, col).is_some()))
    }

    pub(crate) fn row_index(&self) -> i64 {
        self.row
    }

    pub(crate) fn check_owner(&self, owner: MatrixId) -> Result<()> {
        self.check_live()?;
        if self.owner != owner {
            return Err(MatrixError::ForeignHandle);
        }
        Ok(())
    }

    /// Cached span if the stamp matches `generation`
    pub(crate) fn cached_span(&self, generation: u64) -> Option<Option<RowSpan>> {
        match self.stamp.get() {
            Some((stamped, span)) if stamped == generation => Some(span),
            _ => None,
        }
    }

    pub(crate) fn restamp(&self, generation: u64, span: Option<RowSpan>) {
        trace!(row = self.row, generation, "revalidated line");
        self.stamp.set(Some((generation, span)));
    }

    fn check_live(&self) -> Result<()> {
        if self.disposed {
            return Err(MatrixError::DisposedHandle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{CompressedRowMatrix, CoordinateMatrix, HashedMatrix};
    use crate::{CompressedRowStorage, CoordinateStorage, HashedStorage};

    fn collect<T: Clone, S: LineStorage<T>>(line: &Line, m: &Matrix<T, S>) -> Vec<(i64, T)>
    where
        T: PartialEq,
    {
        line.columns(m)
            .unwrap()
            .map(|(c, v)| (c, v.clone()))
            .collect()
    }

    fn disposed_handle<S: LineStorage<i32>>() {
        let mut m: Matrix<i32, S> = Matrix::new(3, 3).unwrap();
        m.set(1, 1, 5).unwrap();

        let mut line = m.get_line(1).unwrap();
        assert_eq!(line.get(&m, 1), Ok(5));
        line.dispose();

        assert!(line.is_disposed());
        assert_eq!(line.row(), Err(MatrixError::DisposedHandle));
        assert_eq!(line.get(&m, 1), Err(MatrixError::DisposedHandle));
        assert_eq!(line.len(&m), Err(MatrixError::DisposedHandle));
        assert!(line.columns(&m).is_err());
        assert_eq!(line.set(&mut m, 0, 2), Err(MatrixError::DisposedHandle));
        assert_eq!(
            line.contains_column(&m, 1),
            Err(MatrixError::DisposedHandle)
        );

        // The failed write did not touch the matrix
        assert_eq!(m.get(1, 0), Ok(0));
    }

    #[test]
    fn test_disposed_handle_all_backends() {
        disposed_handle::<HashedStorage<i32>>();
        disposed_handle::<CoordinateStorage<i32>>();
        disposed_handle::<CompressedRowStorage<i32>>();
    }

    fn revalidates_after_mutation<S: LineStorage<i32>>() {
        let mut m: Matrix<i32, S> = Matrix::new(6, 6).unwrap();
        m.set(2, 1, 10).unwrap();
        m.set(2, 4, 40).unwrap();
        m.set(4, 0, 7).unwrap();

        let line = m.get_line(4).unwrap();
        assert_eq!(collect(&line, &m), [(0, 7)]);

        // Inserting before row 4 shifts its flat position
        m.set(0, 0, 1).unwrap();
        m.set(3, 5, 2).unwrap();
        m.set(2, 2, 20).unwrap();
        assert_eq!(line.get(&m, 0), Ok(7));
        assert_eq!(collect(&line, &m), [(0, 7)]);

        // Swapping replaces the row's content under the handle
        m.swap_lines(2, 4).unwrap();
        assert_eq!(collect(&line, &m), [(1, 10), (2, 20), (4, 40)]);
        assert_eq!(line.len(&m), Ok(3));

        // Removing the row leaves an empty but usable view
        m.remove_line(4).unwrap();
        assert_eq!(line.len(&m), Ok(0));
        assert!(line.is_empty(&m).unwrap());
        assert_eq!(line.get(&m, 1), Ok(0));
    }

    #[test]
    fn test_revalidates_after_mutation_all_backends() {
        revalidates_after_mutation::<HashedStorage<i32>>();
        revalidates_after_mutation::<CoordinateStorage<i32>>();
        revalidates_after_mutation::<CompressedRowStorage<i32>>();
    }

    #[test]
    fn test_line_set() {
        let mut m: CoordinateMatrix<i32> = Matrix::new(4, 4).unwrap();
        m.set(1, 3, 3).unwrap();
        m.set(2, 0, 9).unwrap();

        let line = m.get_line(1).unwrap();
        line.set(&mut m, 0, 1).unwrap();
        line.set(&mut m, 2, 2).unwrap();
        assert_eq!(collect(&line, &m), [(0, 1), (2, 2), (3, 3)]);
        assert!(line.contains_column(&m, 2).unwrap());

        line.set(&mut m, 2, 0).unwrap();
        assert!(!line.contains_column(&m, 2).unwrap());
        assert_eq!(m.get(2, 0), Ok(9));
        assert!(line.set(&mut m, 4, 1).unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_lines_are_lazy_and_ascending() {
        let mut m: CompressedRowMatrix<i32> = Matrix::new(5, 5).unwrap();
        m.set(4, 4, 1).unwrap();
        m.set(0, 2, 2).unwrap();
        m.set(2, 1, 3).unwrap();

        let lines: Vec<(i64, Line)> = m.lines().collect();
        let rows: Vec<i64> = lines.iter().map(|(row, _)| *row).collect();
        assert_eq!(rows, [0, 2, 4]);
        assert_eq!(lines[1].1.get(&m, 1), Ok(3));
        assert_eq!(lines[2].1.row(), Ok(4));
    }

    #[test]
    fn test_foreign_handle() {
        let mut a: HashedMatrix<i32> = Matrix::new(2, 2).unwrap();
        a.set(0, 0, 1).unwrap();
        let b = a.clone();

        let line = a.get_line(0).unwrap();
        assert_eq!(line.get(&b, 0), Err(MatrixError::ForeignHandle));
        assert_eq!(line.get(&a, 0), Ok(1));
    }
}
