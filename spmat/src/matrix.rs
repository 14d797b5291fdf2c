//! Generic sparse matrix engine
//!
//! [`Matrix`] wraps a [`LineStorage`] strategy with everything the
//! strategies share: bounds, the default value and its comparer, and the
//! structural generation that [`Line`] handles are stamped with. The three
//! backends are type aliases over this one engine.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use spmat_core::{
    check_index, Axis, ElementComparer, LineStorage, MatrixError, NaturalEq, Result, RowSpan,
    SparseMatrix, SparseMatrixMut,
};
use tracing::debug;

use crate::compressed_row_backend::CompressedRowStorage;
use crate::config::MatrixConfig;
use crate::coordinate_backend::CoordinateStorage;
use crate::hashed_backend::HashedStorage;
use crate::line::Line;

static NEXT_MATRIX_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of a matrix instance, carried by its [`Line`] handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixId(u64);

impl MatrixId {
    fn next() -> Self {
        MatrixId(NEXT_MATRIX_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Sparse matrix over the hashed (sorted map of sorted maps) backend
pub type HashedMatrix<T, C = NaturalEq> = Matrix<T, HashedStorage<T>, C>;

/// Sparse matrix over the coordinate-list backend
pub type CoordinateMatrix<T, C = NaturalEq> = Matrix<T, CoordinateStorage<T>, C>;

/// Sparse matrix over the compressed-row backend
pub type CompressedRowMatrix<T, C = NaturalEq> = Matrix<T, CompressedRowStorage<T>, C>;

/// Default-eliding sparse matrix over a pluggable storage strategy
pub struct Matrix<T, S, C = NaturalEq> {
    id: MatrixId,
    rows: i64,
    cols: i64,
    default: T,
    comparer: C,
    storage: S,
    generation: u64,
}

impl<T, S> Matrix<T, S, NaturalEq>
where
    T: Clone + Default + PartialEq,
    S: LineStorage<T>,
{
    /// Empty `rows` x `cols` matrix whose default is `T::default()`
    pub fn new(rows: i64, cols: i64) -> Result<Self> {
        Self::with_comparer(rows, cols, T::default(), NaturalEq)
    }
}

impl<T, S> Matrix<T, S, NaturalEq>
where
    T: Clone + PartialEq,
    S: LineStorage<T>,
{
    /// Empty `rows` x `cols` matrix with an explicit default value
    pub fn with_default(rows: i64, cols: i64, default: T) -> Result<Self> {
        Self::with_comparer(rows, cols, default, NaturalEq)
    }
}

impl<T, S, C> Matrix<T, S, C>
where
    T: Clone,
    S: LineStorage<T>,
    C: ElementComparer<T>,
{
    /// Empty matrix with an explicit default value and comparer
    pub fn with_comparer(rows: i64, cols: i64, default: T, comparer: C) -> Result<Self> {
        Self::from_config(MatrixConfig::new(rows, cols), default, comparer)
    }

    /// Empty matrix shaped and sized by `config`
    ///
    /// A shape or capacity the backend cannot allocate up front is reported
    /// as [`MatrixError::InvalidShape`].
    pub fn from_config(config: MatrixConfig, default: T, comparer: C) -> Result<Self> {
        config.validate()?;
        let invalid = MatrixError::InvalidShape {
            rows: config.rows,
            cols: config.cols,
        };

        // Rows past usize only matter to backends that reserve per row
        let rows = usize::try_from(config.rows).unwrap_or(usize::MAX);
        let storage = S::with_shape(rows, config.capacity).map_err(|err| {
            debug!(
                rows = config.rows,
                capacity = config.capacity,
                %err,
                "storage allocation failed"
            );
            invalid
        })?;

        Ok(Self {
            id: MatrixId::next(),
            rows: config.rows,
            cols: config.cols,
            default,
            comparer,
            storage,
            generation: 0,
        })
    }

    /// Build a matrix from `(row, column, value)` triples
    ///
    /// Later triples overwrite earlier ones at the same coordinate, and
    /// default-equal values are elided exactly as with [`Matrix::set`].
    pub fn from_entries<I>(rows: i64, cols: i64, default: T, comparer: C, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i64, i64, T)>,
    {
        let mut matrix = Self::with_comparer(rows, cols, default, comparer)?;
        for (row, col, value) in entries {
            matrix.set(row, col, value)?;
        }
        Ok(matrix)
    }

    /// Copy the logical content into a matrix over another backend
    pub fn convert<S2>(&self) -> Result<Matrix<T, S2, C>>
    where
        S2: LineStorage<T>,
        C: Clone,
    {
        let config = MatrixConfig::new(self.rows, self.cols).with_capacity(self.nnz());
        let mut target: Matrix<T, S2, C> =
            Matrix::from_config(config, self.default.clone(), self.comparer.clone())?;
        for (row, col, value) in self.storage.entries() {
            target.storage.upsert(row, col, value.clone());
        }
        Ok(target)
    }

    /// Identity carried by this matrix's line handles
    pub fn id(&self) -> MatrixId {
        self.id
    }

    /// Structural generation, bumped whenever stored entries may move
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The comparer deciding default elision
    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// The value every absent cell reads as
    pub fn default_value(&self) -> &T {
        &self.default
    }

    /// Current `(rows, cols)` bounds
    pub fn dimensions(&self) -> (i64, i64) {
        (self.rows, self.cols)
    }

    /// Bound of one dimension: 0 for rows, 1 for columns
    pub fn get_length(&self, dimension: usize) -> Result<i64> {
        match Axis::from_dimension(dimension) {
            Some(Axis::Row) => Ok(self.rows),
            Some(Axis::Column) => Ok(self.cols),
            None => Err(MatrixError::InvalidDimension { dimension }),
        }
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.storage.nnz()
    }

    /// Number of rows with at least one stored entry
    pub fn number_of_lines(&self) -> usize {
        self.storage.line_count()
    }

    /// Whether `row` has at least one stored entry
    ///
    /// Out-of-range rows simply report `false`.
    pub fn contains_line(&self, row: i64) -> bool {
        row >= 0 && row < self.rows && self.storage.contains_row(row)
    }

    /// Value at `(row, col)`, the default when nothing is stored there
    pub fn get(&self, row: i64, col: i64) -> Result<T> {
        Ok(self
            .get_stored(row, col)?
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }

    /// Stored value at `(row, col)`, `None` when the cell holds the default
    pub fn get_stored(&self, row: i64, col: i64) -> Result<Option<&T>> {
        self.check_cell(row, col)?;
        Ok(self.storage.get(row, col))
    }

    /// Store `value` at `(row, col)`
    ///
    /// A value equal to the default (per the comparer) removes whatever is
    /// stored at that cell instead of being stored.
    pub fn set(&mut self, row: i64, col: i64, value: T) -> Result<()> {
        self.check_cell(row, col)?;

        if self.comparer.equals(&value, &self.default) {
            if self.storage.remove(row, col).is_some() {
                self.bump();
            }
        } else if self.storage.upsert(row, col, value) {
            self.bump();
        }
        Ok(())
    }

    /// Line handle for a row with stored entries
    pub fn get_line(&self, row: i64) -> Result<Line> {
        self.try_get_line(row)?
            .ok_or(MatrixError::RowNotFound { row })
    }

    /// Line handle for `row`, `None` when the row has no stored entries
    pub fn try_get_line(&self, row: i64) -> Result<Option<Line>> {
        check_index(Axis::Row, row, self.rows)?;
        Ok(self
            .storage
            .row_span(row)
            .map(|span| Line::resolved(self.id, row, self.generation, span)))
    }

    /// `(row, Line)` for every row with stored entries, strictly ascending
    ///
    /// The handles resolve their position lazily on first use.
    pub fn lines(&self) -> impl Iterator<Item = (i64, Line)> + '_ {
        let id = self.id;
        self.storage
            .line_rows()
            .map(move |row| (row, Line::unresolved(id, row)))
    }

    /// Stored `(column, value)` pairs of `row`, ascending by column
    pub fn columns(&self, row: i64) -> Result<Box<dyn Iterator<Item = (i64, &T)> + '_>> {
        check_index(Axis::Row, row, self.rows)?;
        Ok(self.storage.row_entries(row))
    }

    /// Every stored `(row, column, value)`, row-major ascending
    pub fn entries(&self) -> Box<dyn Iterator<Item = (i64, i64, &T)> + '_> {
        self.storage.entries()
    }

    /// Remove every entry of `row`; `true` if anything was removed
    pub fn remove_line(&mut self, row: i64) -> Result<bool> {
        check_index(Axis::Row, row, self.rows)?;

        let removed = self.storage.remove_row(row);
        if removed == 0 {
            return Ok(false);
        }
        debug!(row, removed, "removed line");
        self.bump();
        Ok(true)
    }

    /// Exchange the contents of rows `i` and `j`
    ///
    /// On backends with growable rows an index at or past the row bound
    /// extends the bound to `index + 1`; the compressed-row backend has a
    /// fixed row count and rejects it.
    pub fn swap_lines(&mut self, i: i64, j: i64) -> Result<()> {
        let (low, high) = (i.min(j), i.max(j));
        if low < 0 {
            return Err(MatrixError::row_out_of_bounds(low, self.rows));
        }
        if high >= self.rows {
            let grown = high
                .checked_add(1)
                .filter(|_| S::GROWABLE_ROWS)
                .ok_or(MatrixError::row_out_of_bounds(high, self.rows))?;
            debug!(from = self.rows, to = grown, "growing row bound");
            self.rows = grown;
        }

        if low == high || !(self.storage.contains_row(low) || self.storage.contains_row(high)) {
            return Ok(());
        }

        debug!(i = low, j = high, "swapping lines");
        self.storage.swap_rows(low, high);
        self.bump();
        debug_assert!(self.storage.max_row().map_or(true, |row| row < self.rows));
        Ok(())
    }

    /// Exchange the contents of columns `i` and `j` in every row
    ///
    /// An index at or past the column bound extends the bound to
    /// `index + 1` on every backend.
    pub fn swap_columns(&mut self, i: i64, j: i64) -> Result<()> {
        let (low, high) = (i.min(j), i.max(j));
        if low < 0 {
            return Err(MatrixError::column_out_of_bounds(low, self.cols));
        }
        if high >= self.cols {
            let grown = high
                .checked_add(1)
                .ok_or(MatrixError::column_out_of_bounds(high, self.cols))?;
            debug!(from = self.cols, to = grown, "growing column bound");
            self.cols = grown;
        }

        if low == high || self.storage.nnz() == 0 {
            return Ok(());
        }

        debug!(i = low, j = high, "swapping columns");
        self.storage.swap_columns(low, high);
        self.bump();
        Ok(())
    }

    /// Remove every entry, keeping the bounds
    pub fn clear(&mut self) {
        if self.storage.nnz() == 0 {
            return;
        }
        debug!(nnz = self.storage.nnz(), "clearing matrix");
        self.storage.clear();
        self.bump();
    }

    /// Check a handle against this matrix and return its current span
    ///
    /// A handle stamped with an older generation re-resolves its span here;
    /// it never reads through a stale position.
    pub(crate) fn resolve(&self, line: &Line) -> Result<Option<RowSpan>> {
        line.check_owner(self.id)?;
        if let Some(span) = line.cached_span(self.generation) {
            return Ok(span);
        }
        let span = self.storage.row_span(line.row_index());
        line.restamp(self.generation, span);
        Ok(span)
    }

    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    fn check_cell(&self, row: i64, col: i64) -> Result<()> {
        check_index(Axis::Row, row, self.rows)?;
        check_index(Axis::Column, col, self.cols)
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T, S, C> Clone for Matrix<T, S, C>
where
    T: Clone,
    S: Clone,
    C: Clone,
{
    /// The copy gets a fresh identity: handles issued by the source do not
    /// validate against it.
    fn clone(&self) -> Self {
        Self {
            id: MatrixId::next(),
            rows: self.rows,
            cols: self.cols,
            default: self.default.clone(),
            comparer: self.comparer.clone(),
            storage: self.storage.clone(),
            generation: self.generation,
        }
    }
}

impl<T, S, C> fmt::Debug for Matrix<T, S, C>
where
    T: fmt::Debug,
    S: LineStorage<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix")
            .field("id", &self.id)
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("default", &self.default)
            .field("nnz", &self.storage.nnz())
            .field("lines", &self.storage.line_count())
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T, S, C> SparseMatrix for Matrix<T, S, C>
where
    T: Clone,
    S: LineStorage<T>,
    C: ElementComparer<T>,
{
    type Element = T;

    fn get(&self, row: i64, col: i64) -> Result<T> {
        Matrix::get(self, row, col)
    }

    fn get_stored(&self, row: i64, col: i64) -> Result<Option<&T>> {
        Matrix::get_stored(self, row, col)
    }

    fn dimensions(&self) -> (i64, i64) {
        Matrix::dimensions(self)
    }

    fn default_value(&self) -> &T {
        Matrix::default_value(self)
    }

    fn number_of_lines(&self) -> usize {
        Matrix::number_of_lines(self)
    }

    fn contains_line(&self, row: i64) -> bool {
        Matrix::contains_line(self, row)
    }

    fn nnz(&self) -> usize {
        Matrix::nnz(self)
    }

    fn columns(&self, row: i64) -> Result<Box<dyn Iterator<Item = (i64, &T)> + '_>> {
        Matrix::columns(self, row)
    }

    fn line_rows(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        self.storage.line_rows()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (i64, i64, &T)> + '_> {
        Matrix::entries(self)
    }
}

impl<T, S, C> SparseMatrixMut for Matrix<T, S, C>
where
    T: Clone,
    S: LineStorage<T>,
    C: ElementComparer<T>,
{
    fn set(&mut self, row: i64, col: i64, value: T) -> Result<()> {
        Matrix::set(self, row, col, value)
    }

    fn remove_line(&mut self, row: i64) -> Result<bool> {
        Matrix::remove_line(self, row)
    }

    fn swap_lines(&mut self, i: i64, j: i64) -> Result<()> {
        Matrix::swap_lines(self, i, j)
    }

    fn swap_columns(&mut self, i: i64, j: i64) -> Result<()> {
        Matrix::swap_columns(self, i, j)
    }

    fn clear(&mut self) {
        Matrix::clear(self)
    }
}
