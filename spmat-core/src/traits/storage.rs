//! Storage strategy trait for sparse matrix backends
//!
//! A storage strategy only knows how to locate, insert, remove and permute
//! stored entries. Bounds checking, default elision and generation stamping
//! are layered on top by the matrix engine, so every method here may assume
//! its indices are non-negative and inside the engine's bounds, and that
//! every value handed to it is non-default.

use alloc::boxed::Box;
use alloc::collections::TryReserveError;

use crate::entry::RowSpan;

/// Pluggable storage behind a sparse matrix
///
/// Implementations must keep rows ascending and columns ascending within a
/// row for every iterator they return.
pub trait LineStorage<T> {
    /// Whether row indices past the construction-time row count can be
    /// introduced by `swap_rows`
    const GROWABLE_ROWS: bool;

    /// Empty storage for `rows` rows with room for `capacity` entries
    ///
    /// Fails instead of aborting when the up-front allocation cannot be
    /// made.
    fn with_shape(rows: usize, capacity: usize) -> Result<Self, TryReserveError>
    where
        Self: Sized;

    /// Stored value at `(row, col)`, if any
    fn get(&self, row: i64, col: i64) -> Option<&T>;

    /// Insert or overwrite; returns `true` when a new entry was created
    fn upsert(&mut self, row: i64, col: i64, value: T) -> bool;

    /// Remove the entry at `(row, col)` and return its value
    fn remove(&mut self, row: i64, col: i64) -> Option<T>;

    /// Remove every entry of `row`; returns the number removed
    fn remove_row(&mut self, row: i64) -> usize;

    /// Whether `row` has at least one stored entry
    fn contains_row(&self, row: i64) -> bool;

    /// Number of rows with at least one stored entry
    fn line_count(&self) -> usize;

    /// Number of stored entries
    fn nnz(&self) -> usize;

    /// Drop every entry
    fn clear(&mut self);

    /// Position of `row`'s entries in flat storage, `None` when the row is
    /// empty
    ///
    /// Map-based storage has no flat positions and reports `0..len`.
    fn row_span(&self, row: i64) -> Option<RowSpan>;

    /// Lookup inside a span previously returned by `row_span`
    fn get_in_span(&self, row: i64, span: RowSpan, col: i64) -> Option<&T> {
        let _ = span;
        self.get(row, col)
    }

    /// Stored `(column, value)` pairs of `row`, ascending
    fn row_entries(&self, row: i64) -> Box<dyn Iterator<Item = (i64, &T)> + '_>;

    /// Stored `(column, value)` pairs inside a span previously returned by
    /// `row_span`
    fn span_entries(&self, row: i64, span: RowSpan) -> Box<dyn Iterator<Item = (i64, &T)> + '_> {
        let _ = span;
        self.row_entries(row)
    }

    /// Rows with at least one stored entry, ascending
    fn line_rows(&self) -> Box<dyn Iterator<Item = i64> + '_>;

    /// Every stored `(row, column, value)`, row-major ascending
    fn entries(&self) -> Box<dyn Iterator<Item = (i64, i64, &T)> + '_>;

    /// Highest row with a stored entry, computed on demand
    fn max_row(&self) -> Option<i64>;

    /// Exchange the contents of rows `i` and `j`
    fn swap_rows(&mut self, i: i64, j: i64);

    /// Exchange the contents of columns `i` and `j` in every row
    fn swap_columns(&mut self, i: i64, j: i64);
}
