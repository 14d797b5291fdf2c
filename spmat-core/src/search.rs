//! Binary-search position finders over sorted entry lists
//!
//! All finders work on a window `[lo, hi)` of a slice that is sorted by
//! `(row, column)` (coordinate lists) or by column alone (a single row of a
//! compressed-row list). They are pure functions with no allocation.

use crate::entry::{ColumnKeyed, RowKeyed, RowSpan};

/// Leftmost index in `[lo, hi)` whose `(row, column)` key is `>= (row, col)`
///
/// Returns `hi` when every key in the window is smaller. This is both the
/// lookup position for an exact match and the insertion point that keeps
/// the list sorted.
pub fn find_lowest<E>(entries: &[E], row: i64, col: i64, lo: usize, hi: usize) -> usize
where
    E: RowKeyed + ColumnKeyed,
{
    lo + entries[lo..hi].partition_point(|e| (e.row(), e.column()) < (row, col))
}

/// Leftmost index in `[lo, hi)` whose row is `> row`
///
/// This is the exclusive end of `row`'s run when the run starts inside the
/// window.
pub fn find_greatest<E: RowKeyed>(entries: &[E], row: i64, lo: usize, hi: usize) -> usize {
    lo + entries[lo..hi].partition_point(|e| e.row() <= row)
}

/// The `[start, end)` run of `row` inside `[lo, hi)`
///
/// The first and last elements of the window are tested before bisecting,
/// so a row sitting at either extreme of the window is found in O(1). When
/// the row has no entries the returned span is empty and positioned at the
/// row's insertion point.
pub fn find_both_positions<E: RowKeyed>(entries: &[E], row: i64, lo: usize, hi: usize) -> RowSpan {
    if lo >= hi {
        return RowSpan::new(lo, lo);
    }

    let first = entries[lo].row();
    let last = entries[hi - 1].row();

    if row < first {
        return RowSpan::new(lo, lo);
    }
    if row > last {
        return RowSpan::new(hi, hi);
    }

    let start = if first == row {
        lo
    } else {
        lo + entries[lo..hi].partition_point(|e| e.row() < row)
    };
    let end = if last == row {
        hi
    } else {
        find_greatest(entries, row, start, hi)
    };

    RowSpan::new(start, end)
}

/// Exact search for `col` inside `[lo, hi)`, a window sorted by column
///
/// `Ok(index)` when found, `Err(insertion_point)` otherwise, mirroring
/// `slice::binary_search`. Both positions are absolute indices into
/// `entries`.
pub fn find_column<E: ColumnKeyed>(
    entries: &[E],
    col: i64,
    lo: usize,
    hi: usize,
) -> Result<usize, usize> {
    entries[lo..hi]
        .binary_search_by_key(&col, |e| e.column())
        .map(|i| lo + i)
        .map_err(|i| lo + i)
}
