//! In-place permutation primitives over sorted entry slices
//!
//! Shared by the flat backends: both the coordinate list and the
//! compressed-row list hand one row's slice to these functions.

use crate::entry::ColumnKeyed;
use crate::search::find_column;

/// Exchange columns `i` and `j` (`i < j`) inside one row's entries
///
/// `row` must be sorted by column and stays sorted. When both columns are
/// present their entries trade places; when only one is present it moves
/// to the other column's sorted slot, shifting the entries between the two
/// columns by one. Returns `true` if anything moved.
pub fn swap_columns_in_row<E: ColumnKeyed>(row: &mut [E], i: i64, j: i64) -> bool {
    debug_assert!(i < j);
    let len = row.len();

    match (find_column(row, i, 0, len), find_column(row, j, 0, len)) {
        (Ok(pi), Ok(pj)) => {
            row.swap(pi, pj);
            row[pi].set_column(i);
            row[pj].set_column(j);
            true
        }
        (Ok(pi), Err(slot_j)) => {
            // slot_j > pi because j > i
            row[pi..slot_j].rotate_left(1);
            row[slot_j - 1].set_column(j);
            true
        }
        (Err(slot_i), Ok(pj)) => {
            row[slot_i..=pj].rotate_right(1);
            row[slot_i].set_column(i);
            true
        }
        (Err(_), Err(_)) => false,
    }
}
