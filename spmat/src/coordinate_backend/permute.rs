//! Row and column permutation for the coordinate-list backend

use std::mem;

use spmat_core::{find_both_positions, find_greatest, swap_columns_in_row};

use super::CoordinateStorage;

impl<T> CoordinateStorage<T> {
    /// Exchange the runs of rows `i < j`
    ///
    /// The overlapping prefix of the two runs trades column and value in
    /// place. The surplus of the longer run is then rotated across the
    /// entries lying between the two runs and relabeled with its new row,
    /// which keeps the list globally sorted without reallocating.
    pub(super) fn swap_row_runs(&mut self, i: i64, j: i64) {
        debug_assert!(i < j);
        let len = self.entries.len();
        let a = find_both_positions(&self.entries, i, 0, len);
        let b = find_both_positions(&self.entries, j, a.end, len);
        let overlap = a.len().min(b.len());

        for k in 0..overlap {
            let (left, right) = self.entries.split_at_mut(b.start + k);
            let (x, y) = (&mut left[a.start + k], &mut right[0]);
            mem::swap(&mut x.column, &mut y.column);
            mem::swap(&mut x.value, &mut y.value);
        }

        if a.len() > b.len() {
            // [surplus of i | between | j's run] -> [between | j's run | surplus]
            let surplus = a.len() - overlap;
            let window = &mut self.entries[a.start + overlap..b.end];
            window.rotate_left(surplus);
            let tail = window.len() - surplus;
            for entry in &mut window[tail..] {
                entry.row = j;
            }
        } else if b.len() > a.len() {
            // [between | j's head | surplus of j] -> [surplus | between | j's head]
            let surplus = b.len() - overlap;
            let window = &mut self.entries[a.end..b.end];
            window.rotate_right(surplus);
            for entry in &mut window[..surplus] {
                entry.row = i;
            }
        }
    }

    /// Exchange columns `i < j` in every row run
    pub(super) fn swap_column_pair(&mut self, i: i64, j: i64) {
        debug_assert!(i < j);
        let len = self.entries.len();
        let mut start = 0;

        while start < len {
            let row = self.entries[start].row;
            let end = find_greatest(&self.entries, row, start, len);
            swap_columns_in_row(&mut self.entries[start..end], i, j);
            start = end;
        }
    }
}
