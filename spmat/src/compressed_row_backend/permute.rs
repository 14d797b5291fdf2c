//! Row and column permutation for the compressed-row backend

use spmat_core::swap_columns_in_row;

use super::CompressedRowStorage;

impl<T> CompressedRowStorage<T> {
    /// Exchange the slices of rows `i < j`
    ///
    /// Entries carry no row field, so the overlapping prefix is swapped
    /// whole. The surplus of the longer slice is block-moved across the
    /// rows in between, whose offsets shift by the size difference.
    pub(super) fn swap_row_slices(&mut self, i: i64, j: i64) {
        debug_assert!(i < j);
        let a = self.span(i);
        let b = self.span(j);
        let overlap = a.len().min(b.len());

        for k in 0..overlap {
            self.elements.swap(a.start + k, b.start + k);
        }

        let between = i as usize + 1..=j as usize;
        if a.len() > b.len() {
            let surplus = a.len() - overlap;
            self.elements[a.start + overlap..b.end].rotate_left(surplus);
            for pointer in &mut self.row_pointer[between] {
                *pointer -= surplus;
            }
        } else if b.len() > a.len() {
            let surplus = b.len() - overlap;
            self.elements[a.end..b.end].rotate_right(surplus);
            for pointer in &mut self.row_pointer[between] {
                *pointer += surplus;
            }
        }
    }

    /// Exchange columns `i < j` inside every row slice
    pub(super) fn swap_column_pair(&mut self, i: i64, j: i64) {
        debug_assert!(i < j);
        for row in 0..self.rows() {
            let (start, end) = (self.row_pointer[row], self.row_pointer[row + 1]);
            if start < end {
                swap_columns_in_row(&mut self.elements[start..end], i, j);
            }
        }
    }
}
