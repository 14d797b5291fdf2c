//! Compressed-row backend: a row-pointer array over one flat entry list
//!
//! `row_pointer[r]..row_pointer[r + 1]` is row `r`'s slice of `elements`,
//! columns ascending within the slice. Lookups bisect a single row, but
//! every insertion or removal shifts the pointers of all later rows, so
//! reads are cheap and incremental writes cost O(R). The row count is
//! fixed when the storage is created.

use std::collections::TryReserveError;

use spmat_core::{find_column, ColumnEntry, LineStorage, RowSpan};

mod permute;

/// Row-pointer + `(column, value)` storage
#[derive(Debug, Clone)]
pub struct CompressedRowStorage<T> {
    /// `rows + 1` offsets into `elements`
    row_pointer: Vec<usize>,
    elements: Vec<ColumnEntry<T>>,
    /// Number of rows with a non-empty slice
    lines: usize,
}

impl<T> CompressedRowStorage<T> {
    /// Number of rows the storage was created with
    pub fn rows(&self) -> usize {
        self.row_pointer.len() - 1
    }

    /// Row offsets; `row_pointer()[r]..row_pointer()[r + 1]` is row `r`
    pub fn row_pointer(&self) -> &[usize] {
        &self.row_pointer
    }

    /// Flat entry list, row-major
    pub fn elements(&self) -> &[ColumnEntry<T>] {
        &self.elements
    }

    fn span(&self, row: i64) -> RowSpan {
        let r = row as usize;
        RowSpan::new(self.row_pointer[r], self.row_pointer[r + 1])
    }

    /// Shift the offsets of every row after `row`
    fn grow_after(&mut self, row: i64, by: usize) {
        for pointer in &mut self.row_pointer[row as usize + 1..] {
            *pointer += by;
        }
    }

    fn shrink_after(&mut self, row: i64, by: usize) {
        for pointer in &mut self.row_pointer[row as usize + 1..] {
            *pointer -= by;
        }
    }
}

impl<T> LineStorage<T> for CompressedRowStorage<T> {
    const GROWABLE_ROWS: bool = false;

    fn with_shape(rows: usize, capacity: usize) -> Result<Self, TryReserveError> {
        // A saturated length cannot be reserved and reports the overflow
        let pointers = rows.saturating_add(1);
        let mut row_pointer = Vec::new();
        row_pointer.try_reserve_exact(pointers)?;
        row_pointer.resize(pointers, 0);

        let mut elements = Vec::new();
        elements.try_reserve_exact(capacity)?;

        Ok(Self {
            row_pointer,
            elements,
            lines: 0,
        })
    }

    fn get(&self, row: i64, col: i64) -> Option<&T> {
        let span = self.span(row);
        self.get_in_span(row, span, col)
    }

    fn upsert(&mut self, row: i64, col: i64, value: T) -> bool {
        let span = self.span(row);
        match find_column(&self.elements, col, span.start, span.end) {
            Ok(pos) => {
                self.elements[pos].value = value;
                false
            }
            Err(pos) => {
                self.elements.insert(pos, ColumnEntry::new(col, value));
                self.grow_after(row, 1);
                if span.is_empty() {
                    self.lines += 1;
                }
                true
            }
        }
    }

    fn remove(&mut self, row: i64, col: i64) -> Option<T> {
        let span = self.span(row);
        let pos = find_column(&self.elements, col, span.start, span.end).ok()?;

        let entry = self.elements.remove(pos);
        self.shrink_after(row, 1);
        if span.len() == 1 {
            self.lines -= 1;
        }
        Some(entry.value)
    }

    fn remove_row(&mut self, row: i64) -> usize {
        let span = self.span(row);
        if span.is_empty() {
            return 0;
        }
        self.elements.drain(span.range());
        self.shrink_after(row, span.len());
        self.lines -= 1;
        span.len()
    }

    fn contains_row(&self, row: i64) -> bool {
        !self.span(row).is_empty()
    }

    fn line_count(&self) -> usize {
        self.lines
    }

    fn nnz(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
        self.row_pointer.fill(0);
        self.lines = 0;
    }

    fn row_span(&self, row: i64) -> Option<RowSpan> {
        let span = self.span(row);
        (!span.is_empty()).then_some(span)
    }

    fn get_in_span(&self, _row: i64, span: RowSpan, col: i64) -> Option<&T> {
        find_column(&self.elements, col, span.start, span.end)
            .ok()
            .map(|pos| &self.elements[pos].value)
    }

    fn row_entries(&self, row: i64) -> Box<dyn Iterator<Item = (i64, &T)> + '_> {
        let span = self.span(row);
        self.span_entries(row, span)
    }

    fn span_entries(&self, _row: i64, span: RowSpan) -> Box<dyn Iterator<Item = (i64, &T)> + '_> {
        Box::new(
            self.elements[span.range()]
                .iter()
                .map(|entry| (entry.column, &entry.value)),
        )
    }

    fn line_rows(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(
            self.row_pointer
                .windows(2)
                .enumerate()
                .filter(|(_, bounds)| bounds[0] < bounds[1])
                .map(|(row, _)| row as i64),
        )
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (i64, i64, &T)> + '_> {
        Box::new(
            self.row_pointer
                .windows(2)
                .enumerate()
                .flat_map(move |(row, bounds)| {
                    self.elements[bounds[0]..bounds[1]]
                        .iter()
                        .map(move |entry| (row as i64, entry.column, &entry.value))
                }),
        )
    }

    fn max_row(&self) -> Option<i64> {
        self.row_pointer
            .windows(2)
            .rposition(|bounds| bounds[0] < bounds[1])
            .map(|row| row as i64)
    }

    fn swap_rows(&mut self, i: i64, j: i64) {
        self.swap_row_slices(i.min(j), i.max(j));
    }

    fn swap_columns(&mut self, i: i64, j: i64) {
        self.swap_column_pair(i.min(j), i.max(j));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn storage(rows: usize, cells: &[(i64, i64, char)]) -> CompressedRowStorage<char> {
        let mut s = CompressedRowStorage::with_shape(rows, cells.len()).unwrap();
        for &(r, c, v) in cells {
            s.upsert(r, c, v);
        }
        s
    }

    pub(super) fn dump(s: &CompressedRowStorage<char>) -> Vec<(i64, i64, char)> {
        s.entries().map(|(r, c, v)| (r, c, *v)).collect()
    }

    #[test]
    fn test_pointer_bookkeeping() {
        let mut s = CompressedRowStorage::with_shape(4, 0).unwrap();
        assert_eq!(s.row_pointer(), [0, 0, 0, 0, 0]);

        s.upsert(2, 3, 'a');
        assert_eq!(s.row_pointer(), [0, 0, 0, 1, 1]);
        s.upsert(0, 1, 'b');
        assert_eq!(s.row_pointer(), [0, 1, 1, 2, 2]);
        s.upsert(2, 0, 'c');
        assert_eq!(s.row_pointer(), [0, 1, 1, 3, 3]);
        s.upsert(3, 5, 'd');
        assert_eq!(s.row_pointer(), [0, 1, 1, 3, 4]);

        let cols: Vec<i64> = s.elements().iter().map(|e| e.column).collect();
        assert_eq!(cols, [1, 0, 3, 5]);
        assert_eq!(s.line_count(), 3);

        assert_eq!(s.remove(2, 0), Some('c'));
        assert_eq!(s.row_pointer(), [0, 1, 1, 2, 3]);
        assert_eq!(s.remove(2, 0), None);
        assert_eq!(s.line_count(), 3);

        assert_eq!(s.remove(0, 1), Some('b'));
        assert_eq!(s.row_pointer(), [0, 0, 0, 1, 2]);
        assert_eq!(s.line_count(), 2);
    }

    #[test]
    fn test_with_shape_reports_overflow() {
        assert!(CompressedRowStorage::<char>::with_shape(usize::MAX, 0).is_err());
        assert!(CompressedRowStorage::<char>::with_shape(2, usize::MAX).is_err());

        let s = CompressedRowStorage::<char>::with_shape(0, 0).unwrap();
        assert_eq!(s.row_pointer(), [0]);
        assert_eq!(s.rows(), 0);
    }

    #[test]
    fn test_overwrite_does_not_shift() {
        let mut s = storage(3, &[(1, 1, 'a'), (2, 0, 'b')]);
        assert!(!s.upsert(1, 1, 'z'));
        assert_eq!(s.row_pointer(), [0, 0, 1, 2]);
        assert_eq!(s.get(1, 1), Some(&'z'));
    }

    #[test]
    fn test_enumeration() {
        let s = storage(5, &[(4, 2, 'e'), (1, 3, 'b'), (1, 0, 'a'), (3, 1, 'c')]);
        assert_eq!(s.line_rows().collect::<Vec<_>>(), [1, 3, 4]);
        assert_eq!(
            dump(&s),
            [(1, 0, 'a'), (1, 3, 'b'), (3, 1, 'c'), (4, 2, 'e')]
        );
        assert_eq!(s.max_row(), Some(4));
        assert_eq!(s.rows(), 5);
        assert_eq!(s.row_span(2), None);
        assert_eq!(s.row_span(1), Some(RowSpan::new(0, 2)));
    }

    #[test]
    fn test_remove_row_and_clear() {
        let mut s = storage(3, &[(0, 0, 'a'), (1, 0, 'b'), (1, 2, 'c'), (2, 1, 'd')]);
        assert_eq!(s.remove_row(1), 2);
        assert_eq!(s.row_pointer(), [0, 1, 1, 2]);
        assert_eq!(s.line_count(), 2);
        assert_eq!(s.remove_row(1), 0);

        s.clear();
        assert_eq!(s.row_pointer(), [0, 0, 0, 0]);
        assert_eq!(s.nnz(), 0);
        assert_eq!(s.max_row(), None);
    }
}
