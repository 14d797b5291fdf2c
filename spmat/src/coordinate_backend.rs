//! Coordinate-list backend: one globally sorted list of entries
//!
//! Every stored value lives in a single `Vec<Entry<T>>` ordered by
//! `(row, column)`. Rows are found as runs by binary search, values are
//! overwritten in place through the vector, and structural changes shift
//! the tail of the list.

use std::collections::TryReserveError;

use spmat_core::{
    find_both_positions, find_column, find_greatest, find_lowest, Entry, LineStorage, RowSpan,
};

mod permute;

/// Globally sorted `(row, column, value)` storage
#[derive(Debug, Clone)]
pub struct CoordinateStorage<T> {
    entries: Vec<Entry<T>>,
    /// Number of distinct rows in `entries`
    lines: usize,
}

impl<T> Default for CoordinateStorage<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            lines: 0,
        }
    }
}

impl<T> CoordinateStorage<T> {
    /// The sorted entry list
    pub fn as_slice(&self) -> &[Entry<T>] {
        &self.entries
    }

    /// The run of `row` over the whole list; empty at the insertion point
    /// when the row has no entries
    fn run(&self, row: i64) -> RowSpan {
        find_both_positions(&self.entries, row, 0, self.entries.len())
    }

    /// `Ok(index)` of the entry at `(row, col)`, or `Err(insertion_point)`
    fn position(&self, row: i64, col: i64) -> Result<usize, usize> {
        let pos = find_lowest(&self.entries, row, col, 0, self.entries.len());
        match self.entries.get(pos) {
            Some(entry) if entry.key() == (row, col) => Ok(pos),
            _ => Err(pos),
        }
    }

    fn row_at(&self, index: usize) -> Option<i64> {
        self.entries.get(index).map(|entry| entry.row)
    }

    fn insert_at(&mut self, pos: usize, entry: Entry<T>) {
        let row = entry.row;
        let opens_line = pos.checked_sub(1).and_then(|p| self.row_at(p)) != Some(row)
            && self.row_at(pos) != Some(row);

        self.entries.insert(pos, entry);
        if opens_line {
            self.lines += 1;
        }
    }

    fn remove_at(&mut self, pos: usize) -> Entry<T> {
        let entry = self.entries.remove(pos);
        let closes_line = pos.checked_sub(1).and_then(|p| self.row_at(p)) != Some(entry.row)
            && self.row_at(pos) != Some(entry.row);

        if closes_line {
            self.lines -= 1;
        }
        entry
    }
}

impl<T> LineStorage<T> for CoordinateStorage<T> {
    const GROWABLE_ROWS: bool = true;

    fn with_shape(_rows: usize, capacity: usize) -> Result<Self, TryReserveError> {
        let mut entries = Vec::new();
        entries.try_reserve_exact(capacity)?;
        Ok(Self { entries, lines: 0 })
    }

    fn get(&self, row: i64, col: i64) -> Option<&T> {
        self.position(row, col)
            .ok()
            .map(|pos| &self.entries[pos].value)
    }

    fn upsert(&mut self, row: i64, col: i64, value: T) -> bool {
        match self.position(row, col) {
            Ok(pos) => {
                self.entries[pos].value = value;
                false
            }
            Err(pos) => {
                self.insert_at(pos, Entry::new(row, col, value));
                true
            }
        }
    }

    fn remove(&mut self, row: i64, col: i64) -> Option<T> {
        let pos = self.position(row, col).ok()?;
        Some(self.remove_at(pos).value)
    }

    fn remove_row(&mut self, row: i64) -> usize {
        let run = self.run(row);
        if run.is_empty() {
            return 0;
        }
        self.entries.drain(run.range());
        self.lines -= 1;
        run.len()
    }

    fn contains_row(&self, row: i64) -> bool {
        !self.run(row).is_empty()
    }

    fn line_count(&self) -> usize {
        self.lines
    }

    fn nnz(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.lines = 0;
    }

    fn row_span(&self, row: i64) -> Option<RowSpan> {
        let run = self.run(row);
        (!run.is_empty()).then_some(run)
    }

    fn get_in_span(&self, row: i64, span: RowSpan, col: i64) -> Option<&T> {
        debug_assert!(span.is_empty() || self.entries[span.start].row == row);
        find_column(&self.entries, col, span.start, span.end)
            .ok()
            .map(|pos| &self.entries[pos].value)
    }

    fn row_entries(&self, row: i64) -> Box<dyn Iterator<Item = (i64, &T)> + '_> {
        let run = self.run(row);
        self.span_entries(row, run)
    }

    fn span_entries(&self, _row: i64, span: RowSpan) -> Box<dyn Iterator<Item = (i64, &T)> + '_> {
        Box::new(
            self.entries[span.range()]
                .iter()
                .map(|entry| (entry.column, &entry.value)),
        )
    }

    fn line_rows(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(LineRows {
            entries: &self.entries,
            pos: 0,
        })
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (i64, i64, &T)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|entry| (entry.row, entry.column, &entry.value)),
        )
    }

    fn max_row(&self) -> Option<i64> {
        self.entries.last().map(|entry| entry.row)
    }

    fn swap_rows(&mut self, i: i64, j: i64) {
        self.swap_row_runs(i.min(j), i.max(j));
    }

    fn swap_columns(&mut self, i: i64, j: i64) {
        self.swap_column_pair(i.min(j), i.max(j));
    }
}

/// Distinct rows of a sorted entry list, skipping run by run
struct LineRows<'a, T> {
    entries: &'a [Entry<T>],
    pos: usize,
}

impl<T> Iterator for LineRows<'_, T> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let row = self.entries.get(self.pos)?.row;
        self.pos = find_greatest(self.entries, row, self.pos, self.entries.len());
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(super) fn storage(cells: &[(i64, i64, char)]) -> CoordinateStorage<char> {
        let mut s = CoordinateStorage::with_shape(0, cells.len()).unwrap();
        for &(r, c, v) in cells {
            s.upsert(r, c, v);
        }
        s
    }

    pub(super) fn dump(s: &CoordinateStorage<char>) -> Vec<(i64, i64, char)> {
        s.entries().map(|(r, c, v)| (r, c, *v)).collect()
    }

    #[test]
    fn test_global_order_preserved() {
        let s = storage(&[(2, 5, 'c'), (0, 3, 'a'), (2, 1, 'b'), (7, 0, 'd')]);
        let keys: Vec<(i64, i64)> = s.as_slice().iter().map(|e| e.key()).collect();
        assert_eq!(keys, [(0, 3), (2, 1), (2, 5), (7, 0)]);
        assert_eq!(s.line_count(), 3);
        assert_eq!(s.line_rows().collect::<Vec<_>>(), [0, 2, 7]);
    }

    #[test]
    fn test_overwrite_in_place() {
        let mut s = storage(&[(1, 1, 'a'), (1, 2, 'b')]);
        assert!(!s.upsert(1, 2, 'z'));
        assert_eq!(s.nnz(), 2);
        assert_eq!(s.get(1, 2), Some(&'z'));
    }

    #[test]
    fn test_line_count_tracking() {
        let mut s = storage(&[(0, 0, 'a'), (1, 0, 'b'), (1, 1, 'c'), (2, 0, 'd')]);
        assert_eq!(s.line_count(), 3);

        // Removing one of two entries keeps the line
        assert_eq!(s.remove(1, 0), Some('b'));
        assert_eq!(s.line_count(), 3);

        assert_eq!(s.remove(1, 1), Some('c'));
        assert_eq!(s.line_count(), 2);
        assert!(!s.contains_row(1));

        // Inserting between two existing rows opens a line
        s.upsert(1, 4, 'e');
        assert_eq!(s.line_count(), 3);
        s.upsert(1, 2, 'f');
        assert_eq!(s.line_count(), 3);

        assert_eq!(s.remove_row(1), 2);
        assert_eq!(s.line_count(), 2);
        assert_eq!(dump(&s), [(0, 0, 'a'), (2, 0, 'd')]);
    }

    #[test]
    fn test_span_lookup() {
        let s = storage(&[(0, 0, 'a'), (3, 2, 'b'), (3, 6, 'c'), (5, 1, 'd')]);
        let span = s.row_span(3).unwrap();
        assert_eq!(span, RowSpan::new(1, 3));
        assert_eq!(s.get_in_span(3, span, 6), Some(&'c'));
        assert_eq!(s.get_in_span(3, span, 1), None);
        assert_eq!(
            s.span_entries(3, span).map(|(c, v)| (c, *v)).collect::<Vec<_>>(),
            [(2, 'b'), (6, 'c')]
        );
        assert_eq!(s.row_span(4), None);
        assert_eq!(s.row_entries(4).count(), 0);
    }
}
