//! Hashed backend: a sorted map of rows, each a sorted map of columns
//!
//! Rows and columns are both keyed lookups, so every mutation is
//! O(log R + log C) and row swaps just move two inner maps. Enumeration
//! comes out ascending because both levels are ordered maps.

use std::collections::{BTreeMap, TryReserveError};

use spmat_core::{LineStorage, RowSpan};

/// Row map -> column map storage
#[derive(Debug, Clone)]
pub struct HashedStorage<T> {
    rows: BTreeMap<i64, BTreeMap<i64, T>>,
    nnz: usize,
}

impl<T> Default for HashedStorage<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            nnz: 0,
        }
    }
}

impl<T> HashedStorage<T> {
    /// The stored column map of `row`
    pub fn line(&self, row: i64) -> Option<&BTreeMap<i64, T>> {
        self.rows.get(&row)
    }
}

impl<T> LineStorage<T> for HashedStorage<T> {
    const GROWABLE_ROWS: bool = true;

    fn with_shape(_rows: usize, _capacity: usize) -> Result<Self, TryReserveError> {
        Ok(Self::default())
    }

    fn get(&self, row: i64, col: i64) -> Option<&T> {
        self.rows.get(&row)?.get(&col)
    }

    fn upsert(&mut self, row: i64, col: i64, value: T) -> bool {
        let line = self.rows.entry(row).or_default();
        let inserted = line.insert(col, value).is_none();
        if inserted {
            self.nnz += 1;
        }
        inserted
    }

    fn remove(&mut self, row: i64, col: i64) -> Option<T> {
        let line = self.rows.get_mut(&row)?;
        let value = line.remove(&col)?;
        self.nnz -= 1;

        // Empty rows are never kept
        if line.is_empty() {
            self.rows.remove(&row);
        }
        Some(value)
    }

    fn remove_row(&mut self, row: i64) -> usize {
        match self.rows.remove(&row) {
            Some(line) => {
                self.nnz -= line.len();
                line.len()
            }
            None => 0,
        }
    }

    fn contains_row(&self, row: i64) -> bool {
        self.rows.contains_key(&row)
    }

    fn line_count(&self) -> usize {
        self.rows.len()
    }

    fn nnz(&self) -> usize {
        self.nnz
    }

    fn clear(&mut self) {
        self.rows.clear();
        self.nnz = 0;
    }

    fn row_span(&self, row: i64) -> Option<RowSpan> {
        self.rows.get(&row).map(|line| RowSpan::new(0, line.len()))
    }

    fn row_entries(&self, row: i64) -> Box<dyn Iterator<Item = (i64, &T)> + '_> {
        match self.rows.get(&row) {
            Some(line) => Box::new(line.iter().map(|(&col, value)| (col, value))),
            None => Box::new(std::iter::empty()),
        }
    }

    fn line_rows(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.rows.keys().copied())
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (i64, i64, &T)> + '_> {
        Box::new(self.rows.iter().flat_map(|(&row, line)| {
            line.iter().map(move |(&col, value)| (row, col, value))
        }))
    }

    fn max_row(&self) -> Option<i64> {
        self.rows.last_key_value().map(|(&row, _)| row)
    }

    fn swap_rows(&mut self, i: i64, j: i64) {
        let first = self.rows.remove(&i);
        let second = self.rows.remove(&j);
        if let Some(line) = first {
            self.rows.insert(j, line);
        }
        if let Some(line) = second {
            self.rows.insert(i, line);
        }
    }

    fn swap_columns(&mut self, i: i64, j: i64) {
        for line in self.rows.values_mut() {
            let first = line.remove(&i);
            let second = line.remove(&j);
            if let Some(value) = first {
                line.insert(j, value);
            }
            if let Some(value) = second {
                line.insert(i, value);
            }
        }
    }
}
