//! Stored entry layouts
//!
//! The coordinate backend keeps full `(row, column, value)` triples; the
//! compressed-row backend keeps `(column, value)` pairs and tracks rows
//! through its pointer array. Both expose their keys through [`RowKeyed`]
//! and [`ColumnKeyed`] so the position finders in [`crate::search`] work on
//! either layout.

/// A stored coordinate-list entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry<T> {
    /// Row index
    pub row: i64,
    /// Column index
    pub column: i64,
    /// Stored (non-default) value
    pub value: T,
}

impl<T> Entry<T> {
    /// Create a new entry
    pub const fn new(row: i64, column: i64, value: T) -> Self {
        Self { row, column, value }
    }

    /// The `(row, column)` sort key
    pub const fn key(&self) -> (i64, i64) {
        (self.row, self.column)
    }
}

/// A stored compressed-row entry; the row is implied by its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnEntry<T> {
    /// Column index
    pub column: i64,
    /// Stored (non-default) value
    pub value: T,
}

impl<T> ColumnEntry<T> {
    /// Create a new entry
    pub const fn new(column: i64, value: T) -> Self {
        Self { column, value }
    }
}

/// Half-open `[start, end)` range of one row's entries in a flat list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowSpan {
    pub start: usize,
    pub end: usize,
}

impl RowSpan {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of entries in the span
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Convert to a slice range
    pub const fn range(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }
}

/// Entries that carry their own row index
pub trait RowKeyed {
    fn row(&self) -> i64;
}

/// Entries that carry their own column index
pub trait ColumnKeyed {
    fn column(&self) -> i64;

    /// Relabel the entry's column; callers keep the list sorted
    fn set_column(&mut self, column: i64);
}

impl<T> RowKeyed for Entry<T> {
    #[inline]
    fn row(&self) -> i64 {
        self.row
    }
}

impl<T> ColumnKeyed for Entry<T> {
    #[inline]
    fn column(&self) -> i64 {
        self.column
    }

    #[inline]
    fn set_column(&mut self, column: i64) {
        self.column = column;
    }
}

impl<T> ColumnKeyed for ColumnEntry<T> {
    #[inline]
    fn column(&self) -> i64 {
        self.column
    }

    #[inline]
    fn set_column(&mut self, column: i64) {
        self.column = column;
    }
}
