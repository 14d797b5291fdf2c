//! spmat - Default-eliding sparse matrix storage
//!
//! This library stores large, mostly-empty matrices compactly and gives
//! random read/write access, ascending row/column enumeration and row/column
//! permutation without materializing empty cells.
//!
//! ## Architecture
//!
//! spmat follows a clean definition/implementation separation:
//!
//! - **spmat-core**: contract traits, entry layouts, position finders and errors (no storage)
//! - **spmat**: the storage strategies and the generic matrix engine over them
//!
//! ## Quick Start
//!
//! ```rust
//! use spmat::{CoordinateMatrix, Matrix};
//!
//! fn example() -> spmat::Result<()> {
//!     let mut matrix: CoordinateMatrix<i32> = Matrix::new(5, 5)?;
//!     matrix.set(1, 2, 7)?;
//!     matrix.set(3, 3, 9)?;
//!
//!     matrix.swap_lines(1, 3)?;
//!     assert_eq!(matrix.get(3, 2)?, 7);
//!
//!     for (row, line) in matrix.lines() {
//!         for (col, value) in line.columns(&matrix)? {
//!             println!("matrix[{row}, {col}] = {value}");
//!         }
//!     }
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! ## Backends
//!
//! - **Hashed**: sorted map of sorted maps, cheap mutation everywhere
//! - **Coordinate**: one globally sorted entry list, compact and growable
//! - **Compressed-row**: row pointers over a flat list, cheapest reads, fixed row count

// Re-export core abstractions
pub use spmat_core::{
    // Core traits
    ElementComparer, LineStorage, MatrixOperations, NaturalEq, SparseMatrix, SparseMatrixMut,
    // Entry layouts
    ColumnEntry, Entry, RowSpan,
    // Error handling
    Axis, MatrixError, Result,
};

// Implementation modules
pub mod compressed_row_backend;
pub mod config;
pub mod coordinate_backend;
pub mod hashed_backend;
pub mod line;
pub mod matrix;
pub mod symmetry;

// Public exports
pub use compressed_row_backend::CompressedRowStorage;
pub use config::MatrixConfig;
pub use coordinate_backend::CoordinateStorage;
pub use hashed_backend::HashedStorage;
pub use line::Line;
pub use matrix::{CompressedRowMatrix, CoordinateMatrix, HashedMatrix, Matrix, MatrixId};
pub use symmetry::is_symmetric;
