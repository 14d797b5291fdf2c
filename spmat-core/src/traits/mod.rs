//! Abstract interfaces for sparse matrix storage
//!
//! This module defines the trait abstractions shared by every backend.
//! Traits are pure interfaces - concrete storage lives in the `spmat` crate.

pub mod comparer;
pub mod matrix;
pub mod storage;

pub use comparer::{ElementComparer, NaturalEq};
pub use matrix::{MatrixOperations, SparseMatrix, SparseMatrixMut};
pub use storage::LineStorage;
