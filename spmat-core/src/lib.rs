#![no_std]

//! spmat core - Sparse matrix contracts and position primitives
//!
//! This crate provides the error type, entry layouts, binary-search position
//! finders and the traits shared by every sparse matrix backend. It holds no
//! concrete storage: backends live in the `spmat` crate.

extern crate alloc;

pub mod entry;
pub mod error;
pub mod permute;
pub mod search;
pub mod traits;

pub use entry::{ColumnEntry, ColumnKeyed, Entry, RowKeyed, RowSpan};
pub use error::*;
pub use permute::swap_columns_in_row;
pub use search::{find_both_positions, find_column, find_greatest, find_lowest};
pub use traits::*;
