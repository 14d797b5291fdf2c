//! Symmetry check over any sparse matrix
//!
//! Works against the read-only contract only, so it runs unchanged on
//! every backend. Only upper-triangle entries are compared against their
//! mirror; lower-triangle entries are merely counted, which is enough to
//! catch one that has no upper partner.

use spmat_core::{Result, SparseMatrix};

/// Whether `matrix` equals its own transpose
///
/// Non-square matrices are never symmetric. Stored values are compared
/// with `PartialEq`; an absent mirror cell reads as the default.
pub fn is_symmetric<M>(matrix: &M) -> Result<bool>
where
    M: SparseMatrix + ?Sized,
    M::Element: PartialEq,
{
    let (rows, cols) = matrix.dimensions();
    if rows != cols {
        return Ok(false);
    }

    let mut upper = 0usize;
    let mut lower = 0usize;
    for (row, col, value) in matrix.entries() {
        if col < row {
            lower += 1;
            continue;
        }
        if col == row {
            continue;
        }
        upper += 1;
        let mirror = matrix.get(col, row)?;
        if &mirror != value {
            return Ok(false);
        }
    }

    Ok(upper == lower)
}
