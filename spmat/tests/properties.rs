//! Property tests for swap and enumeration behavior
//!
//! These hold for every backend, so each property runs against all three.

use proptest::prelude::*;
use spmat::{
    CompressedRowStorage, CoordinateStorage, ElementComparer, HashedStorage, LineStorage, Matrix,
    NaturalEq,
};

const SIZE: i64 = 8;

fn cells() -> impl Strategy<Value = Vec<(i64, i64, i32)>> {
    prop::collection::vec((0..SIZE, 0..SIZE, -3i32..4), 0..40)
}

fn build<S: LineStorage<i32>>(cells: &[(i64, i64, i32)]) -> Matrix<i32, S, NaturalEq> {
    let mut m = Matrix::new(SIZE, SIZE).unwrap();
    for &(r, c, v) in cells {
        m.set(r, c, v).unwrap();
    }
    m
}

fn snapshot<S, C>(m: &Matrix<i32, S, C>) -> Vec<(i64, i64, i32)>
where
    S: LineStorage<i32>,
    C: ElementComparer<i32>,
{
    m.entries().map(|(r, c, v)| (r, c, *v)).collect()
}

fn check_swap_lines_involution<S: LineStorage<i32>>(
    cells: &[(i64, i64, i32)],
    i: i64,
    j: i64,
) -> Result<(), TestCaseError> {
    let mut m = build::<S>(cells);
    let before = snapshot(&m);
    m.swap_lines(i, j).unwrap();
    m.swap_lines(i, j).unwrap();
    prop_assert_eq!(snapshot(&m), before);
    Ok(())
}

fn check_swap_columns_involution<S: LineStorage<i32>>(
    cells: &[(i64, i64, i32)],
    i: i64,
    j: i64,
) -> Result<(), TestCaseError> {
    let mut m = build::<S>(cells);
    let before = snapshot(&m);
    m.swap_columns(i, j).unwrap();
    m.swap_columns(j, i).unwrap();
    prop_assert_eq!(snapshot(&m), before);
    Ok(())
}

fn check_swap_moves_cells<S: LineStorage<i32> + Clone>(
    cells: &[(i64, i64, i32)],
    i: i64,
    j: i64,
) -> Result<(), TestCaseError> {
    let before = build::<S>(cells);
    let mut after = before.clone();
    after.swap_lines(i, j).unwrap();

    for c in 0..SIZE {
        prop_assert_eq!(after.get(i, c).unwrap(), before.get(j, c).unwrap());
        prop_assert_eq!(after.get(j, c).unwrap(), before.get(i, c).unwrap());
    }
    prop_assert_eq!(after.nnz(), before.nnz());
    prop_assert_eq!(after.number_of_lines(), before.number_of_lines());
    Ok(())
}

fn check_ordering<S: LineStorage<i32>>(cells: &[(i64, i64, i32)]) -> Result<(), TestCaseError> {
    let m = build::<S>(cells);
    let entries = snapshot(&m);

    // Strictly ascending row-major, never storing the default
    prop_assert!(entries.windows(2).all(|w| (w[0].0, w[0].1) < (w[1].0, w[1].1)));
    prop_assert!(entries.iter().all(|&(_, _, v)| v != 0));

    let mut rows: Vec<i64> = entries.iter().map(|&(r, _, _)| r).collect();
    rows.dedup();
    prop_assert_eq!(m.number_of_lines(), rows.len());
    prop_assert_eq!(m.lines().map(|(row, _)| row).collect::<Vec<_>>(), rows);
    Ok(())
}

proptest! {
    #[test]
    fn swap_lines_is_involution(cells in cells(), i in 0..SIZE, j in 0..SIZE) {
        check_swap_lines_involution::<HashedStorage<i32>>(&cells, i, j)?;
        check_swap_lines_involution::<CoordinateStorage<i32>>(&cells, i, j)?;
        check_swap_lines_involution::<CompressedRowStorage<i32>>(&cells, i, j)?;
    }

    #[test]
    fn swap_columns_is_involution(cells in cells(), i in 0..SIZE, j in 0..SIZE) {
        check_swap_columns_involution::<HashedStorage<i32>>(&cells, i, j)?;
        check_swap_columns_involution::<CoordinateStorage<i32>>(&cells, i, j)?;
        check_swap_columns_involution::<CompressedRowStorage<i32>>(&cells, i, j)?;
    }

    #[test]
    fn swap_lines_exchanges_rows(cells in cells(), i in 0..SIZE, j in 0..SIZE) {
        check_swap_moves_cells::<HashedStorage<i32>>(&cells, i, j)?;
        check_swap_moves_cells::<CoordinateStorage<i32>>(&cells, i, j)?;
        check_swap_moves_cells::<CompressedRowStorage<i32>>(&cells, i, j)?;
    }

    #[test]
    fn enumeration_is_ascending(cells in cells()) {
        check_ordering::<HashedStorage<i32>>(&cells)?;
        check_ordering::<CoordinateStorage<i32>>(&cells)?;
        check_ordering::<CompressedRowStorage<i32>>(&cells)?;
    }

    #[test]
    fn swap_lines_past_bound_grows(cells in cells(), i in 0..SIZE, extra in 0..4i64) {
        check_row_growth::<HashedStorage<i32>>(&cells, i, SIZE + extra)?;
        check_row_growth::<CoordinateStorage<i32>>(&cells, i, SIZE + extra)?;
    }

    #[test]
    fn swap_columns_past_bound_grows(cells in cells(), i in 0..SIZE, extra in 0..4i64) {
        check_column_growth::<HashedStorage<i32>>(&cells, i, SIZE + extra)?;
        check_column_growth::<CoordinateStorage<i32>>(&cells, i, SIZE + extra)?;
        check_column_growth::<CompressedRowStorage<i32>>(&cells, i, SIZE + extra)?;
    }
}

// Growing swaps extend the bound and leave the vacated row empty
fn check_row_growth<S: LineStorage<i32>>(
    cells: &[(i64, i64, i32)],
    i: i64,
    j: i64,
) -> Result<(), TestCaseError> {
    let mut m = build::<S>(cells);
    let row: Vec<i32> = (0..SIZE).map(|c| m.get(i, c).unwrap()).collect();

    m.swap_lines(i, j).unwrap();
    prop_assert_eq!(m.dimensions(), (j + 1, SIZE));
    prop_assert!(!m.contains_line(i));
    for (c, &v) in row.iter().enumerate() {
        prop_assert_eq!(m.get(j, c as i64).unwrap(), v);
    }
    Ok(())
}

fn check_column_growth<S: LineStorage<i32>>(
    cells: &[(i64, i64, i32)],
    i: i64,
    j: i64,
) -> Result<(), TestCaseError> {
    let mut m = build::<S>(cells);
    let nnz = m.nnz();
    let column: Vec<i32> = (0..SIZE).map(|r| m.get(r, i).unwrap()).collect();

    m.swap_columns(i, j).unwrap();
    prop_assert_eq!(m.dimensions(), (SIZE, j + 1));
    prop_assert_eq!(m.nnz(), nnz);
    for (r, &v) in column.iter().enumerate() {
        let r = r as i64;
        prop_assert_eq!(m.get(r, j).unwrap(), v);
        prop_assert_eq!(m.get(r, i).unwrap(), 0);
    }
    Ok(())
}
