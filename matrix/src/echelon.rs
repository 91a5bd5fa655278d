//! Gaussian elimination over a [`GaloisField`].

use alloc::vec::Vec;

use tc_field::{Fq, GaloisField};
use tracing::instrument;

use crate::dense::RowMajorMatrix;
use crate::{Matrix, MatrixError};

/// A matrix in reduced row echelon form, along with the column of each pivot.
///
/// Row `i < pivots.len()` has a leading one in column `pivots[i]`, and that column is zero
/// everywhere else; the remaining rows are zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowEchelon {
    pub matrix: RowMajorMatrix<Fq>,
    pub pivots: Vec<usize>,
}

impl RowEchelon {
    #[must_use]
    pub fn rank(&self) -> usize {
        self.pivots.len()
    }

    /// Columns without a pivot.
    #[must_use]
    pub fn free_columns(&self) -> Vec<usize> {
        let mut pivots = self.pivots.iter().peekable();
        (0..self.matrix.width())
            .filter(|&c| {
                if pivots.peek() == Some(&&c) {
                    pivots.next();
                    false
                } else {
                    true
                }
            })
            .collect()
    }
}

/// Reduces `m` to reduced row echelon form.
#[must_use]
pub fn row_echelon(field: &GaloisField, m: &RowMajorMatrix<Fq>) -> RowEchelon {
    let mut matrix = m.clone();
    let (height, width) = (matrix.height(), matrix.width());
    let mut pivots = Vec::new();

    for col in 0..width {
        let r = pivots.len();
        if r == height {
            break;
        }
        let Some(pivot_row) = (r..height).find(|&i| !matrix.get(i, col).is_zero()) else {
            continue;
        };
        matrix.swap_rows(r, pivot_row);

        // Leading non-zero entries are units, so the inverse exists.
        let inv = field
            .try_inverse(matrix.get(r, col))
            .unwrap_or(Fq::ONE);
        field.scale_slice_in_place(matrix.row_mut(r), inv);

        let pivot = matrix.row_slice(r).to_vec();
        for i in (0..height).filter(|&i| i != r) {
            let factor = matrix.get(i, col);
            if !factor.is_zero() {
                field.add_scaled_slice_in_place(matrix.row_mut(i), &pivot, field.neg(factor));
            }
        }
        pivots.push(col);
    }

    RowEchelon { matrix, pivots }
}

#[must_use]
pub fn rank(field: &GaloisField, m: &RowMajorMatrix<Fq>) -> usize {
    row_echelon(field, m).rank()
}

/// A basis of `{ x : m * x = 0 }`, one vector per row.
///
/// For a generator matrix this is a parity-check matrix, and vice versa.
#[instrument(level = "trace", skip_all, fields(dims = %m.dimensions()))]
#[must_use]
pub fn null_space(field: &GaloisField, m: &RowMajorMatrix<Fq>) -> RowMajorMatrix<Fq> {
    let echelon = row_echelon(field, m);
    let width = m.width();
    let free = echelon.free_columns();

    let mut basis = RowMajorMatrix::zeros(free.len(), width);
    for (b, &f) in free.iter().enumerate() {
        let row = basis.row_mut(b);
        row[f] = Fq::ONE;
        for (i, &p) in echelon.pivots.iter().enumerate() {
            row[p] = field.neg(echelon.matrix.get(i, f));
        }
    }
    basis
}

/// Some `x` with `a * x = b`, or `None` when the system is inconsistent. Free variables are set
/// to zero, so the solution is the unique one whenever `a` has full column rank.
pub fn solve(
    field: &GaloisField,
    a: &RowMajorMatrix<Fq>,
    b: &[Fq],
) -> Result<Option<Vec<Fq>>, MatrixError> {
    if a.height() != b.len() {
        return Err(MatrixError::LengthMismatch {
            expected: a.height(),
            actual: b.len(),
        });
    }
    let unknowns = a.width();
    let augmented = a.hstack(&RowMajorMatrix::new_col(b.to_vec()))?;
    let echelon = row_echelon(field, &augmented);
    if echelon.pivots.last() == Some(&unknowns) {
        return Ok(None);
    }

    let mut x = GaloisField::zero_vec(unknowns);
    for (i, &p) in echelon.pivots.iter().enumerate() {
        x[p] = echelon.matrix.get(i, unknowns);
    }
    Ok(Some(x))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::mul::{mul_dense, mul_vec};

    #[test]
    fn test_row_echelon_gf2() {
        let gf2 = GaloisField::new(2).unwrap();
        let m = RowMajorMatrix::from_u32_rows(&[[1, 1, 0, 1], [1, 1, 1, 0], [0, 0, 1, 1]]).unwrap();
        let echelon = row_echelon(&gf2, &m);
        assert_eq!(echelon.pivots, vec![0, 2]);
        assert_eq!(echelon.free_columns(), vec![1, 3]);
        assert_eq!(
            echelon.matrix,
            RowMajorMatrix::from_u32_rows(&[[1, 1, 0, 1], [0, 0, 1, 1], [0, 0, 0, 0]]).unwrap()
        );
    }

    #[test]
    fn test_rank_over_gf3() {
        let gf3 = GaloisField::new(3).unwrap();
        // Third row is the sum of the first two.
        let m = RowMajorMatrix::from_u32_rows(&[[1, 2, 0], [2, 2, 1], [0, 1, 1]]).unwrap();
        assert_eq!(rank(&gf3, &m), 2);
        assert_eq!(rank(&gf3, &RowMajorMatrix::identity(4)), 4);
        assert_eq!(rank(&gf3, &RowMajorMatrix::zeros(3, 3)), 0);
    }

    #[test]
    fn test_null_space_is_orthogonal_and_complete() {
        let gf7 = GaloisField::new(7).unwrap();
        let m = RowMajorMatrix::from_u32_rows(&[[1, 2, 3, 4, 5], [0, 1, 6, 2, 2]]).unwrap();
        let kernel = null_space(&gf7, &m);
        assert_eq!(kernel.height(), 3);
        assert_eq!(rank(&gf7, &kernel), 3);
        assert!(mul_dense(&gf7, &m, &kernel.transpose()).unwrap().is_zero());
    }

    #[test]
    fn test_null_space_of_full_rank_square_is_empty() {
        let gf4 = GaloisField::new(4).unwrap();
        let kernel = null_space(&gf4, &RowMajorMatrix::identity(3));
        assert_eq!(kernel.height(), 0);
        assert_eq!(kernel.width(), 3);
    }

    #[test]
    fn test_solve() {
        let gf5 = GaloisField::new(5).unwrap();
        let a = RowMajorMatrix::from_u32_rows(&[[1, 1], [1, 4], [2, 0]]).unwrap();
        let x = Fq::new_slice(&[3, 2]);
        let b = mul_vec(&gf5, &a, &x).unwrap();
        assert_eq!(solve(&gf5, &a, &b).unwrap(), Some(x));

        let inconsistent = Fq::new_slice(&[1, 1, 1]);
        assert_eq!(solve(&gf5, &a, &inconsistent).unwrap(), None);
        assert!(solve(&gf5, &a, &[Fq::ONE]).is_err());
    }
}
