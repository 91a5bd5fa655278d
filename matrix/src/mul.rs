use alloc::vec::Vec;

use itertools::Itertools;
use tc_field::{Fq, GaloisField};
use tc_maybe_rayon::prelude::*;

use crate::dense::RowMajorMatrix;
use crate::{Matrix, MatrixError};

/// Compute `C = A * B` over `field`.
pub fn mul_dense(
    field: &GaloisField,
    a: &RowMajorMatrix<Fq>,
    b: &RowMajorMatrix<Fq>,
) -> Result<RowMajorMatrix<Fq>, MatrixError> {
    if a.width() != b.height() {
        return Err(MatrixError::DimensionMismatch {
            op: "multiply",
            left: a.dimensions(),
            right: b.dimensions(),
        });
    }
    let c_width = b.width();
    let c_values = (0..a.height())
        .into_par_iter()
        .flat_map(|r| {
            let mut c_row = GaloisField::zero_vec(c_width);
            for (k, &a_rk) in a.row_slice(r).iter().enumerate() {
                field.add_scaled_slice_in_place(&mut c_row, b.row_slice(k), a_rk);
            }
            c_row
        })
        .collect();
    Ok(RowMajorMatrix::new(c_values, c_width))
}

/// Compute `A * v`, treating `v` as a column vector.
pub fn mul_vec(
    field: &GaloisField,
    a: &RowMajorMatrix<Fq>,
    v: &[Fq],
) -> Result<Vec<Fq>, MatrixError> {
    if a.width() != v.len() {
        return Err(MatrixError::LengthMismatch {
            expected: a.width(),
            actual: v.len(),
        });
    }
    Ok(a.rows().map(|row| field.dot(row, v)).collect())
}

/// Compute `v * A`, treating `v` as a row vector.
pub fn vec_mul(
    field: &GaloisField,
    v: &[Fq],
    a: &RowMajorMatrix<Fq>,
) -> Result<Vec<Fq>, MatrixError> {
    if a.height() != v.len() {
        return Err(MatrixError::LengthMismatch {
            expected: a.height(),
            actual: v.len(),
        });
    }
    let mut out = GaloisField::zero_vec(a.width());
    for (row, &s) in a.rows().zip_eq(v) {
        field.add_scaled_slice_in_place(&mut out, row, s);
    }
    Ok(out)
}
