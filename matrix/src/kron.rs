use tc_field::{Fq, GaloisField};
use tc_maybe_rayon::prelude::*;

use crate::Matrix;
use crate::dense::RowMajorMatrix;

/// The Kronecker product `A ⊗ B`: block `(i, j)` is `a[i][j] * B`.
#[must_use]
pub fn kronecker(
    field: &GaloisField,
    a: &RowMajorMatrix<Fq>,
    b: &RowMajorMatrix<Fq>,
) -> RowMajorMatrix<Fq> {
    let (bh, bw) = (b.height(), b.width());
    let width = a.width() * bw;
    let values = (0..a.height() * bh)
        .into_par_iter()
        .flat_map(|r| {
            let (i, k) = (r / bh, r % bh);
            let b_row = b.row_slice(k);
            a.row_slice(i)
                .iter()
                .flat_map(|&a_ij| b_row.iter().map(move |&b_kl| field.mul(a_ij, b_kl)))
                .collect::<alloc::vec::Vec<_>>()
        })
        .collect();
    RowMajorMatrix::new(values, width)
}
