//! Standard code families with known parameters.

use alloc::format;
use alloc::sync::Arc;
use alloc::vec;

use itertools::Itertools;
use tc_field::{Fq, GaloisField};
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::echelon::null_space;

use crate::{CodeError, LinearCode};

impl LinearCode {
    /// The trivial `[n, n, 1]` code whose encoder is the identity function.
    pub fn identity(field: Arc<GaloisField>, n: usize) -> Result<Self, CodeError> {
        if n == 0 {
            return Err(CodeError::InvalidCode("identity code of length 0".into()));
        }
        Ok(Self::from_parts(
            field,
            RowMajorMatrix::identity(n),
            RowMajorMatrix::empty(n),
            1,
        ))
    }

    /// The `[n, 1, n]` repetition code.
    pub fn repetition(field: Arc<GaloisField>, n: usize) -> Result<Self, CodeError> {
        if n == 0 {
            return Err(CodeError::InvalidCode("repetition code of length 0".into()));
        }
        let generator = RowMajorMatrix::new_row(vec![Fq::ONE; n]);
        let parity_check = null_space(&field, &generator);
        Ok(Self::from_parts(field, generator, parity_check, n))
    }

    /// The `[n, n - 1, 2]` code whose symbols sum to zero.
    pub fn single_parity_check(field: Arc<GaloisField>, n: usize) -> Result<Self, CodeError> {
        if n < 2 {
            return Err(CodeError::InvalidCode(format!(
                "single parity-check code needs length at least 2, got {n}"
            )));
        }
        let parity_check = RowMajorMatrix::new_row(vec![Fq::ONE; n]);
        let generator = null_space(&field, &parity_check);
        Ok(Self::from_parts(field, generator, parity_check, 2))
    }

    /// The Hamming code with `r` parity checks: `[(q^r - 1) / (q - 1), n - r, 3]`.
    ///
    /// The columns of the parity-check matrix are the non-zero vectors of `GF(q)^r` whose last
    /// non-zero coordinate is one, in increasing order of their base-`q` value. Over `GF(2)`,
    /// column `j` is therefore the binary expansion of `j + 1`.
    pub fn hamming(field: Arc<GaloisField>, r: usize) -> Result<Self, CodeError> {
        let q = field.order() as usize;
        let n = q
            .checked_pow(r as u32)
            .filter(|_| r >= 2)
            .map(|qr| (qr - 1) / (q - 1))
            .ok_or_else(|| {
                CodeError::InvalidCode(format!("Hamming code with {r} checks over {field}"))
            })?;

        let mut parity_check = RowMajorMatrix::zeros(r, n);
        let columns = (1..q.pow(r as u32)).filter(|&v| leading_digit(v, q) == 1);
        for (c, v) in columns.enumerate() {
            let mut v = v;
            for row in 0..r {
                parity_check.values[row * n + c] = Fq::new((v % q) as u32);
                v /= q;
            }
        }
        let generator = null_space(&field, &parity_check);
        Ok(Self::from_parts(field, generator, parity_check, 3))
    }

    /// The Reed-Solomon code of length `n` and dimension `k`, evaluating polynomials of degree
    /// below `k` at the points `g^0, ..., g^(n-1)` for the field's generator `g`.
    ///
    /// Requires `1 <= k <= n <= q - 1`. The code is MDS: `d = n - k + 1`.
    pub fn reed_solomon(field: Arc<GaloisField>, n: usize, k: usize) -> Result<Self, CodeError> {
        let max_len = field.order() as usize - 1;
        if k == 0 || k > n || n > max_len {
            return Err(CodeError::InvalidCode(format!(
                "Reed-Solomon code needs 1 <= k <= n <= {max_len}, got n = {n}, k = {k}"
            )));
        }
        let g = field.generator();
        let points = (0..n).map(|j| field.pow(g, j as u64)).collect_vec();
        let mut generator = RowMajorMatrix::zeros(k, n);
        for (j, &point) in points.iter().enumerate() {
            let mut power = Fq::ONE;
            for i in 0..k {
                generator.values[i * n + j] = power;
                power = field.mul(power, point);
            }
        }
        let parity_check = null_space(&field, &generator);
        Ok(Self::from_parts(field, generator, parity_check, n - k + 1)
            .with_evaluation_points(points))
    }
}

fn leading_digit(mut v: usize, q: usize) -> usize {
    while v >= q {
        v /= q;
    }
    v
}

#[cfg(test)]
mod tests {
    use tc_matrix::Matrix;
    use tc_matrix::echelon::rank;
    use tc_matrix::mul::mul_dense;

    use super::*;
    use crate::distance::minimum_distance;

    fn gf(q: u32) -> Arc<GaloisField> {
        Arc::new(GaloisField::new(q).unwrap())
    }

    /// The stated distance agrees with a brute-force computation, and the matrices are dual.
    fn check_consistent(code: &LinearCode) {
        let field = code.field();
        let g = code.generator_matrix();
        let h = code.parity_check_matrix();
        assert_eq!(rank(field, g), code.dimension());
        assert_eq!(rank(field, h), code.length() - code.dimension());
        if h.height() > 0 {
            assert!(mul_dense(field, g, &h.transpose()).unwrap().is_zero());
        }
        assert_eq!(minimum_distance(field, g, h), code.minimum_distance());
    }

    #[test]
    fn test_small_families() {
        for q in [2, 3, 4] {
            for n in 2..6 {
                let rep = LinearCode::repetition(gf(q), n).unwrap();
                assert_eq!((rep.dimension(), rep.minimum_distance()), (1, n));
                check_consistent(&rep);

                let spc = LinearCode::single_parity_check(gf(q), n).unwrap();
                assert_eq!((spc.dimension(), spc.minimum_distance()), (n - 1, 2));
                check_consistent(&spc);
            }
            check_consistent(&LinearCode::identity(gf(q), 3).unwrap());
        }
        assert!(LinearCode::single_parity_check(gf(2), 1).is_err());
        assert!(LinearCode::repetition(gf(2), 0).is_err());
    }

    #[test]
    fn test_binary_hamming() {
        let code = LinearCode::hamming(gf(2), 3).unwrap();
        assert_eq!((code.length(), code.dimension()), (7, 4));
        let columns = (0..7)
            .map(|c| {
                code.parity_check_matrix()
                    .column(c)
                    .iter()
                    .rev()
                    .fold(0, |acc, b| 2 * acc + b.as_u32())
            })
            .collect_vec();
        assert_eq!(columns, (1..=7).collect_vec());
        check_consistent(&code);

        let code = LinearCode::hamming(gf(2), 4).unwrap();
        assert_eq!((code.length(), code.dimension()), (15, 11));
    }

    #[test]
    fn test_ternary_hamming() {
        let code = LinearCode::hamming(gf(3), 2).unwrap();
        assert_eq!((code.length(), code.dimension()), (4, 2));
        check_consistent(&code);
        assert!(LinearCode::hamming(gf(3), 1).is_err());
    }

    #[test]
    fn test_reed_solomon_is_mds() {
        for (q, n, k) in [(5, 4, 2), (7, 6, 3), (8, 7, 1), (9, 8, 5), (4, 3, 3)] {
            let code = LinearCode::reed_solomon(gf(q), n, k).unwrap();
            assert_eq!(code.minimum_distance(), n - k + 1);
            check_consistent(&code);
        }
        assert!(LinearCode::reed_solomon(gf(5), 5, 2).is_err());
        assert!(LinearCode::reed_solomon(gf(5), 3, 4).is_err());
        assert!(LinearCode::reed_solomon(gf(5), 3, 0).is_err());
    }
}
