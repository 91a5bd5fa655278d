//! Exact minimum distance of small linear codes.

use itertools::Itertools;
use tc_field::{Fq, GaloisField};
use tc_matrix::Matrix;
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::echelon::rank;
use tc_matrix::mul::vec_mul;
use tracing::{instrument, trace};

/// The minimum Hamming weight of a non-zero codeword.
///
/// Either every non-zero message is encoded (about `q^k` products), or column subsets of the
/// parity-check matrix are searched for the smallest dependent one (about `sum C(n, w)` rank
/// computations), whichever is estimated to be cheaper.
#[instrument(level = "debug", skip_all, fields(n = generator.width(), k = generator.height()))]
pub(crate) fn minimum_distance(
    field: &GaloisField,
    generator: &RowMajorMatrix<Fq>,
    parity_check: &RowMajorMatrix<Fq>,
) -> usize {
    let n = generator.width();
    let redundancy = parity_check.height();
    if redundancy == 0 {
        return 1;
    }

    let enumeration_cost = u128::from(field.order())
        .checked_pow(generator.height() as u32)
        .unwrap_or(u128::MAX);
    let subset_cost = (1..=redundancy + 1)
        .map(|w| binomial(n, w))
        .fold(0u128, u128::saturating_add);
    trace!(enumeration_cost, subset_cost);

    if enumeration_cost <= subset_cost {
        by_enumeration(field, generator)
    } else {
        by_dependent_columns(field, parity_check)
    }
}

fn by_enumeration(field: &GaloisField, generator: &RowMajorMatrix<Fq>) -> usize {
    let q = field.order();
    let k = generator.height();
    let mut message = GaloisField::zero_vec(k);
    let mut best = generator.width();

    // Count through every message in base q, skipping zero.
    while increment(&mut message, q) {
        if let Ok(codeword) = vec_mul(field, &message, generator) {
            let weight = codeword.iter().filter(|x| !x.is_zero()).count();
            best = best.min(weight);
            if best == 1 {
                break;
            }
        }
    }
    best
}

/// The size of the smallest linearly dependent set of columns of `parity_check`.
fn by_dependent_columns(field: &GaloisField, parity_check: &RowMajorMatrix<Fq>) -> usize {
    let n = parity_check.width();
    let redundancy = parity_check.height();
    for w in 1..=redundancy {
        let dependent = (0..n)
            .combinations(w)
            .any(|cols| rank(field, &parity_check.select_columns(&cols)) < w);
        if dependent {
            return w;
        }
    }
    // Singleton bound: any `n - k + 1` columns of an `(n - k)`-row matrix are dependent.
    redundancy + 1
}

/// Advances `digits` to the next base-`q` number. Returns `false` once it wraps back to zero.
fn increment(digits: &mut [Fq], q: u32) -> bool {
    for d in digits.iter_mut() {
        let next = d.as_u32() + 1;
        if next < q {
            *d = Fq::new(next);
            return true;
        }
        *d = Fq::ZERO;
    }
    false
}

pub(crate) fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u128, |acc, i| {
        acc.saturating_mul((n - i) as u128) / (i as u128 + 1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tc_matrix::echelon::null_space;

    fn both_ways(field: &GaloisField, g: &RowMajorMatrix<Fq>) -> (usize, usize) {
        let h = null_space(field, g);
        (by_enumeration(field, g), by_dependent_columns(field, &h))
    }

    #[test]
    fn test_strategies_agree() {
        let gf2 = GaloisField::new(2).unwrap();
        let hamming = RowMajorMatrix::from_u32_rows(&[
            [1, 0, 0, 0, 0, 1, 1],
            [0, 1, 0, 0, 1, 0, 1],
            [0, 0, 1, 0, 1, 1, 0],
            [0, 0, 0, 1, 1, 1, 1],
        ])
        .unwrap();
        assert_eq!(both_ways(&gf2, &hamming), (3, 3));

        let gf5 = GaloisField::new(5).unwrap();
        // Reed-Solomon [4, 2] over GF(5) on the points 1, 2, 3, 4.
        let rs = RowMajorMatrix::from_u32_rows(&[[1, 1, 1, 1], [1, 2, 3, 4]]).unwrap();
        assert_eq!(both_ways(&gf5, &rs), (3, 3));
    }

    #[test]
    fn test_zero_column_gives_distance_one() {
        let gf3 = GaloisField::new(3).unwrap();
        let g = RowMajorMatrix::from_u32_rows(&[[1, 1, 0], [0, 0, 1]]).unwrap();
        assert_eq!(both_ways(&gf3, &g), (1, 1));
    }

    #[test]
    fn test_increment_visits_every_message() {
        let mut digits = GaloisField::zero_vec(3);
        let mut count = 1;
        while increment(&mut digits, 3) {
            count += 1;
        }
        assert_eq!(count, 27);
        assert!(digits.iter().all(|d| d.is_zero()));
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(7, 3), 35);
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(3, 4), 0);
    }
}
