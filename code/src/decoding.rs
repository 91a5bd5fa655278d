use alloc::vec;
use alloc::vec::Vec;

use itertools::Itertools;
use tc_field::{Fq, GaloisField};
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::echelon::solve;
use tracing::{debug, instrument, trace};

use crate::distance::binomial;
use crate::{CodeError, LinearCode};

/// The most error supports the generic decoder tries in one call.
pub const MAX_ERROR_SUPPORTS: u128 = 1 << 16;

impl LinearCode {
    /// Bounded-distance decoding: the unique codeword within Hamming distance
    /// [`correction_radius`](Self::correction_radius) of `word`, or `None` if there is none.
    pub fn decode(&self, word: &[Fq]) -> Result<Option<Vec<Fq>>, CodeError> {
        self.decode_with_erasures(word, &[])
    }

    /// Errors-and-erasures decoding.
    ///
    /// The symbols at `erasures` are treated as unknown. Returns the codeword that agrees with
    /// `word` everywhere except at the erased positions and at most `e` others, where
    /// `2e + |erasures| < d`. Such a codeword is unique when it exists.
    ///
    /// Reed-Solomon codes are decoded by Berlekamp-Welch interpolation. Other codes search error
    /// supports in increasing size, recovering the error values from the syndrome equations
    /// restricted to the support and the erasures. That search stops at the largest size whose
    /// cumulative number of supports fits in [`MAX_ERROR_SUPPORTS`], so on large codes it may
    /// return `None` for words that lie within the radius.
    #[instrument(level = "trace", skip_all, fields(n = self.length(), erasures = erasures.len()))]
    pub fn decode_with_erasures(
        &self,
        word: &[Fq],
        erasures: &[usize],
    ) -> Result<Option<Vec<Fq>>, CodeError> {
        let syndrome = self.syndrome(word)?;
        let n = self.length();
        let mut erased = Vec::with_capacity(erasures.len());
        for &position in erasures {
            if position >= n {
                return Err(CodeError::ErasureOutOfRange { position, len: n });
            }
            erased.push(position);
        }
        erased.sort_unstable();
        erased.dedup();

        if syndrome.iter().all(|s| s.is_zero()) {
            return Ok(Some(word.to_vec()));
        }
        let d = self.minimum_distance();
        if erased.len() >= d {
            return Ok(None);
        }
        let max_errors = (d - 1 - erased.len()) / 2;

        match self.evaluation_points() {
            Some(points) => decode_reed_solomon(
                self.field(),
                points,
                self.dimension(),
                word,
                &erased,
                max_errors,
            ),
            None => self.search_error_supports(word, &syndrome, &erased, max_errors),
        }
    }

    fn search_error_supports(
        &self,
        word: &[Fq],
        syndrome: &[Fq],
        erased: &[usize],
        max_errors: usize,
    ) -> Result<Option<Vec<Fq>>, CodeError> {
        let field = self.field();
        let h = self.parity_check_matrix();
        let unerased = (0..self.length())
            .filter(|i| erased.binary_search(i).is_err())
            .collect_vec();
        let radius = searchable_radius(unerased.len(), max_errors);
        if radius < max_errors {
            debug!(radius, max_errors, "error support search truncated");
        }

        for e in 0..=radius {
            for support in unerased.iter().copied().combinations(e) {
                let positions = support.into_iter().merge(erased.iter().copied()).collect_vec();
                if positions.is_empty() {
                    continue;
                }
                let Some(error) = solve(field, &h.select_columns(&positions), syndrome)? else {
                    continue;
                };
                trace!(errors = e, "found error pattern");
                let mut corrected = word.to_vec();
                for (&p, &v) in positions.iter().zip_eq(&error) {
                    corrected[p] = field.sub(corrected[p], v);
                }
                return Ok(Some(corrected));
            }
        }
        Ok(None)
    }
}

/// The largest `e <= max_errors` such that all supports of size at most `e` among `candidates`
/// positions number at most [`MAX_ERROR_SUPPORTS`].
fn searchable_radius(candidates: usize, max_errors: usize) -> usize {
    let mut total = 0u128;
    for e in 0..=max_errors {
        total = total.saturating_add(binomial(candidates, e));
        if total > MAX_ERROR_SUPPORTS {
            return e.saturating_sub(1);
        }
    }
    max_errors
}

/// Berlekamp-Welch decoding on the unerased positions.
///
/// With `e = max_errors`, solves `Q(x_j) = y_j * E(x_j)` for `Q` of degree below `e + k` and
/// monic `E` of degree `e`. If some message polynomial `f` disagrees with at most `e` unerased
/// symbols, every solution has `Q = f * E`.
fn decode_reed_solomon(
    field: &GaloisField,
    points: &[Fq],
    k: usize,
    word: &[Fq],
    erased: &[usize],
    max_errors: usize,
) -> Result<Option<Vec<Fq>>, CodeError> {
    let kept = (0..points.len())
        .filter(|i| erased.binary_search(i).is_err())
        .collect_vec();
    let e = max_errors;
    let q_len = e + k;

    let mut system = RowMajorMatrix::zeros(kept.len(), q_len + e);
    let mut rhs = Vec::with_capacity(kept.len());
    for (row, &j) in kept.iter().enumerate() {
        let (x, y) = (points[j], word[j]);
        let coeffs = system.row_mut(row);
        let mut power = Fq::ONE;
        for i in 0..q_len {
            coeffs[i] = power;
            if i < e {
                coeffs[q_len + i] = field.neg(field.mul(y, power));
            }
            power = field.mul(power, x);
        }
        rhs.push(field.mul(y, field.pow(x, e as u64)));
    }

    let Some(solution) = solve(field, &system, &rhs)? else {
        return Ok(None);
    };
    let (q, locator_low) = solution.split_at(q_len);
    let mut locator = locator_low.to_vec();
    locator.push(Fq::ONE);
    let Some(message_poly) = divide_exact(field, q, &locator) else {
        return Ok(None);
    };

    let codeword = points
        .iter()
        .map(|&x| evaluate(field, &message_poly, x))
        .collect_vec();
    let errors = kept.iter().filter(|&&j| codeword[j] != word[j]).count();
    if errors > e {
        return Ok(None);
    }
    trace!(errors, "interpolated codeword");
    Ok(Some(codeword))
}

/// `numerator / divisor` for a monic `divisor`, or `None` if the remainder is non-zero.
fn divide_exact(field: &GaloisField, numerator: &[Fq], divisor: &[Fq]) -> Option<Vec<Fq>> {
    let d = divisor.len() - 1;
    if numerator.len() < divisor.len() {
        return numerator.iter().all(|c| c.is_zero()).then(Vec::new);
    }
    let mut remainder = numerator.to_vec();
    let mut quotient = vec![Fq::ZERO; numerator.len() - d];
    for i in (0..quotient.len()).rev() {
        let c = remainder[i + d];
        quotient[i] = c;
        if !c.is_zero() {
            for (t, &dt) in divisor.iter().enumerate() {
                remainder[i + t] = field.sub(remainder[i + t], field.mul(c, dt));
            }
        }
    }
    remainder[..d]
        .iter()
        .all(|r| r.is_zero())
        .then_some(quotient)
}

fn evaluate(field: &GaloisField, coeffs: &[Fq], x: Fq) -> Fq {
    coeffs
        .iter()
        .rev()
        .fold(Fq::ZERO, |acc, &c| field.add(field.mul(acc, x), c))
}
