use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;

use tc_field::{Fq, GaloisField};
use tc_matrix::Matrix;
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::echelon::{null_space, rank, solve};
use tc_matrix::mul::{mul_vec, vec_mul};
use tracing::{debug, instrument};

use crate::distance::minimum_distance;
use crate::{Code, CodeError};

/// A linear code over a [`GaloisField`], held as both a generator matrix and a parity-check
/// matrix.
///
/// The generator is `k × n` with full row rank, and the parity-check matrix is `(n - k) × n`
/// with full row rank. A word `c` is a codeword iff `H * c = 0`, iff `c` lies in the row space
/// of `G`.
#[derive(Clone, Debug)]
pub struct LinearCode {
    field: Arc<GaloisField>,
    generator: RowMajorMatrix<Fq>,
    parity_check: RowMajorMatrix<Fq>,
    minimum_distance: usize,
    /// Set for Reed-Solomon codes, whose codewords are evaluations of low-degree polynomials at
    /// these points. Decoding then interpolates instead of searching error supports.
    evaluation_points: Option<Vec<Fq>>,
}

impl LinearCode {
    /// The code spanned by the rows of `generator`.
    #[instrument(level = "debug", skip_all, fields(dims = %generator.dimensions()))]
    pub fn from_generator(
        field: Arc<GaloisField>,
        generator: RowMajorMatrix<Fq>,
    ) -> Result<Self, CodeError> {
        validate_full_rank(&field, &generator, "generator")?;
        let parity_check = null_space(&field, &generator);
        let minimum_distance = minimum_distance(&field, &generator, &parity_check);
        debug!(minimum_distance);
        Ok(Self::from_parts(
            field,
            generator,
            parity_check,
            minimum_distance,
        ))
    }

    /// The code whose codewords are the kernel of `parity_check`.
    ///
    /// An empty parity-check matrix (no rows, `n` columns) gives the full space `GF(q)^n`.
    #[instrument(level = "debug", skip_all, fields(dims = %parity_check.dimensions()))]
    pub fn from_parity_check(
        field: Arc<GaloisField>,
        parity_check: RowMajorMatrix<Fq>,
    ) -> Result<Self, CodeError> {
        if parity_check.height() > 0 {
            validate_full_rank(&field, &parity_check, "parity-check")?;
        } else if parity_check.width() == 0 {
            return Err(CodeError::InvalidCode(
                "parity-check matrix has no columns".into(),
            ));
        }
        if parity_check.height() >= parity_check.width() {
            return Err(CodeError::InvalidCode(format!(
                "parity-check matrix {} leaves no room for a message",
                parity_check.dimensions()
            )));
        }
        let generator = null_space(&field, &parity_check);
        let minimum_distance = minimum_distance(&field, &generator, &parity_check);
        debug!(minimum_distance);
        Ok(Self::from_parts(
            field,
            generator,
            parity_check,
            minimum_distance,
        ))
    }

    /// Like [`from_generator`](Self::from_generator), but takes the minimum distance from the
    /// caller instead of searching for it. Used for constructions whose distance is known
    /// algebraically, such as tensor products.
    ///
    /// The generator is still validated. A wrong `minimum_distance` makes decoding unreliable.
    #[instrument(level = "debug", skip_all, fields(dims = %generator.dimensions()))]
    pub fn from_generator_with_distance(
        field: Arc<GaloisField>,
        generator: RowMajorMatrix<Fq>,
        minimum_distance: usize,
    ) -> Result<Self, CodeError> {
        validate_full_rank(&field, &generator, "generator")?;
        if minimum_distance == 0 || minimum_distance > generator.width() {
            return Err(CodeError::InvalidCode(format!(
                "minimum distance {minimum_distance} out of range for length {}",
                generator.width()
            )));
        }
        let parity_check = null_space(&field, &generator);
        Ok(Self::from_parts(
            field,
            generator,
            parity_check,
            minimum_distance,
        ))
    }

    /// Assembles a code whose matrices and distance are already known to be consistent.
    pub(crate) fn from_parts(
        field: Arc<GaloisField>,
        generator: RowMajorMatrix<Fq>,
        parity_check: RowMajorMatrix<Fq>,
        minimum_distance: usize,
    ) -> Self {
        debug_assert_eq!(generator.width(), parity_check.width());
        debug_assert_eq!(
            generator.height() + parity_check.height(),
            generator.width()
        );
        Self {
            field,
            generator,
            parity_check,
            minimum_distance,
            evaluation_points: None,
        }
    }

    pub(crate) fn with_evaluation_points(mut self, points: Vec<Fq>) -> Self {
        debug_assert_eq!(points.len(), self.length());
        self.evaluation_points = Some(points);
        self
    }

    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    /// The `k × n` generator matrix.
    pub const fn generator_matrix(&self) -> &RowMajorMatrix<Fq> {
        &self.generator
    }

    /// The `(n - k) × n` parity-check matrix.
    pub const fn parity_check_matrix(&self) -> &RowMajorMatrix<Fq> {
        &self.parity_check
    }

    /// Blocklength `n`.
    pub const fn length(&self) -> usize {
        self.generator.width
    }

    /// Dimension `k`.
    pub fn dimension(&self) -> usize {
        self.generator.height()
    }

    /// The evaluation points of a Reed-Solomon code, in codeword order.
    pub fn evaluation_points(&self) -> Option<&[Fq]> {
        self.evaluation_points.as_deref()
    }

    pub const fn minimum_distance(&self) -> usize {
        self.minimum_distance
    }

    /// The number of symbol errors bounded-distance decoding is guaranteed to correct.
    pub const fn correction_radius(&self) -> usize {
        (self.minimum_distance - 1) / 2
    }

    /// `message * G`.
    pub fn encode(&self, message: &[Fq]) -> Result<Vec<Fq>, CodeError> {
        self.check_symbols(message, self.dimension())?;
        Ok(vec_mul(&self.field, message, &self.generator)?)
    }

    /// `H * word`; zero exactly for codewords.
    pub fn syndrome(&self, word: &[Fq]) -> Result<Vec<Fq>, CodeError> {
        self.check_symbols(word, self.length())?;
        Ok(mul_vec(&self.field, &self.parity_check, word)?)
    }

    pub fn is_codeword(&self, word: &[Fq]) -> Result<bool, CodeError> {
        Ok(self.syndrome(word)?.iter().all(|s| s.is_zero()))
    }

    /// The message that encodes to `codeword`, or `None` if `codeword` is not in the code.
    pub fn unencode(&self, codeword: &[Fq]) -> Result<Option<Vec<Fq>>, CodeError> {
        self.check_symbols(codeword, self.length())?;
        Ok(solve(&self.field, &self.generator.transpose(), codeword)?)
    }

    /// Checks that `word` has `len` symbols, all of them field elements.
    pub(crate) fn check_symbols(&self, word: &[Fq], len: usize) -> Result<(), CodeError> {
        if word.len() != len {
            return Err(CodeError::LengthMismatch {
                expected: len,
                actual: word.len(),
            });
        }
        match word.iter().position(|&x| !self.field.contains(x)) {
            Some(position) => Err(CodeError::ElementOutOfRange {
                position,
                value: word[position].as_u32(),
                order: self.field.order(),
            }),
            None => Ok(()),
        }
    }
}

impl Code for LinearCode {
    fn message_len(&self) -> usize {
        self.dimension()
    }

    fn codeword_len(&self) -> usize {
        self.length()
    }
}

fn validate_full_rank(
    field: &GaloisField,
    m: &RowMajorMatrix<Fq>,
    what: &str,
) -> Result<(), CodeError> {
    if m.width() == 0 {
        return Err(CodeError::InvalidCode(format!("{what} matrix has no columns")));
    }
    if m.height() == 0 {
        return Err(CodeError::InvalidCode(format!("{what} matrix has no rows")));
    }
    if let Some((r, c)) = m.find_out_of_range(field) {
        return Err(CodeError::InvalidCode(format!(
            "{what} entry ({r}, {c}) = {} is not an element of {field}",
            m.get(r, c)
        )));
    }
    let rank = rank(field, m);
    if rank < m.height() {
        return Err(CodeError::InvalidCode(format!(
            "{what} matrix {} has rank {rank}, expected full row rank",
            m.dimensions()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn gf(q: u32) -> Arc<GaloisField> {
        Arc::new(GaloisField::new(q).unwrap())
    }

    fn hamming_7_4() -> LinearCode {
        let g = RowMajorMatrix::from_u32_rows(&[
            [1, 0, 0, 0, 0, 1, 1],
            [0, 1, 0, 0, 1, 0, 1],
            [0, 0, 1, 0, 1, 1, 0],
            [0, 0, 0, 1, 1, 1, 1],
        ])
        .unwrap();
        LinearCode::from_generator(gf(2), g).unwrap()
    }

    #[test]
    fn test_from_generator_derives_parity_check() {
        let code = hamming_7_4();
        assert_eq!((code.length(), code.dimension()), (7, 4));
        assert_eq!(code.parity_check_matrix().height(), 3);
        assert_eq!(code.minimum_distance(), 3);
        assert_eq!(code.correction_radius(), 1);
        for row in code.generator_matrix().rows() {
            assert!(code.is_codeword(row).unwrap());
        }
    }

    #[test]
    fn test_from_parity_check_matches_generator() {
        let by_gen = hamming_7_4();
        let by_check =
            LinearCode::from_parity_check(gf(2), by_gen.parity_check_matrix().clone()).unwrap();
        assert_eq!(by_check.dimension(), 4);
        assert_eq!(by_check.minimum_distance(), 3);
        for row in by_gen.generator_matrix().rows() {
            assert!(by_check.is_codeword(row).unwrap());
        }
    }

    #[test]
    fn test_rejects_malformed_matrices() {
        let gf3 = gf(3);
        let dependent = RowMajorMatrix::from_u32_rows(&[[1, 2, 0], [2, 1, 0]]).unwrap();
        assert!(matches!(
            LinearCode::from_generator(gf3.clone(), dependent),
            Err(CodeError::InvalidCode(_))
        ));

        let out_of_range = RowMajorMatrix::from_u32_rows(&[[1, 3, 0]]).unwrap();
        assert!(matches!(
            LinearCode::from_generator(gf3.clone(), out_of_range),
            Err(CodeError::InvalidCode(_))
        ));

        assert!(matches!(
            LinearCode::from_generator(gf3.clone(), RowMajorMatrix::empty(4)),
            Err(CodeError::InvalidCode(_))
        ));

        // Full-rank square parity checks describe the zero code.
        assert!(matches!(
            LinearCode::from_parity_check(gf3, RowMajorMatrix::identity(3)),
            Err(CodeError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_empty_parity_check_gives_full_space() {
        let code = LinearCode::from_parity_check(gf(5), RowMajorMatrix::empty(3)).unwrap();
        assert_eq!(code.dimension(), 3);
        assert_eq!(code.minimum_distance(), 1);
        assert!(code.is_codeword(&Fq::new_slice(&[4, 0, 2])).unwrap());
    }

    #[test]
    fn test_encode_and_unencode() {
        let code = hamming_7_4();
        let message = Fq::new_slice(&[1, 0, 1, 1]);
        let codeword = code.encode(&message).unwrap();
        assert_eq!(codeword, Fq::new_slice(&[1, 0, 1, 1, 0, 1, 0]));
        assert!(code.is_codeword(&codeword).unwrap());
        assert_eq!(code.unencode(&codeword).unwrap(), Some(message));

        let mut corrupted = codeword;
        corrupted[2] = Fq::ZERO;
        assert!(!code.is_codeword(&corrupted).unwrap());
        assert_eq!(code.unencode(&corrupted).unwrap(), None);
    }

    #[test]
    fn test_symbol_validation() {
        let code = hamming_7_4();
        assert_eq!(
            code.encode(&[Fq::ONE; 3]),
            Err(CodeError::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        let mut word = vec![Fq::ZERO; 7];
        word[5] = Fq::new(2);
        assert_eq!(
            code.syndrome(&word),
            Err(CodeError::ElementOutOfRange {
                position: 5,
                value: 2,
                order: 2
            })
        );
    }

    #[test]
    fn test_code_trait() {
        let code = hamming_7_4();
        assert_eq!(code.message_len(), 4);
        assert_eq!(code.codeword_len(), 7);
        assert_eq!(code.redundancy(), 3);
    }
}
