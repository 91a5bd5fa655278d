use alloc::vec::Vec;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tc_field::{Fq, GaloisField};
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::{Dimensions, Matrix, MatrixError};

use crate::TensorCodeError;

/// A matrix of field elements: a `k1 × k2` message or an `n1 × n2` (possibly corrupted)
/// codeword.
///
/// A `CodeMatrix` is never modified in place. Operations that change entries, such as
/// [`with_entry`](Self::with_entry), return a new matrix.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeMatrix(RowMajorMatrix<Fq>);

impl CodeMatrix {
    pub fn from_rows<R: AsRef<[Fq]>>(rows: &[R]) -> Result<Self, MatrixError> {
        RowMajorMatrix::from_rows(rows).map(Self)
    }

    /// Rows of raw element encodings. Values are checked against a field only when the matrix is
    /// handed to a code.
    pub fn from_u32_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, MatrixError> {
        RowMajorMatrix::from_u32_rows(rows).map(Self)
    }

    #[must_use]
    pub fn zeros(height: usize, width: usize) -> Self {
        Self(RowMajorMatrix::zeros(height, width))
    }

    pub fn rand<R: Rng + ?Sized>(
        field: &GaloisField,
        rng: &mut R,
        height: usize,
        width: usize,
    ) -> Self {
        Self(RowMajorMatrix::rand(field, rng, height, width))
    }

    pub fn row_slice(&self, r: usize) -> &[Fq] {
        self.0.row_slice(r)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Fq]> {
        self.0.rows()
    }

    pub fn values(&self) -> &[Fq] {
        &self.0.values
    }

    /// A copy of `self` with entry `(r, c)` replaced by `value`.
    #[must_use]
    pub fn with_entry(&self, r: usize, c: usize, value: Fq) -> Self {
        let mut inner = self.0.clone();
        let width = inner.width;
        inner.values[r * width + c] = value;
        Self(inner)
    }

    /// The number of entries in which `self` and `other` differ, or `None` if their shapes
    /// differ.
    #[must_use]
    pub fn distance(&self, other: &Self) -> Option<usize> {
        (self.dimensions() == other.dimensions()).then(|| {
            self.0
                .values
                .iter()
                .zip(&other.0.values)
                .filter(|(a, b)| a != b)
                .count()
        })
    }

    pub const fn as_row_major(&self) -> &RowMajorMatrix<Fq> {
        &self.0
    }

    #[must_use]
    pub fn into_row_major(self) -> RowMajorMatrix<Fq> {
        self.0
    }

    /// All entries, row by row.
    #[must_use]
    pub fn into_values(self) -> Vec<Fq> {
        self.0.values
    }

    pub(crate) fn check_shape(
        &self,
        what: &'static str,
        expected: Dimensions,
    ) -> Result<(), TensorCodeError> {
        if self.dimensions() == expected {
            Ok(())
        } else {
            Err(TensorCodeError::ShapeMismatch {
                what,
                expected,
                actual: self.dimensions(),
            })
        }
    }

    pub(crate) fn check_elements(&self, field: &GaloisField) -> Result<(), TensorCodeError> {
        match self.0.find_out_of_range(field) {
            Some((row, col)) => Err(TensorCodeError::ElementOutOfRange {
                row,
                col,
                value: self.get(row, col).as_u32(),
                order: field.order(),
            }),
            None => Ok(()),
        }
    }
}

impl From<RowMajorMatrix<Fq>> for CodeMatrix {
    fn from(m: RowMajorMatrix<Fq>) -> Self {
        Self(m)
    }
}

impl Matrix<Fq> for CodeMatrix {
    #[inline]
    fn width(&self) -> usize {
        self.0.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.0.height()
    }

    #[inline]
    fn get(&self, r: usize, c: usize) -> Fq {
        self.0.get(r, c)
    }

    fn row(&self, r: usize) -> impl Iterator<Item = Fq> + '_ {
        self.0.row_slice(r).iter().copied()
    }

    fn to_row_major_matrix(&self) -> RowMajorMatrix<Fq> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_entry_leaves_original_untouched() {
        let m = CodeMatrix::from_u32_rows(&[[1, 0], [0, 1]]).unwrap();
        let n = m.with_entry(0, 1, Fq::new(2));
        assert_eq!(m.get(0, 1), Fq::ZERO);
        assert_eq!(n.get(0, 1), Fq::new(2));
        assert_eq!(m.distance(&n), Some(1));
        assert_eq!(m.distance(&CodeMatrix::zeros(2, 3)), None);
    }

    #[test]
    fn test_shape_and_element_checks() {
        let gf3 = GaloisField::new(3).unwrap();
        let m = CodeMatrix::from_u32_rows(&[[1, 2, 0], [0, 5, 1]]).unwrap();
        assert!(m.check_shape("codeword", Dimensions::new(2, 3)).is_ok());
        assert_eq!(
            m.check_shape("codeword", Dimensions::new(3, 2)),
            Err(TensorCodeError::ShapeMismatch {
                what: "codeword",
                expected: Dimensions::new(3, 2),
                actual: Dimensions::new(2, 3),
            })
        );
        assert_eq!(
            m.check_elements(&gf3),
            Err(TensorCodeError::ElementOutOfRange {
                row: 1,
                col: 1,
                value: 5,
                order: 3,
            })
        );
    }
}
