use alloc::sync::Arc;
use alloc::vec::Vec;

use tc_code::{Code, LinearCode};
use tc_field::{Fq, GaloisField};
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::kron::kronecker;
use tc_matrix::mul::mul_dense;
use tc_matrix::{Dimensions, Matrix};
use tc_maybe_rayon::prelude::*;
use tracing::instrument;

use crate::{CodeMatrix, TensorCodeError};

/// The tensor product `C1 ⊗ C2` of two linear codes over the same field.
///
/// Codewords are `n1 × n2` matrices whose columns lie in `C1` (the column code) and whose rows
/// lie in `C2` (the row code).
#[derive(Clone, Debug)]
pub struct TensorProductCode {
    column_code: LinearCode,
    row_code: LinearCode,
}

/// The rows and columns of a matrix that are not codewords of their component code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Violations {
    pub rows: Vec<usize>,
    pub columns: Vec<usize>,
}

impl Violations {
    /// Violated rows plus violated columns.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len() + self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }
}

impl TensorProductCode {
    /// Builds `column_code ⊗ row_code`.
    ///
    /// Fails with [`TensorCodeError::FieldMismatch`] if the codes are over different fields.
    pub fn new(column_code: LinearCode, row_code: LinearCode) -> Result<Self, TensorCodeError> {
        if column_code.field() != row_code.field() {
            return Err(TensorCodeError::FieldMismatch {
                column_field: column_code.field().clone(),
                row_field: row_code.field().clone(),
            });
        }
        Ok(Self {
            column_code,
            row_code,
        })
    }

    pub fn field(&self) -> &Arc<GaloisField> {
        self.column_code.field()
    }

    /// `C1`, which every column must belong to.
    pub const fn column_code(&self) -> &LinearCode {
        &self.column_code
    }

    /// `C2`, which every row must belong to.
    pub const fn row_code(&self) -> &LinearCode {
        &self.row_code
    }

    /// `n1 × n2`.
    pub const fn shape(&self) -> Dimensions {
        Dimensions::new(self.column_code.length(), self.row_code.length())
    }

    /// `k1 × k2`.
    pub fn message_shape(&self) -> Dimensions {
        Dimensions::new(self.column_code.dimension(), self.row_code.dimension())
    }

    /// `n1 * n2`.
    pub const fn blocklength(&self) -> usize {
        self.column_code.length() * self.row_code.length()
    }

    /// `k1 * k2`.
    pub fn dimension(&self) -> usize {
        self.column_code.dimension() * self.row_code.dimension()
    }

    /// `d1 * d2`.
    pub const fn minimum_distance(&self) -> usize {
        self.column_code.minimum_distance() * self.row_code.minimum_distance()
    }

    /// Whether every row of `m` lies in `C2` and every column lies in `C1`.
    #[instrument(level = "debug", skip_all)]
    pub fn is_codeword(&self, m: &CodeMatrix) -> Result<bool, TensorCodeError> {
        self.check_word(m)?;
        let (n1, n2) = (m.height(), m.width());
        let rows_ok = (0..n1)
            .into_par_iter()
            .all(|i| satisfies(&self.row_code, m.row_slice(i)));
        let columns_ok = rows_ok
            && (0..n2)
                .into_par_iter()
                .all(|j| satisfies(&self.column_code, &m.column(j)));
        Ok(columns_ok)
    }

    /// Every row and column of `m` that fails its parity checks.
    pub fn violations(&self, m: &CodeMatrix) -> Result<Violations, TensorCodeError> {
        self.check_word(m)?;
        Ok(self.violations_unchecked(m.as_row_major()))
    }

    pub(crate) fn violations_unchecked(&self, m: &RowMajorMatrix<Fq>) -> Violations {
        let rows = (0..m.height())
            .into_par_iter()
            .filter(|&i| !satisfies(&self.row_code, m.row_slice(i)))
            .collect();
        let columns = (0..m.width())
            .into_par_iter()
            .filter(|&j| !satisfies(&self.column_code, &m.column(j)))
            .collect();
        Violations { rows, columns }
    }

    /// Encodes a `k1 × k2` message as `G1ᵀ · message · G2`.
    #[instrument(level = "debug", skip_all, fields(shape = %self.shape()))]
    pub fn encode(&self, message: &CodeMatrix) -> Result<CodeMatrix, TensorCodeError> {
        message.check_shape("message", self.message_shape())?;
        message.check_elements(self.field())?;
        let field = self.field();
        let g1 = self.column_code.generator_matrix();
        let g2 = self.row_code.generator_matrix();
        let rows_encoded = mul_dense(field, message.as_row_major(), g2)?;
        Ok(mul_dense(field, &g1.transpose(), &rows_encoded)?.into())
    }

    /// `G1 ⊗ G2`, the generator of the code on row-major flattened matrices.
    #[must_use]
    pub fn generator_matrix(&self) -> RowMajorMatrix<Fq> {
        kronecker(
            self.field(),
            self.column_code.generator_matrix(),
            self.row_code.generator_matrix(),
        )
    }

    /// `[H1 ⊗ I_{n2}; I_{n1} ⊗ H2]`: the column checks followed by the row checks, on row-major
    /// flattened matrices.
    ///
    /// The rows are not independent; the rank is `n1 * n2 - k1 * k2`.
    pub fn parity_check_matrix(&self) -> Result<RowMajorMatrix<Fq>, TensorCodeError> {
        let field = self.field();
        let (n1, n2) = (self.column_code.length(), self.row_code.length());
        let column_checks = kronecker(
            field,
            self.column_code.parity_check_matrix(),
            &RowMajorMatrix::identity(n2),
        );
        let row_checks = kronecker(
            field,
            &RowMajorMatrix::identity(n1),
            self.row_code.parity_check_matrix(),
        );
        Ok(column_checks.vstack(&row_checks)?)
    }

    /// The same code as a [`LinearCode`] of length `n1 * n2`, so that it can be a component of
    /// a further tensor product.
    #[instrument(level = "debug", skip_all)]
    pub fn as_linear_code(&self) -> Result<LinearCode, TensorCodeError> {
        Ok(LinearCode::from_generator_with_distance(
            self.field().clone(),
            self.generator_matrix(),
            self.minimum_distance(),
        )?)
    }

    pub(crate) fn check_word(&self, m: &CodeMatrix) -> Result<(), TensorCodeError> {
        m.check_shape("received word", self.shape())?;
        m.check_elements(self.field())
    }
}

impl Code for TensorProductCode {
    fn message_len(&self) -> usize {
        self.dimension()
    }

    fn codeword_len(&self) -> usize {
        self.blocklength()
    }
}

/// `H * word == 0`, for a word already known to have the right length and valid symbols.
pub(crate) fn satisfies(code: &LinearCode, word: &[Fq]) -> bool {
    let field = code.field();
    code.parity_check_matrix()
        .rows()
        .all(|h| field.dot(h, word).is_zero())
}
