use alloc::sync::Arc;

use tc_code::LinearCode;
use tc_field::{Fq, GaloisField};
use tc_matrix::Matrix;
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::echelon::rank;
use tc_matrix::kron::kronecker;
use tc_matrix::mul::mul_dense;
use tracing::{debug, instrument};

use crate::HypergraphError;

/// The hypergraph product of two classical check matrices `A` (`mA × nA`) and `B` (`mB × nB`).
///
/// Qubits are indexed by the `nA * nB` pairs of bits followed by the `mA * mB` pairs of checks.
/// - `H_X = [A ⊗ I_nB | -I_mA ⊗ Bᵀ]`
/// - `H_Z = [I_nA ⊗ B | Aᵀ ⊗ I_mB]`
#[derive(Clone, Debug)]
pub struct HypergraphProductCode {
    field: Arc<GaloisField>,
    a: RowMajorMatrix<Fq>,
    b: RowMajorMatrix<Fq>,
    h_x: RowMajorMatrix<Fq>,
    h_z: RowMajorMatrix<Fq>,
    n: usize,
    k: usize,
}

impl HypergraphProductCode {
    #[instrument(level = "debug", skip_all, fields(a = %a.dimensions(), b = %b.dimensions()))]
    pub fn new(
        field: Arc<GaloisField>,
        a: RowMajorMatrix<Fq>,
        b: RowMajorMatrix<Fq>,
    ) -> Result<Self, HypergraphError> {
        check_matrix(&field, &a)?;
        check_matrix(&field, &b)?;
        let (m_a, n_a) = (a.height(), a.width());
        let (m_b, n_b) = (b.height(), b.width());

        let h_x = kronecker(&field, &a, &RowMajorMatrix::identity(n_b)).hstack(&kronecker(
            &field,
            &RowMajorMatrix::identity(m_a),
            &b.transpose(),
        )
        .neg(&field))?;
        let h_z = kronecker(&field, &RowMajorMatrix::identity(n_a), &b).hstack(&kronecker(
            &field,
            &a.transpose(),
            &RowMajorMatrix::identity(m_b),
        ))?;

        if !mul_dense(&field, &h_x, &h_z.transpose())?.is_zero() {
            return Err(HypergraphError::CssConditionViolated);
        }

        let n = m_a * m_b + n_a * n_b;
        debug_assert_eq!(h_x.width(), n);
        debug_assert_eq!(h_z.width(), n);

        let (rank_a, rank_b) = (rank(&field, &a), rank(&field, &b));
        let (k_a, k_a_t) = (n_a - rank_a, m_a - rank_a);
        let (k_b, k_b_t) = (n_b - rank_b, m_b - rank_b);
        let k = k_a * k_b + k_a_t * k_b_t;
        debug!(n, k);

        Ok(Self {
            field,
            a,
            b,
            h_x,
            h_z,
            n,
            k,
        })
    }

    /// The hypergraph product of `a` with its own transpose.
    pub fn from_single(
        field: Arc<GaloisField>,
        a: RowMajorMatrix<Fq>,
    ) -> Result<Self, HypergraphError> {
        let b = a.transpose();
        Self::new(field, a, b)
    }

    /// The hypergraph product of the parity-check matrices of two classical codes.
    pub fn from_codes(a: &LinearCode, b: &LinearCode) -> Result<Self, HypergraphError> {
        if a.field() != b.field() {
            return Err(HypergraphError::FieldMismatch);
        }
        Self::new(
            a.field().clone(),
            a.parity_check_matrix().clone(),
            b.parity_check_matrix().clone(),
        )
    }

    pub fn field(&self) -> &Arc<GaloisField> {
        &self.field
    }

    pub const fn a(&self) -> &RowMajorMatrix<Fq> {
        &self.a
    }

    pub const fn b(&self) -> &RowMajorMatrix<Fq> {
        &self.b
    }

    pub const fn h_x(&self) -> &RowMajorMatrix<Fq> {
        &self.h_x
    }

    pub const fn h_z(&self) -> &RowMajorMatrix<Fq> {
        &self.h_z
    }

    /// Number of physical qudits.
    pub const fn n(&self) -> usize {
        self.n
    }

    /// Number of logical qudits.
    pub const fn k(&self) -> usize {
        self.k
    }

    /// `[[n, k]]`.
    pub const fn parameters(&self) -> (usize, usize) {
        (self.n, self.k)
    }
}

fn check_matrix(field: &GaloisField, m: &RowMajorMatrix<Fq>) -> Result<(), HypergraphError> {
    if m.height() == 0 || m.width() == 0 {
        return Err(HypergraphError::EmptyMatrix);
    }
    match m.find_out_of_range(field) {
        Some((row, col)) => Err(HypergraphError::ElementOutOfRange {
            row,
            col,
            value: m.get(row, col).as_u32(),
            order: field.order(),
        }),
        None => Ok(()),
    }
}
