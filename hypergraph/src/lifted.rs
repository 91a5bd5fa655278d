use alloc::sync::Arc;

use tc_field::GaloisField;
use tc_matrix::mul::mul_dense;
use tracing::instrument;

use crate::{GroupAlgebraMatrix, HypergraphError, HypergraphProductCode, RingLifter, RingMatrix};

/// A lifted product code: matrices `A`, `B` over `F[Z_L]` with `A * B = 0` are lifted to
/// circulant block matrices, whose hypergraph product gives the CSS code.
#[derive(Clone, Debug)]
pub struct LiftedProductCode {
    a: GroupAlgebraMatrix,
    b: GroupAlgebraMatrix,
    product: HypergraphProductCode,
}

impl LiftedProductCode {
    #[instrument(level = "debug", skip_all, fields(lift = a.order()))]
    pub fn new(
        field: Arc<GaloisField>,
        a: GroupAlgebraMatrix,
        b: GroupAlgebraMatrix,
    ) -> Result<Self, HypergraphError> {
        a.check_elements(&field)?;
        b.check_elements(&field)?;
        if !a.mul(&field, &b)?.is_zero() {
            return Err(HypergraphError::ProductNotZero);
        }

        let (h_a, h_b) = (a.lift(), b.lift());
        if !mul_dense(&field, &h_a, &h_b)?.is_zero() {
            return Err(HypergraphError::LiftedProductNotZero);
        }

        let product = HypergraphProductCode::new(field, h_a, h_b)?;
        Ok(Self { a, b, product })
    }

    /// Lifts ring matrices with `A * B = 0` through `lifter`, then proceeds as
    /// [`new`](Self::new).
    #[instrument(level = "debug", skip_all, fields(lift = lifter.order()))]
    pub fn from_ring(
        field: Arc<GaloisField>,
        a: &RingMatrix,
        b: &RingMatrix,
        lifter: &RingLifter,
    ) -> Result<Self, HypergraphError> {
        a.check_elements(&field)?;
        b.check_elements(&field)?;
        if !a.mul(&field, b)?.is_zero() {
            return Err(HypergraphError::RingProductNotZero);
        }
        let a = lifter.lift_matrix(&field, a)?;
        let b = lifter.lift_matrix(&field, b)?;
        Self::new(field, a, b)
    }

    /// `L`, the size of each circulant block.
    pub const fn lift_order(&self) -> usize {
        self.a.order()
    }

    pub const fn a(&self) -> &GroupAlgebraMatrix {
        &self.a
    }

    pub const fn b(&self) -> &GroupAlgebraMatrix {
        &self.b
    }

    /// The hypergraph product of the lifted matrices.
    pub const fn hypergraph_product(&self) -> &HypergraphProductCode {
        &self.product
    }

    /// `[[n, k]]`.
    pub const fn parameters(&self) -> (usize, usize) {
        self.product.parameters()
    }
}
