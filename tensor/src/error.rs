use alloc::sync::Arc;

use tc_code::CodeError;
use tc_field::GaloisField;
use tc_matrix::{Dimensions, MatrixError};
use thiserror::Error;

use crate::DecodeStatus;

/// Faults reported by [`TensorProductCode`](crate::TensorProductCode) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TensorCodeError {
    /// The component codes are defined over different fields.
    #[error("component codes are over different fields: {column_field:?} and {row_field:?}")]
    FieldMismatch {
        column_field: Arc<GaloisField>,
        row_field: Arc<GaloisField>,
    },

    #[error("{what} has shape {actual}, expected {expected}")]
    ShapeMismatch {
        what: &'static str,
        expected: Dimensions,
        actual: Dimensions,
    },

    #[error("entry ({row}, {col}) = {value} is not an element of GF({order})")]
    ElementOutOfRange {
        row: usize,
        col: usize,
        value: u32,
        order: u32,
    },

    #[error(transparent)]
    Code(#[from] CodeError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// The iterative decoder gave up with more violated rows and columns than the caller allowed.
///
/// This is an ordinary outcome of decoding a badly corrupted word, not a fault.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error(
    "decoding {status} after {passes} passes with {violations} violated rows and columns \
     (at most {max_violations} allowed)"
)]
pub struct DecodeFailure {
    /// Either [`DecodeStatus::Stalled`] or [`DecodeStatus::IterationCap`].
    pub status: DecodeStatus,
    /// Violated rows plus violated columns of the best candidate found.
    pub violations: usize,
    pub max_violations: usize,
    pub passes: usize,
}
