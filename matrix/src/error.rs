use thiserror::Error;

use crate::Dimensions;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// The operands of `op` do not fit together.
    #[error("cannot {op} a {left} matrix with a {right} matrix")]
    DimensionMismatch {
        op: &'static str,
        left: Dimensions,
        right: Dimensions,
    },

    /// A vector operand has the wrong length.
    #[error("expected a vector of length {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Rows supplied to a constructor have different lengths.
    #[error("row {row} has length {actual}, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
}
