use alloc::string::String;

use tc_field::FieldError;
use tc_matrix::MatrixError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// A generator or parity-check matrix that does not describe a code.
    #[error("invalid code: {0}")]
    InvalidCode(String),

    /// A message or word whose length does not match the code.
    #[error("expected {expected} symbols, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("symbol {value} at position {position} is not an element of GF({order})")]
    ElementOutOfRange {
        position: usize,
        value: u32,
        order: u32,
    },

    #[error("erasure position {position} is outside a word of length {len}")]
    ErasureOutOfRange { position: usize, len: usize },

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
