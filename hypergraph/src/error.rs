use tc_matrix::MatrixError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HypergraphError {
    #[error("group algebra elements over Z_{left} and Z_{right} cannot be combined")]
    OrderMismatch { left: usize, right: usize },

    #[error("the cyclic group order must be positive")]
    ZeroOrder,

    #[error("coefficient {value} of g^{power} is not an element of GF({order})")]
    CoefficientOutOfRange {
        power: usize,
        value: u32,
        order: u32,
    },

    #[error("check matrix has no rows or no columns")]
    EmptyMatrix,

    #[error("check matrix entry ({row}, {col}) = {value} is not an element of GF({order})")]
    ElementOutOfRange {
        row: usize,
        col: usize,
        value: u32,
        order: u32,
    },

    #[error("the two classical codes are over different fields")]
    FieldMismatch,

    #[error("H_X * H_Z^T is not zero")]
    CssConditionViolated,

    #[error("A * B is not zero over the abstract ring")]
    RingProductNotZero,

    #[error("A * B is not zero over the group algebra")]
    ProductNotZero,

    #[error("A * B is not zero after lifting")]
    LiftedProductNotZero,

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}
