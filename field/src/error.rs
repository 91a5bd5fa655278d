use thiserror::Error;

/// Errors raised while constructing a field or validating its elements.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("field order {0} is not a prime power")]
    NotPrimePower(u32),

    #[error("field order {order} exceeds the supported maximum {max}")]
    OrderTooLarge { order: u64, max: u32 },

    #[error("characteristic {0} is not prime")]
    NotPrime(u32),

    #[error("invalid modulus: {0}")]
    InvalidModulus(&'static str),

    #[error("element {value} does not belong to GF({order})")]
    ElementOutOfRange { value: u32, order: u32 },
}
