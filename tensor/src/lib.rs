//! Tensor products of linear codes.
//!
//! A matrix belongs to `C1 ⊗ C2` when every row is a codeword of `C2` and every column is a
//! codeword of `C1`. [`TensorProductCode`] checks that predicate, encodes `k1 × k2` messages as
//! `G1ᵀ · M · G2`, and decodes by repeatedly repairing rows and columns with the component
//! decoders.

#![no_std]

extern crate alloc;

mod code_matrix;
mod config;
mod decoder;
mod error;
mod product;

pub use code_matrix::*;
pub use config::*;
pub use decoder::*;
pub use error::*;
pub use product::*;
