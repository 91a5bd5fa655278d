//! Quantum CSS codes assembled from classical parity-check matrices.
//!
//! [`HypergraphProductCode`] takes two check matrices `A` and `B` and forms the pair
//! `H_X = [A ⊗ I | -I ⊗ Bᵀ]`, `H_Z = [I ⊗ B | Aᵀ ⊗ I]`. [`LiftedProductCode`] first lifts
//! matrices over the group algebra `F[Z_L]` to circulant blocks, then takes their hypergraph
//! product. [`LiftedProductCode::from_ring`] starts one step earlier, from matrices over an
//! abstract two-generator ring that a [`RingLifter`] maps into the group algebra.

#![no_std]

extern crate alloc;

mod algebra;
mod error;
mod hgp;
mod lifted;
mod ring;

pub use algebra::*;
pub use error::*;
pub use hgp::*;
pub use lifted::*;
pub use ring::*;
