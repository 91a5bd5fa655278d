//! A framework for linear codes (in the coding theory sense).

#![no_std]

extern crate alloc;

mod code;
mod decoding;
mod distance;
mod error;
mod families;
mod linear;

pub use code::*;
pub use error::*;
pub use linear::*;
