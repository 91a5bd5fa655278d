//! Finite fields of small order.

#![no_std]

extern crate alloc;

mod element;
mod error;
mod field;
pub mod helpers;
mod poly;

pub use element::*;
pub use error::*;
pub use field::*;
