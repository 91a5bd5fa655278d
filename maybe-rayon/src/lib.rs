//! Row and column passes call into this crate instead of rayon directly, so that the workspace
//! builds without rayon unless the `parallel` feature is enabled.

#![no_std]

#[cfg(feature = "parallel")]
pub mod prelude {
    pub use rayon::prelude::*;
}

#[cfg(not(feature = "parallel"))]
mod serial;

#[cfg(not(feature = "parallel"))]
pub mod prelude {
    pub use core::iter::Iterator as ParallelIterator;

    pub use super::serial::*;
}
