//! Matrix library.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::dense::RowMajorMatrix;

pub mod dense;
pub mod echelon;
mod error;
pub mod kron;
pub mod mul;

pub use error::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: usize,
    pub width: usize,
}

impl Dimensions {
    #[must_use]
    pub const fn new(height: usize, width: usize) -> Self {
        Self { height, width }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.height, self.width)
    }
}

pub trait Matrix<T: Clone> {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    fn get(&self, r: usize, c: usize) -> T;

    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.height(), self.width())
    }

    fn row(&self, r: usize) -> impl Iterator<Item = T> + '_ {
        (0..self.width()).map(move |c| self.get(r, c))
    }

    /// Column `c`, top to bottom.
    fn column(&self, c: usize) -> Vec<T> {
        (0..self.height()).map(|r| self.get(r, c)).collect()
    }

    fn to_row_major_matrix(&self) -> RowMajorMatrix<T> {
        let values = (0..self.height()).flat_map(|r| self.row(r)).collect();
        RowMajorMatrix::new(values, self.width())
    }
}
