use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tc_field::{Fq, GaloisField};
use tc_maybe_rayon::prelude::*;

use crate::{Matrix, MatrixError};

/// A dense matrix stored in row-major form.
///
/// The height is derived from the number of values, so a matrix of width zero always has height
/// zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowMajorMatrix<T> {
    /// All values, stored in row-major order.
    pub values: Vec<T>,
    pub width: usize,
}

impl<T> RowMajorMatrix<T> {
    #[must_use]
    pub fn new(values: Vec<T>, width: usize) -> Self {
        debug_assert_eq!(values.len() % width.max(1), 0);
        Self { values, width }
    }

    #[must_use]
    pub fn new_row(values: Vec<T>) -> Self {
        let width = values.len();
        Self { values, width }
    }

    #[must_use]
    pub fn new_col(values: Vec<T>) -> Self {
        Self { values, width: 1 }
    }

    /// A matrix with `width` columns and no rows.
    #[must_use]
    pub const fn empty(width: usize) -> Self {
        Self {
            values: Vec::new(),
            width,
        }
    }

    /// Builds a matrix from explicit rows, all of which must have the same length.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, MatrixError>
    where
        T: Clone,
    {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut values = Vec::with_capacity(width * rows.len());
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    expected: width,
                    actual: row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self { values, width })
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.values.len().checked_div(self.width).unwrap_or(0)
    }

    pub fn row_slice(&self, r: usize) -> &[T] {
        debug_assert!(r < self.height());
        &self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn row_mut(&mut self, r: usize) -> &mut [T] {
        debug_assert!(r < self.height());
        &mut self.values[r * self.width..(r + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        (0..self.height()).map(|r| self.row_slice(r))
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> {
        let width = self.width.max(1);
        self.values.chunks_exact_mut(width)
    }

    pub fn swap_rows(&mut self, i: usize, j: usize) {
        if i == j {
            return;
        }
        let (i, j) = (i.min(j), i.max(j));
        let w = self.width;
        let (upper, lower) = self.values.split_at_mut(j * w);
        upper[i * w..(i + 1) * w].swap_with_slice(&mut lower[..w]);
    }

    pub fn map<U, F: Fn(T) -> U>(&self, f: F) -> RowMajorMatrix<U>
    where
        T: Clone,
    {
        RowMajorMatrix {
            values: self.values.iter().map(|v| f(v.clone())).collect(),
            width: self.width,
        }
    }

    #[must_use]
    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        let (height, width) = (self.height(), self.width);
        let values = (0..width)
            .flat_map(|c| (0..height).map(move |r| (r, c)))
            .map(|(r, c)| self.values[r * width + c].clone())
            .collect();
        Self::new(values, height)
    }

    /// The submatrix made of the given columns, in the given order.
    #[must_use]
    pub fn select_columns(&self, columns: &[usize]) -> Self
    where
        T: Clone,
    {
        let values = self
            .rows()
            .flat_map(|row| columns.iter().map(|&c| row[c].clone()))
            .collect();
        Self::new(values, columns.len())
    }

    /// Places `other` to the right of `self`.
    pub fn hstack(&self, other: &Self) -> Result<Self, MatrixError>
    where
        T: Clone,
    {
        if self.height() != other.height() {
            return Err(MatrixError::DimensionMismatch {
                op: "hstack",
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        let values = self
            .rows()
            .zip(other.rows())
            .flat_map(|(l, r)| l.iter().chain(r).cloned())
            .collect();
        Ok(Self::new(values, self.width + other.width))
    }

    /// Places `other` below `self`.
    pub fn vstack(&self, other: &Self) -> Result<Self, MatrixError>
    where
        T: Clone,
    {
        if self.width != other.width {
            return Err(MatrixError::DimensionMismatch {
                op: "vstack",
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        let mut values = self.values.clone();
        values.extend_from_slice(&other.values);
        Ok(Self::new(values, self.width))
    }
}

impl RowMajorMatrix<Fq> {
    #[must_use]
    pub fn zeros(height: usize, width: usize) -> Self {
        Self::new(vec![Fq::ZERO; height * width], width)
    }

    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.values[i * n + i] = Fq::ONE;
        }
        m
    }

    /// Wraps raw encodings, row by row. Convenient for literals in tests and examples.
    pub fn from_u32_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let rows: Vec<Vec<Fq>> = rows.iter().map(|r| Fq::new_slice(r.as_ref())).collect();
        Self::from_rows(&rows)
    }

    pub fn rand<R: Rng + ?Sized>(
        field: &GaloisField,
        rng: &mut R,
        rows: usize,
        cols: usize,
    ) -> Self {
        let values = (0..rows * cols).map(|_| field.random(rng)).collect();
        Self::new(values, cols)
    }

    /// The first entry that does not belong to `field`, as `(row, col)`.
    #[must_use]
    pub fn find_out_of_range(&self, field: &GaloisField) -> Option<(usize, usize)> {
        self.values
            .iter()
            .position(|&x| !field.contains(x))
            .map(|i| (i / self.width, i % self.width))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.values.par_iter().all(|x| x.is_zero())
    }

    #[must_use]
    pub fn scale(&self, field: &GaloisField, s: Fq) -> Self {
        self.map(|x| field.mul(x, s))
    }

    #[must_use]
    pub fn neg(&self, field: &GaloisField) -> Self {
        self.map(|x| field.neg(x))
    }

    pub fn add(&self, field: &GaloisField, other: &Self) -> Result<Self, MatrixError> {
        if self.dimensions() != other.dimensions() {
            return Err(MatrixError::DimensionMismatch {
                op: "add",
                left: self.dimensions(),
                right: other.dimensions(),
            });
        }
        let values = self
            .values
            .iter()
            .zip(&other.values)
            .map(|(&a, &b)| field.add(a, b))
            .collect();
        Ok(Self::new(values, self.width))
    }

    /// Number of non-zero entries.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.values.iter().filter(|x| !x.is_zero()).count()
    }
}

impl<T: Clone> Matrix<T> for RowMajorMatrix<T> {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        RowMajorMatrix::height(self)
    }

    #[inline]
    fn get(&self, r: usize, c: usize) -> T {
        self.values[r * self.width + c].clone()
    }

    fn row(&self, r: usize) -> impl Iterator<Item = T> + '_ {
        self.row_slice(r).iter().cloned()
    }

    fn to_row_major_matrix(&self) -> RowMajorMatrix<T> {
        self.clone()
    }
}
