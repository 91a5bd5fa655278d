//! The group algebra `F[Z_L]` and matrices over it.

use alloc::vec;
use alloc::vec::Vec;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tc_field::{Fq, GaloisField};
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::{Dimensions, MatrixError};

use crate::HypergraphError;

/// An element `sum c_i g^i` of the group algebra of the cyclic group `Z_L = <g>`.
///
/// Stored as its `L` coefficients. Multiplication is cyclic convolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupAlgebraElement {
    coeffs: Vec<Fq>,
}

impl GroupAlgebraElement {
    pub fn new(coeffs: Vec<Fq>) -> Result<Self, HypergraphError> {
        if coeffs.is_empty() {
            return Err(HypergraphError::ZeroOrder);
        }
        Ok(Self { coeffs })
    }

    pub fn zero(order: usize) -> Result<Self, HypergraphError> {
        Self::new(vec![Fq::ZERO; order])
    }

    pub fn one(order: usize) -> Result<Self, HypergraphError> {
        Self::monomial(Fq::ONE, 0, order)
    }

    /// `c * g^power`, with `power` taken mod `order`. Negative powers are written `order - p`.
    pub fn monomial(c: Fq, power: usize, order: usize) -> Result<Self, HypergraphError> {
        let mut e = Self::zero(order)?;
        e.coeffs[power % order] = c;
        Ok(e)
    }

    /// `L`, the order of the cyclic group.
    pub fn order(&self) -> usize {
        self.coeffs.len()
    }

    pub fn coeffs(&self) -> &[Fq] {
        &self.coeffs
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// Checks that every coefficient is an element of `field`.
    pub fn check_coefficients(&self, field: &GaloisField) -> Result<(), HypergraphError> {
        match self.coeffs.iter().position(|&c| !field.contains(c)) {
            Some(power) => Err(HypergraphError::CoefficientOutOfRange {
                power,
                value: self.coeffs[power].as_u32(),
                order: field.order(),
            }),
            None => Ok(()),
        }
    }

    pub fn add(&self, field: &GaloisField, other: &Self) -> Result<Self, HypergraphError> {
        self.check_operands(field, other)?;
        let coeffs = self
            .coeffs
            .iter()
            .zip(&other.coeffs)
            .map(|(&a, &b)| field.add(a, b))
            .collect();
        Ok(Self { coeffs })
    }

    /// `c * self`.
    pub fn scale(&self, field: &GaloisField, c: Fq) -> Result<Self, HypergraphError> {
        self.check_coefficients(field)?;
        let coeffs = self.coeffs.iter().map(|&a| field.mul(a, c)).collect();
        Ok(Self { coeffs })
    }

    pub fn mul(&self, field: &GaloisField, other: &Self) -> Result<Self, HypergraphError> {
        self.check_operands(field, other)?;
        let l = self.order();
        let mut coeffs = vec![Fq::ZERO; l];
        for (i, &a) in self.coeffs.iter().enumerate().filter(|(_, a)| !a.is_zero()) {
            for (j, &b) in other.coeffs.iter().enumerate() {
                let k = (i + j) % l;
                coeffs[k] = field.add(coeffs[k], field.mul(a, b));
            }
        }
        Ok(Self { coeffs })
    }

    /// The image under `g -> g^{-1}`.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        let l = self.order();
        let coeffs = (0..l).map(|i| self.coeffs[(l - i) % l]).collect();
        Self { coeffs }
    }

    /// The `L × L` circulant `sum c_k P^k`, where `P` is the cyclic shift with a one at
    /// `(i, i + 1 mod L)`. Lifting is a ring homomorphism into `L × L` matrices.
    #[must_use]
    pub fn lift(&self) -> RowMajorMatrix<Fq> {
        let l = self.order();
        let mut m = RowMajorMatrix::zeros(l, l);
        for (k, &c) in self.coeffs.iter().enumerate() {
            for i in 0..l {
                m.values[i * l + (i + k) % l] = c;
            }
        }
        m
    }

    fn check_operands(&self, field: &GaloisField, other: &Self) -> Result<(), HypergraphError> {
        if self.order() != other.order() {
            return Err(HypergraphError::OrderMismatch {
                left: self.order(),
                right: other.order(),
            });
        }
        self.check_coefficients(field)?;
        other.check_coefficients(field)
    }
}

/// A matrix over `F[Z_L]`, with every entry over the same `L`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAlgebraMatrix {
    order: usize,
    entries: RowMajorMatrix<GroupAlgebraElement>,
}

impl GroupAlgebraMatrix {
    pub fn from_rows<R: AsRef<[GroupAlgebraElement]>>(rows: &[R]) -> Result<Self, HypergraphError> {
        let entries = RowMajorMatrix::from_rows(rows)?;
        let Some(first) = entries.values.first() else {
            return Err(HypergraphError::EmptyMatrix);
        };
        let order = first.order();
        if let Some(e) = entries.values.iter().find(|e| e.order() != order) {
            return Err(HypergraphError::OrderMismatch {
                left: order,
                right: e.order(),
            });
        }
        Ok(Self { order, entries })
    }

    /// `L`.
    pub const fn order(&self) -> usize {
        self.order
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.entries.height(), self.entries.width)
    }

    /// Checks every coefficient of every entry against `field`.
    pub fn check_elements(&self, field: &GaloisField) -> Result<(), HypergraphError> {
        let width = self.entries.width;
        for (i, e) in self.entries.values.iter().enumerate() {
            if let Err(HypergraphError::CoefficientOutOfRange { value, order, .. }) =
                e.check_coefficients(field)
            {
                return Err(HypergraphError::ElementOutOfRange {
                    row: i / width,
                    col: i % width,
                    value,
                    order,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, r: usize, c: usize) -> &GroupAlgebraElement {
        &self.entries.row_slice(r)[c]
    }

    pub fn mul(&self, field: &GaloisField, other: &Self) -> Result<Self, HypergraphError> {
        if self.order != other.order {
            return Err(HypergraphError::OrderMismatch {
                left: self.order,
                right: other.order,
            });
        }
        let (height, inner, width) = (
            self.entries.height(),
            self.entries.width,
            other.entries.width,
        );
        if inner != other.entries.height() {
            return Err(MatrixError::DimensionMismatch {
                op: "multiply",
                left: self.dimensions(),
                right: other.dimensions(),
            }
            .into());
        }

        let mut values = Vec::with_capacity(height * width);
        for (i, j) in (0..height).cartesian_product(0..width) {
            let mut acc = GroupAlgebraElement::zero(self.order)?;
            for k in 0..inner {
                acc = acc.add(field, &self.get(i, k).mul(field, other.get(k, j))?)?;
            }
            values.push(acc);
        }
        Ok(Self {
            order: self.order,
            entries: RowMajorMatrix::new(values, width),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.entries.values.iter().all(GroupAlgebraElement::is_zero)
    }

    /// Replaces every entry by its `L × L` circulant.
    #[must_use]
    pub fn lift(&self) -> RowMajorMatrix<Fq> {
        let l = self.order;
        let Dimensions { height, width } = self.dimensions();
        let full_width = width * l;
        let mut m = RowMajorMatrix::zeros(height * l, full_width);
        for (i, j) in (0..height).cartesian_product(0..width) {
            let block = self.get(i, j).lift();
            for (bi, row) in block.rows().enumerate() {
                let start = (i * l + bi) * full_width + j * l;
                m.values[start..start + l].copy_from_slice(row);
            }
        }
        m
    }
}
