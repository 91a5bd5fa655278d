//! The abstract two-generator ring that lifted product codes start from, and its lift into the
//! group algebra.

use serde::{Deserialize, Serialize};
use tc_field::{Fq, GaloisField};
use tc_matrix::dense::RowMajorMatrix;
use tc_matrix::{Dimensions, MatrixError};

use crate::{GroupAlgebraElement, GroupAlgebraMatrix, HypergraphError};

/// An element `a x + b y` of the ring spanned by two generators `x`, `y`.
///
/// Multiplication is bilinear with `x * x = y * y = 0` and `x * y = y * x = x + y`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RingElement {
    pub x: Fq,
    pub y: Fq,
}

impl RingElement {
    pub const ZERO: Self = Self::new(Fq::ZERO, Fq::ZERO);
    pub const X: Self = Self::new(Fq::ONE, Fq::ZERO);
    pub const Y: Self = Self::new(Fq::ZERO, Fq::ONE);

    #[must_use]
    pub const fn new(x: Fq, y: Fq) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.x.is_zero() && self.y.is_zero()
    }

    #[must_use]
    pub fn add(&self, field: &GaloisField, other: &Self) -> Self {
        Self::new(field.add(self.x, other.x), field.add(self.y, other.y))
    }

    #[must_use]
    pub fn mul(&self, field: &GaloisField, other: &Self) -> Self {
        let c = field.add(field.mul(self.x, other.y), field.mul(self.y, other.x));
        Self::new(c, c)
    }

    fn find_out_of_range(&self, field: &GaloisField) -> Option<u32> {
        [self.x, self.y]
            .into_iter()
            .find(|&c| !field.contains(c))
            .map(Fq::as_u32)
    }
}

/// A matrix over the two-generator ring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingMatrix {
    entries: RowMajorMatrix<RingElement>,
}

impl RingMatrix {
    pub fn from_rows<R: AsRef<[RingElement]>>(rows: &[R]) -> Result<Self, HypergraphError> {
        let entries = RowMajorMatrix::from_rows(rows)?;
        if entries.values.is_empty() {
            return Err(HypergraphError::EmptyMatrix);
        }
        Ok(Self { entries })
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.entries.height(), self.entries.width)
    }

    pub fn get(&self, r: usize, c: usize) -> RingElement {
        self.entries.row_slice(r)[c]
    }

    pub fn check_elements(&self, field: &GaloisField) -> Result<(), HypergraphError> {
        let width = self.entries.width;
        for (i, e) in self.entries.values.iter().enumerate() {
            if let Some(value) = e.find_out_of_range(field) {
                return Err(HypergraphError::ElementOutOfRange {
                    row: i / width,
                    col: i % width,
                    value,
                    order: field.order(),
                });
            }
        }
        Ok(())
    }

    pub fn mul(&self, field: &GaloisField, other: &Self) -> Result<Self, HypergraphError> {
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
        let values = (0..height * width)
            .map(|idx| {
                let (i, j) = (idx / width, idx % width);
                (0..inner).fold(RingElement::ZERO, |acc, k| {
                    acc.add(field, &self.get(i, k).mul(field, &other.get(k, j)))
                })
            })
            .collect();
        Ok(Self {
            entries: RowMajorMatrix::new(values, width),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.entries.values.iter().all(RingElement::is_zero)
    }
}

/// Maps the generators `x`, `y` to chosen elements of a group algebra `F[Z_L]` and extends
/// linearly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingLifter {
    x_image: GroupAlgebraElement,
    y_image: GroupAlgebraElement,
}

impl RingLifter {
    pub fn new(
        x_image: GroupAlgebraElement,
        y_image: GroupAlgebraElement,
    ) -> Result<Self, HypergraphError> {
        if x_image.order() != y_image.order() {
            return Err(HypergraphError::OrderMismatch {
                left: x_image.order(),
                right: y_image.order(),
            });
        }
        Ok(Self { x_image, y_image })
    }

    /// `L`, the order of the target cyclic group.
    pub fn order(&self) -> usize {
        self.x_image.order()
    }

    pub fn lift(
        &self,
        field: &GaloisField,
        e: &RingElement,
    ) -> Result<GroupAlgebraElement, HypergraphError> {
        self.x_image
            .scale(field, e.x)?
            .add(field, &self.y_image.scale(field, e.y)?)
    }

    pub fn lift_matrix(
        &self,
        field: &GaloisField,
        m: &RingMatrix,
    ) -> Result<GroupAlgebraMatrix, HypergraphError> {
        let rows = m
            .entries
            .rows()
            .map(|row| {
                row.iter()
                    .map(|e| self.lift(field, e))
                    .collect::<Result<alloc::vec::Vec<_>, _>>()
            })
            .collect::<Result<alloc::vec::Vec<_>, _>>()?;
        GroupAlgebraMatrix::from_rows(&rows)
    }
}
