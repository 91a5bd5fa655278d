use core::fmt;

use serde::{Deserialize, Serialize};

/// An element of some [`GaloisField`](crate::GaloisField).
///
/// The element `sum c_i x^i` of GF(p^m) is stored as the integer `sum c_i p^i`. An `Fq` carries
/// no reference to its field; every operation goes through the field, which assumes canonical
/// inputs (see [`GaloisField::contains`](crate::GaloisField::contains)).
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Fq(u32);

impl Fq {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(1);

    /// Wraps a raw encoding without checking it against any field.
    #[inline]
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[inline]
    #[must_use]
    pub const fn is_one(self) -> bool {
        self.0 == 1
    }

    /// Wraps a whole slice of raw encodings.
    #[must_use]
    pub fn new_slice(values: &[u32]) -> alloc::vec::Vec<Self> {
        values.iter().copied().map(Self).collect()
    }
}

impl fmt::Display for Fq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
