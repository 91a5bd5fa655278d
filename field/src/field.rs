use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use itertools::Itertools;
use rand::Rng;
use tracing::{debug, instrument};

use crate::helpers::{as_prime_power, is_prime, prime_factors};
use crate::{poly, FieldError, Fq};

/// The largest field order supported. Keeps the exp/log tables small and every intermediate
/// product inside a `u64`.
pub const MAX_ORDER: u32 = 1 << 16;

/// The finite field GF(p^m), realised as GF(p)[x] / (f) for a monic irreducible `f` of degree m.
///
/// Multiplication and inversion go through exp/log tables over a generator of the multiplicative
/// group; addition works digit by digit on the base-`p` encoding of [`Fq`]. The tables are built
/// once, so a field should be constructed once and shared, usually behind an `Arc`.
///
/// Two fields compare equal when they have the same characteristic and the same modulus; fields
/// of equal order with different moduli are isomorphic but encode elements differently, so they
/// are treated as distinct.
#[derive(Clone)]
pub struct GaloisField {
    characteristic: u32,
    degree: usize,
    order: u32,
    /// Monic, little-endian, of length `degree + 1`.
    modulus: Vec<u32>,
    generator: Fq,
    /// `exp[i] = g^i`, stored twice over so that `exp[log a + log b]` never needs a reduction.
    exp: Vec<u32>,
    /// `log[g^i] = i`; `log[0]` is unused.
    log: Vec<u32>,
}

impl GaloisField {
    /// The field of the given order, using the first monic irreducible polynomial of the right
    /// degree as its modulus.
    #[instrument(level = "debug")]
    pub fn new(order: u32) -> Result<Self, FieldError> {
        if order > MAX_ORDER {
            return Err(FieldError::OrderTooLarge {
                order: u64::from(order),
                max: MAX_ORDER,
            });
        }
        let (p, m) = as_prime_power(order).ok_or(FieldError::NotPrimePower(order))?;
        let modulus = poly::first_irreducible(p, m)
            .ok_or(FieldError::InvalidModulus("no irreducible polynomial found"))?;
        debug!(?modulus, "selected modulus");
        Ok(Self::from_valid_modulus(p, modulus))
    }

    /// The field GF(p)[x] / (modulus). `modulus` lists coefficients from the constant term up
    /// and must be monic and irreducible over GF(p).
    #[instrument(level = "debug")]
    pub fn with_modulus(characteristic: u32, modulus: Vec<u32>) -> Result<Self, FieldError> {
        if !is_prime(characteristic) {
            return Err(FieldError::NotPrime(characteristic));
        }
        if modulus.len() < 2 {
            return Err(FieldError::InvalidModulus("degree must be at least one"));
        }
        if modulus.last() != Some(&1) {
            return Err(FieldError::InvalidModulus("modulus must be monic"));
        }
        if modulus.iter().any(|&c| c >= characteristic) {
            return Err(FieldError::InvalidModulus("coefficient exceeds the characteristic"));
        }
        let degree = modulus.len() - 1;
        let order = u32::try_from(degree)
            .ok()
            .and_then(|d| u64::from(characteristic).checked_pow(d))
            .unwrap_or(u64::MAX);
        if order > u64::from(MAX_ORDER) {
            return Err(FieldError::OrderTooLarge {
                order,
                max: MAX_ORDER,
            });
        }
        if !poly::is_irreducible(&modulus, characteristic) {
            return Err(FieldError::InvalidModulus("modulus is reducible"));
        }
        Ok(Self::from_valid_modulus(characteristic, modulus))
    }

    fn from_valid_modulus(p: u32, modulus: Vec<u32>) -> Self {
        let degree = modulus.len() - 1;
        let order = p.pow(degree as u32);
        let group_order = order - 1;
        let cofactors = prime_factors(group_order)
            .into_iter()
            .map(|r| u64::from(group_order / r))
            .collect_vec();

        // An irreducible modulus makes every non-zero residue a unit, so a generator exists.
        let generator = (1..order)
            .find(|&candidate| {
                let digits = poly::to_digits(candidate, p, degree);
                cofactors.iter().all(|&e| {
                    poly::from_digits(&poly::pow_mod(&digits, e, &modulus, p), p) != 1
                })
            })
            .unwrap_or(1);

        let mut exp = vec![0; 2 * group_order as usize];
        let mut log = vec![0; order as usize];
        let g = poly::to_digits(generator, p, degree);
        let mut acc = poly::to_digits(1, p, degree);
        for i in 0..group_order as usize {
            let value = poly::from_digits(&acc, p);
            exp[i] = value;
            exp[i + group_order as usize] = value;
            log[value as usize] = i as u32;
            acc = poly::mul_mod(&acc, &g, &modulus, p);
        }

        Self {
            characteristic: p,
            degree,
            order,
            modulus,
            generator: Fq::new(generator),
            exp,
            log,
        }
    }

    #[inline]
    #[must_use]
    pub const fn characteristic(&self) -> u32 {
        self.characteristic
    }

    #[inline]
    #[must_use]
    pub const fn degree(&self) -> usize {
        self.degree
    }

    #[inline]
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.order
    }

    #[must_use]
    pub fn modulus(&self) -> &[u32] {
        &self.modulus
    }

    /// A generator of the multiplicative group.
    #[must_use]
    pub const fn generator(&self) -> Fq {
        self.generator
    }

    #[inline]
    #[must_use]
    pub const fn contains(&self, x: Fq) -> bool {
        x.as_u32() < self.order
    }

    /// Checks that `value` encodes an element of this field.
    pub fn element(&self, value: u32) -> Result<Fq, FieldError> {
        let x = Fq::new(value);
        if self.contains(x) {
            Ok(x)
        } else {
            Err(FieldError::ElementOutOfRange {
                value,
                order: self.order,
            })
        }
    }

    /// Every element, in encoding order.
    pub fn elements(&self) -> impl Iterator<Item = Fq> + Clone {
        (0..self.order).map(Fq::new)
    }

    #[must_use]
    pub fn zero_vec(len: usize) -> Vec<Fq> {
        vec![Fq::ZERO; len]
    }

    #[inline]
    #[must_use]
    pub fn add(&self, a: Fq, b: Fq) -> Fq {
        let (a, b) = (a.as_u32(), b.as_u32());
        let p = self.characteristic;
        if p == 2 {
            return Fq::new(a ^ b);
        }
        if self.degree == 1 {
            return Fq::new((a + b) % p);
        }
        self.digitwise(a, b, |x, y| (x + y) % p)
    }

    #[inline]
    #[must_use]
    pub fn neg(&self, a: Fq) -> Fq {
        let p = self.characteristic;
        if p == 2 {
            return a;
        }
        if self.degree == 1 {
            return Fq::new((p - a.as_u32()) % p);
        }
        self.digitwise(a.as_u32(), 0, |x, _| (p - x) % p)
    }

    #[inline]
    #[must_use]
    pub fn sub(&self, a: Fq, b: Fq) -> Fq {
        self.add(a, self.neg(b))
    }

    #[inline]
    #[must_use]
    pub fn mul(&self, a: Fq, b: Fq) -> Fq {
        if a.is_zero() || b.is_zero() {
            return Fq::ZERO;
        }
        let idx = self.log[a.as_u32() as usize] + self.log[b.as_u32() as usize];
        Fq::new(self.exp[idx as usize])
    }

    /// The multiplicative inverse, or `None` for zero.
    #[inline]
    #[must_use]
    pub fn try_inverse(&self, a: Fq) -> Option<Fq> {
        if a.is_zero() {
            return None;
        }
        let idx = (self.order - 1) - self.log[a.as_u32() as usize];
        Some(Fq::new(self.exp[idx as usize]))
    }

    #[inline]
    #[must_use]
    pub fn div(&self, a: Fq, b: Fq) -> Option<Fq> {
        self.try_inverse(b).map(|inv| self.mul(a, inv))
    }

    #[must_use]
    pub fn pow(&self, a: Fq, e: u64) -> Fq {
        if e == 0 {
            return Fq::ONE;
        }
        if a.is_zero() {
            return Fq::ZERO;
        }
        let group_order = u64::from(self.order - 1);
        let idx = (u64::from(self.log[a.as_u32() as usize]) * (e % group_order)) % group_order;
        Fq::new(self.exp[idx as usize])
    }

    /// `sum_i a_i * b_i`.
    #[must_use]
    pub fn dot(&self, a: &[Fq], b: &[Fq]) -> Fq {
        a.iter()
            .zip_eq(b)
            .fold(Fq::ZERO, |acc, (&x, &y)| self.add(acc, self.mul(x, y)))
    }

    /// `x += y * s`, where `s` is a scalar.
    pub fn add_scaled_slice_in_place(&self, x: &mut [Fq], y: &[Fq], s: Fq) {
        if s.is_zero() {
            return;
        }
        x.iter_mut()
            .zip_eq(y)
            .for_each(|(x_i, &y_i)| *x_i = self.add(*x_i, self.mul(y_i, s)));
    }

    pub fn scale_slice_in_place(&self, x: &mut [Fq], s: Fq) {
        x.iter_mut().for_each(|x_i| *x_i = self.mul(*x_i, s));
    }

    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Fq {
        Fq::new(rng.random_range(0..self.order))
    }

    pub fn random_nonzero<R: Rng + ?Sized>(&self, rng: &mut R) -> Fq {
        Fq::new(rng.random_range(1..self.order))
    }

    fn digitwise(&self, mut a: u32, mut b: u32, op: impl Fn(u32, u32) -> u32) -> Fq {
        let p = self.characteristic;
        let mut out = 0;
        let mut place = 1;
        for _ in 0..self.degree {
            out += op(a % p, b % p) * place;
            a /= p;
            b /= p;
            place *= p;
        }
        Fq::new(out)
    }
}

impl PartialEq for GaloisField {
    fn eq(&self, other: &Self) -> bool {
        self.characteristic == other.characteristic && self.modulus == other.modulus
    }
}

impl Eq for GaloisField {}

impl fmt::Debug for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaloisField")
            .field("order", &self.order)
            .field("modulus", &self.modulus)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for GaloisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF({})", self.order)
    }
}
