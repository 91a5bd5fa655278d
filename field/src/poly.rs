//! Dense polynomials over a prime field, as little-endian coefficient vectors.
//!
//! Only what is needed to validate a modulus and to build the exp/log tables of a
//! [`GaloisField`](crate::GaloisField) lives here; field arithmetic itself is table driven.

use alloc::vec;
use alloc::vec::Vec;

/// Splits an element encoding into its `m` base-`p` digits, least significant first.
pub(crate) fn to_digits(mut value: u32, p: u32, m: usize) -> Vec<u32> {
    let mut digits = vec![0; m];
    for d in &mut digits {
        *d = value % p;
        value /= p;
    }
    digits
}

pub(crate) fn from_digits(digits: &[u32], p: u32) -> u32 {
    digits.iter().rev().fold(0, |acc, &d| acc * p + d)
}

/// The remainder of `a` modulo the monic polynomial `divisor`.
pub(crate) fn rem(a: &[u32], divisor: &[u32], p: u32) -> Vec<u32> {
    let p = u64::from(p);
    let deg = divisor.len() - 1;
    let mut r: Vec<u64> = a.iter().map(|&c| u64::from(c)).collect();
    for i in (deg..r.len()).rev() {
        let c = r[i] % p;
        r[i] = 0;
        if c == 0 {
            continue;
        }
        for (j, &d) in divisor[..deg].iter().enumerate() {
            r[i - deg + j] = (r[i - deg + j] + c * (p - u64::from(d))) % p;
        }
    }
    r.truncate(deg);
    r.into_iter().map(|c| (c % p) as u32).collect()
}

/// `a * b mod modulus`, where `a` and `b` have degree below that of the monic `modulus`.
pub(crate) fn mul_mod(a: &[u32], b: &[u32], modulus: &[u32], p: u32) -> Vec<u32> {
    let m = modulus.len() - 1;
    let wide = u64::from(p);
    let mut product = vec![0u32; 2 * m - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            let acc = u64::from(product[i + j]) + u64::from(x) * u64::from(y);
            product[i + j] = (acc % wide) as u32;
        }
    }
    let mut reduced = rem(&product, modulus, p);
    reduced.resize(m, 0);
    reduced
}

/// `base^exp mod modulus` by square-and-multiply.
pub(crate) fn pow_mod(base: &[u32], mut exp: u64, modulus: &[u32], p: u32) -> Vec<u32> {
    let m = modulus.len() - 1;
    let mut result = vec![0; m];
    result[0] = 1;
    let mut base = base.to_vec();
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(&result, &base, modulus, p);
        }
        base = mul_mod(&base, &base, modulus, p);
        exp >>= 1;
    }
    result
}

/// Irreducibility by trial division with every monic polynomial of degree at most `deg / 2`.
pub(crate) fn is_irreducible(f: &[u32], p: u32) -> bool {
    let deg = f.len() - 1;
    if deg <= 1 {
        return deg == 1;
    }
    for d in 1..=deg / 2 {
        let count = (p as usize).pow(d as u32);
        for low in 0..count {
            let mut divisor = to_digits(low as u32, p, d);
            divisor.push(1);
            if rem(f, &divisor, p).iter().all(|&c| c == 0) {
                return false;
            }
        }
    }
    true
}

/// The lexicographically first monic irreducible polynomial of degree `m` over GF(p), ordered
/// by the integer encoding of its lower coefficients.
pub(crate) fn first_irreducible(p: u32, m: usize) -> Option<Vec<u32>> {
    let count = (p as usize).pow(m as u32);
    (0..count).find_map(|low| {
        let mut f = to_digits(low as u32, p, m);
        f.push(1);
        is_irreducible(&f, p).then_some(f)
    })
}
