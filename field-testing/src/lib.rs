//! Utilities for testing field implementations.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tc_field::{Fq, GaloisField};

/// Exhaustive inverse check; only call this on small fields.
pub fn test_inverse(field: &GaloisField) {
    assert_eq!(None, field.try_inverse(Fq::ZERO));
    assert_eq!(Some(Fq::ONE), field.try_inverse(Fq::ONE));

    for x in field.elements().skip(1) {
        let inv = field.try_inverse(x).unwrap();
        assert_eq!(field.mul(x, inv), Fq::ONE, "{x} * {inv} != 1 in {field}");
    }
}

pub fn test_add_neg_sub(field: &GaloisField) {
    let mut rng = SmallRng::seed_from_u64(1);
    for _ in 0..64 {
        let x = field.random(&mut rng);
        let y = field.random(&mut rng);
        assert_eq!(field.add(x, Fq::ZERO), x);
        assert_eq!(field.add(x, field.neg(x)), Fq::ZERO);
        assert_eq!(field.add(x, y), field.add(y, x));
        assert_eq!(field.sub(field.add(x, y), y), x);
        assert!(field.contains(field.add(x, y)));
    }
}

pub fn test_mul_axioms(field: &GaloisField) {
    let mut rng = SmallRng::seed_from_u64(2);
    for _ in 0..64 {
        let x = field.random(&mut rng);
        let y = field.random(&mut rng);
        let z = field.random(&mut rng);
        assert_eq!(field.mul(x, Fq::ONE), x);
        assert_eq!(field.mul(x, Fq::ZERO), Fq::ZERO);
        assert_eq!(field.mul(x, y), field.mul(y, x));
        assert_eq!(
            field.mul(field.mul(x, y), z),
            field.mul(x, field.mul(y, z))
        );
        assert_eq!(
            field.mul(x, field.add(y, z)),
            field.add(field.mul(x, y), field.mul(x, z))
        );
        assert!(field.contains(field.mul(x, y)));
    }
}

/// The characteristic, added to itself, vanishes; so does every element scaled by it.
pub fn test_characteristic(field: &GaloisField) {
    let mut rng = SmallRng::seed_from_u64(3);
    for _ in 0..16 {
        let x = field.random(&mut rng);
        let sum = (0..field.characteristic()).fold(Fq::ZERO, |acc, _| field.add(acc, x));
        assert_eq!(sum, Fq::ZERO);
    }
}

/// The generator reaches every non-zero element exactly once before returning to one.
pub fn test_generator(field: &GaloisField) {
    let g = field.generator();
    let group_order = u64::from(field.order() - 1);
    let mut powers: Vec<Fq> = (0..group_order).map(|e| field.pow(g, e)).collect();
    assert_eq!(field.pow(g, group_order), Fq::ONE);
    powers.sort();
    powers.dedup();
    assert_eq!(powers.len() as u64, group_order);
}

/// Fermat's little theorem, `x^q = x`.
pub fn test_frobenius(field: &GaloisField) {
    for x in field.elements() {
        assert_eq!(field.pow(x, u64::from(field.order())), x);
    }
}

pub fn test_field_axioms(field: &GaloisField) {
    test_inverse(field);
    test_add_neg_sub(field);
    test_mul_axioms(field);
    test_characteristic(field);
    test_generator(field);
    test_frobenius(field);
}
