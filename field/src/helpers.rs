use alloc::vec::Vec;

/// Trial-division primality test. Only used on values below `2^32`, where it is fast enough.
#[must_use]
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let n = u64::from(n);
    let mut d = 2u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// The distinct prime factors of `n`, in increasing order.
#[must_use]
pub fn prime_factors(mut n: u32) -> Vec<u32> {
    let mut factors = Vec::new();
    let mut d = 2u32;
    while u64::from(d) * u64::from(d) <= u64::from(n) {
        if n % d == 0 {
            factors.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}

/// Writes `n = p^m` with `p` prime, if possible.
#[must_use]
pub fn as_prime_power(n: u32) -> Option<(u32, usize)> {
    let factors = prime_factors(n);
    let [p] = factors[..] else {
        return None;
    };
    let mut m = 0;
    let mut rest = n;
    while rest > 1 {
        rest /= p;
        m += 1;
    }
    Some((p, m))
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn test_is_prime() {
        let primes: Vec<u32> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert!(is_prime(65521));
        assert!(!is_prime(65535));
    }

    #[test]
    fn test_prime_factors() {
        assert_eq!(prime_factors(1), Vec::<u32>::new());
        assert_eq!(prime_factors(12), vec![2, 3]);
        assert_eq!(prime_factors(255), vec![3, 5, 17]);
        assert_eq!(prime_factors(65521), vec![65521]);
    }

    #[test]
    fn test_as_prime_power() {
        assert_eq!(as_prime_power(2), Some((2, 1)));
        assert_eq!(as_prime_power(256), Some((2, 8)));
        assert_eq!(as_prime_power(243), Some((3, 5)));
        assert_eq!(as_prime_power(12), None);
        assert_eq!(as_prime_power(1), None);
        assert_eq!(as_prime_power(0), None);
    }
}
