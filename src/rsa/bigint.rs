// RSA Big Integer Operations
// Number-theory helpers over num-bigint: gcd, coprimes, inverses, exponentiation

use num_bigint::{BigInt, BigUint, ToBigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::error::{Result, RsaError};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Modular exponentiation: base^exp mod modulus
/// Uses square-and-multiply algorithm
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    if modulus.is_one() {
        return RsaBigInt::zero();
    }

    let mut result = RsaBigInt::one();
    let mut base = base % modulus;
    let mut exp = exp.clone();

    while !exp.is_zero() {
        if exp.is_odd() {
            result = (&result * &base) % modulus;
        }
        base = (&base * &base) % modulus;
        exp >>= 1;
    }

    result
}

/// Modular exponentiation by repeated multiplication, one step per unit of `exp`.
///
/// Linear in `exp`; kept as the reference that `mod_pow` must agree with.
pub fn mod_pow_naive(base: &RsaBigInt, exp: &RsaBigInt, modulus: &RsaBigInt) -> RsaBigInt {
    let mut result = RsaBigInt::one() % modulus;
    let mut step = RsaBigInt::zero();

    while &step < exp {
        result = (&result * base) % modulus;
        step += 1u8;
    }

    result
}

/// Greatest common divisor
pub fn gcd(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.gcd(b)
}

/// True when `a` and `b` share no factor other than 1
pub fn is_coprime(a: &RsaBigInt, b: &RsaBigInt) -> bool {
    gcd(a, b).is_one()
}

/// Coprimes of `n`, scanning `0..=n` in ascending order.
///
/// Stops as soon as `max_count` values have been collected; a `max_count` of
/// zero means "no limit". Callers index into the result (e.g. "the second
/// coprime"), so the ascending order is part of the contract.
pub fn coprimes_of(n: &RsaBigInt, max_count: usize) -> Vec<RsaBigInt> {
    let mut coprimes = Vec::new();
    let mut i = RsaBigInt::zero();

    while &i <= n {
        if is_coprime(&i, n) {
            coprimes.push(i.clone());
            if max_count != 0 && coprimes.len() == max_count {
                break;
            }
        }
        i += 1u8;
    }

    coprimes
}

/// Euler's totient by counting the coprimes in `1..=n`
pub fn euler_totient(n: &RsaBigInt) -> RsaBigInt {
    let mut count = RsaBigInt::zero();
    let mut i = RsaBigInt::one();

    while &i <= n {
        if is_coprime(&i, n) {
            count += 1u8;
        }
        i += 1u8;
    }

    count
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    if b.is_zero() {
        return (a.clone(), BigInt::one(), BigInt::zero());
    }

    let (gcd, x1, y1) = extended_gcd(b, &(a % b));
    let x = y1.clone();
    let y = x1 - (a / b) * &y1;

    (gcd, x, y)
}

fn no_inverse(a: &RsaBigInt, m: &RsaBigInt) -> RsaError {
    RsaError::NoModularInverse {
        value: a.to_string(),
        modulus: m.to_string(),
    }
}

/// Compute modular inverse: a^(-1) mod m, normalized into [0, m)
/// Fails with `NoModularInverse` unless gcd(a, m) == 1
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    if m.is_zero() {
        return Err(no_inverse(a, m));
    }

    let modulus = BigInt::from(m.clone());
    let (gcd, x, _) = extended_gcd(&BigInt::from(a.clone()), &modulus);

    if !gcd.is_one() {
        return Err(no_inverse(a, m));
    }

    x.mod_floor(&modulus)
        .to_biguint()
        .ok_or_else(|| no_inverse(a, m))
}

/// Smallest positive d with d*a mod m == 1, found by linear search
pub fn mod_inverse_brute_force(a: &RsaBigInt, m: &RsaBigInt) -> Result<RsaBigInt> {
    if m <= &RsaBigInt::one() || !is_coprime(a, m) {
        return Err(no_inverse(a, m));
    }

    let mut d = RsaBigInt::one();
    while &d < m {
        if ((&d * a) % m).is_one() {
            return Ok(d);
        }
        d += 1u8;
    }

    Err(no_inverse(a, m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_pow() {
        // 3^5 mod 7 = 243 mod 7 = 5
        let base = from_u64(3);
        let exp = from_u64(5);
        let modulus = from_u64(7);
        let result = mod_pow(&base, &exp, &modulus);
        assert_eq!(result, from_u64(5));
    }

    #[test]
    fn test_mod_pow_matches_naive() {
        let modulus = from_u64(3233);
        for base in [0u64, 1, 2, 65, 72, 3232] {
            for exp in [0u64, 1, 2, 17, 413, 2753] {
                let fast = mod_pow(&from_u64(base), &from_u64(exp), &modulus);
                let slow = mod_pow_naive(&from_u64(base), &from_u64(exp), &modulus);
                assert_eq!(fast, slow, "base={} exp={}", base, exp);
            }
        }

        // Modulus one collapses everything to zero, including exponent zero
        assert_eq!(mod_pow(&from_u64(5), &from_u64(0), &from_u64(1)), from_u64(0));
        assert_eq!(mod_pow_naive(&from_u64(5), &from_u64(0), &from_u64(1)), from_u64(0));
    }

    #[test]
    fn test_gcd_and_coprime() {
        assert_eq!(gcd(&from_u64(12), &from_u64(18)), from_u64(6));
        assert_eq!(gcd(&from_u64(0), &from_u64(9)), from_u64(9));
        assert!(is_coprime(&from_u64(8), &from_u64(15)));
        assert!(!is_coprime(&from_u64(8), &from_u64(12)));
    }

    #[test]
    fn test_coprimes_of() {
        let all = coprimes_of(&from_u64(10), 0);
        assert_eq!(all, vec![from_u64(1), from_u64(3), from_u64(7), from_u64(9)]);

        let capped = coprimes_of(&from_u64(10), 2);
        assert_eq!(capped, vec![from_u64(1), from_u64(3)]);

        // Fewer than requested when the scan runs out
        assert_eq!(coprimes_of(&from_u64(10), 50).len(), 4);
    }

    #[test]
    fn test_euler_totient() {
        // 61 * 53 = 3233, phi = 60 * 52
        assert_eq!(euler_totient(&from_u64(3233)), from_u64(3120));
        assert_eq!(euler_totient(&from_u64(1)), from_u64(1));
    }

    #[test]
    fn test_mod_inverse() {
        // 3 * 5 = 15 ≡ 1 mod 7, so inverse of 3 mod 7 is 5
        let a = from_u64(3);
        let m = from_u64(7);
        let inv = mod_inverse(&a, &m).unwrap();
        assert_eq!(inv, from_u64(5));

        // Verify: 3 * 5 = 15 ≡ 1 (mod 7)
        assert_eq!((a * inv) % m, from_u64(1));

        // Textbook pair: e = 17, phi = 3120 -> d = 2753
        assert_eq!(mod_inverse(&from_u64(17), &from_u64(3120)).unwrap(), from_u64(2753));
    }

    #[test]
    fn test_mod_inverse_missing() {
        let result = mod_inverse(&from_u64(4), &from_u64(8));
        assert!(matches!(result, Err(RsaError::NoModularInverse { .. })));

        let result = mod_inverse(&from_u64(4), &from_u64(0));
        assert!(matches!(result, Err(RsaError::NoModularInverse { .. })));
    }

    #[test]
    fn test_brute_force_agrees_with_extended_euclid() {
        let t = from_u64(3120);
        for e in coprimes_of(&t, 40).into_iter().skip(1) {
            let fast = mod_inverse(&e, &t).unwrap();
            let slow = mod_inverse_brute_force(&e, &t).unwrap();
            assert_eq!(fast, slow, "e={}", e);
        }

        let result = mod_inverse_brute_force(&from_u64(6), &from_u64(3120));
        assert!(matches!(result, Err(RsaError::NoModularInverse { .. })));
    }
}
