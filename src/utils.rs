//! Bit-level kernels shared by every element representation.
//!
//! Polynomials over GF(2) are packed into a `u64`, bit `i` holding the
//! coefficient of `x^i`. The modulus of a GF(2^n) field is such a polynomial
//! of degree `n`; reduced field elements have no bit at position `>= n`.

use core::fmt;

/// Position of the highest set bit of `value` among bits `0..=width - start`.
///
/// `start = 1` scans the full `width`; larger `start` values skip the top
/// `start - 1` bits, which lets callers walk down a polynomial term by term.
/// Returns `None` if no bit in that range is set.
///
/// # Example
///
/// ```
/// use gf2n::utils::lead_bit_position;
///
/// assert_eq!(lead_bit_position(0b1011, 1, 8), Some(3));
/// // Skip bits 7..=3, leaving 0b011.
/// assert_eq!(lead_bit_position(0b1011, 6, 8), Some(1));
/// assert_eq!(lead_bit_position(0, 1, 8), None);
/// ```
pub const fn lead_bit_position(value: u64, start: u32, width: u32) -> Option<u32> {
    if start == 0 || start > width || width > 64 {
        return None;
    }
    let top = width - start;
    let masked = if top >= 63 {
        value
    } else {
        value & ((1u64 << (top + 1)) - 1)
    };
    if masked == 0 {
        None
    } else {
        Some(63 - masked.leading_zeros())
    }
}

/// Degree of a modulus polynomial.
///
/// Returns 0 for the degenerate moduli `0` and `1`; callers are expected to
/// reject those (see [`FieldState::new`](crate::FieldState::new)).
#[inline]
pub const fn modulus_degree(modulus: u64) -> u32 {
    if modulus == 0 {
        0
    } else {
        63 - modulus.leading_zeros()
    }
}

/// Number of elements of GF(2^degree).
#[inline]
pub const fn field_order(degree: u32) -> u64 {
    1u64 << degree
}

/// Reduce `value` modulo `modulus` by polynomial long division over GF(2).
///
/// Each step XORs a shifted copy of the modulus onto the leading term of
/// `value`, clearing it, until nothing is left at or above the modulus
/// degree. A zero modulus leaves `value` untouched.
///
/// # Example
///
/// ```
/// use gf2n::utils::reduce;
///
/// // x^3 + x + 1
/// assert_eq!(reduce(10, 0b1011), 1);
/// assert_eq!(reduce(42, 0b1011), 6);
/// ```
pub const fn reduce(mut value: u64, modulus: u64) -> u64 {
    if modulus == 0 {
        return value;
    }
    let degree = modulus_degree(modulus);
    while value >> degree != 0 {
        let lead = 63 - value.leading_zeros();
        value ^= modulus << (lead - degree);
    }
    value
}

/// Multiply two reduced elements modulo `modulus`.
///
/// Shift-and-add over the bits of `b`, folding the modulus back in every
/// time the shifted `a` reaches `x^degree`, so the result never needs a
/// separate reduction pass.
#[inline]
pub const fn mul_mod(a: u64, b: u64, modulus: u64, degree: u32) -> u64 {
    let top = field_order(degree);
    let mut acc = 0u64;
    let mut a = a;
    let mut b = b;
    while b > 0 {
        if b & 1 == 1 {
            acc ^= a;
        }
        b >>= 1;
        a <<= 1;
        if a & top != 0 {
            a ^= modulus;
        }
    }
    acc
}

/// Compute `base^exp` modulo `modulus` using square-and-multiply.
///
/// Time complexity: O(log exp) multiplications.
pub const fn pow_mod(base: u64, exp: u64, modulus: u64, degree: u32) -> u64 {
    let mut result = 1u64;
    let mut base = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = mul_mod(result, base, modulus, degree);
        }
        base = mul_mod(base, base, modulus, degree);
        e >>= 1;
    }
    result
}

/// Multiplicative inverse of a reduced element, `None` for zero.
///
/// The non-zero elements form a cyclic group of order `2^degree - 1`, so
/// `a^(2^degree - 2)` is the inverse of `a`.
/// A degree-0 modulus has no non-zero elements, so it also yields `None`.
pub const fn inverse_mod(a: u64, modulus: u64, degree: u32) -> Option<u64> {
    if a == 0 {
        return None;
    }
    match field_order(degree).checked_sub(2) {
        Some(exp) => Some(pow_mod(a, exp, modulus, degree)),
        None => None,
    }
}

/// Greatest common divisor of two GF(2) polynomials.
const fn poly_gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = reduce(a, b);
        a = b;
        b = r;
    }
    a
}

const fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// Rabin's irreducibility test for a modulus polynomial over GF(2).
///
/// A polynomial `f` of degree `n` is irreducible iff `x^(2^n) = x (mod f)`
/// and `gcd(x^(2^(n/q)) - x, f) = 1` for every prime `q` dividing `n`.
/// Costs `n` modular squarings plus one gcd per prime factor of `n`.
///
/// # Example
///
/// ```
/// use gf2n::utils::is_irreducible;
///
/// assert!(is_irreducible(0b1011)); // x^3 + x + 1
/// assert!(!is_irreducible(0b101)); // x^2 + 1 = (x + 1)^2
/// assert!(!is_irreducible(1));
/// ```
pub const fn is_irreducible(modulus: u64) -> bool {
    let n = modulus_degree(modulus);
    if n == 0 {
        return false;
    }
    if n == 1 {
        return true;
    }
    let x = 0b10;
    let mut h = x;
    let mut i = 1;
    while i <= n {
        h = mul_mod(h, h, modulus, n);
        if i < n && n % i == 0 && is_prime(n / i) && poly_gcd(h ^ x, modulus) != 1 {
            return false;
        }
        i += 1;
    }
    h == x
}

/// Pack a most-significant-first coefficient sequence into a word.
///
/// The coefficient at index `k` of an `n`-long sequence becomes the
/// coefficient of `x^(n-1-k)`; only the low bit of each item counts.
/// Items beyond the 64th shift earlier ones out of the word.
pub fn pack_coeffs<I>(coeffs: I) -> u64
where
    I: IntoIterator,
    I::Item: Into<u64>,
{
    coeffs
        .into_iter()
        .fold(0u64, |acc, c| (acc << 1) | (c.into() & 1))
}

/// Write `value` in polynomial notation, highest power first.
///
/// `0b1011` is written as `x^3+x+1`; zero is written as `0`.
pub fn write_poly(f: &mut fmt::Formatter<'_>, value: u64) -> fmt::Result {
    let mut rest = value;
    let mut start = 1;
    if rest == 0 {
        return f.write_str("0");
    }
    while let Some(deg) = lead_bit_position(rest, start, 64) {
        match deg {
            0 => f.write_str("1")?,
            1 => f.write_str("x")?,
            d => write!(f, "x^{}", d)?,
        }
        rest ^= 1u64 << deg;
        if rest != 0 {
            f.write_str("+")?;
        }
        start = 64 - deg + 1;
    }
    Ok(())
}
