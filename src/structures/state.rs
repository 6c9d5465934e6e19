use core::fmt;

use crate::error::{GfError, ModulusError};
use crate::utils::{field_order, is_irreducible, modulus_degree, reduce, write_poly};
use crate::word::Word;

/// Descriptor of a binary field GF(2^n): its modulus polynomial together
/// with the derived degree `n` and order `2^n`.
///
/// Two elements can only be combined when their states are equal. The state
/// is `Copy` and tiny, so runtime-modulus elements carry it by value.
///
/// # Example
///
/// ```
/// use gf2n::FieldState;
///
/// let state = FieldState::new(0b1011u8).unwrap(); // x^3 + x + 1
/// assert_eq!(state.degree(), 3);
/// assert_eq!(state.order(), 8);
/// assert_eq!(state.reduce(42), 6);
///
/// assert!(FieldState::new(1u8).is_err());
/// assert!(FieldState::new(0b101u8).is_err()); // (x + 1)^2
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldState<T: Word> {
    degree: u32,
    order: u64,
    modulus: T,
}

impl<T: Word> FieldState<T> {
    /// Create the state of the field defined by `modulus`.
    ///
    /// # Errors
    ///
    /// Returns `ModulusError::Degenerate` if the modulus has degree 0 and
    /// `ModulusError::NotIrreducible` if it factors over GF(2).
    pub fn new(modulus: T) -> Result<Self, ModulusError> {
        let m = modulus.to_u64();
        if m <= 1 {
            return Err(ModulusError::Degenerate(m));
        }
        if !is_irreducible(m) {
            return Err(ModulusError::NotIrreducible(m));
        }
        Ok(Self::new_unchecked(modulus))
    }

    /// Create a state without validating the modulus.
    ///
    /// The caller guarantees that the modulus is irreducible, e.g. because
    /// it was checked at compile time. With a reducible modulus, inverses
    /// and quotients of zero divisors are meaningless.
    pub fn new_unchecked(modulus: T) -> Self {
        let degree = modulus_degree(modulus.to_u64());
        Self {
            degree,
            order: field_order(degree),
            modulus,
        }
    }

    /// `n` for GF(2^n).
    pub const fn degree(&self) -> u32 {
        self.degree
    }

    /// `2^n` for GF(2^n).
    pub const fn order(&self) -> u64 {
        self.order
    }

    pub const fn modulus(&self) -> T {
        self.modulus
    }

    /// Reduce a raw value into this field.
    #[inline]
    pub fn reduce(&self, value: u64) -> T {
        T::from_u64_truncate(reduce(value, self.modulus.to_u64()))
    }

    /// Whether `value` is already reduced.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        value.to_u64() < self.order
    }

    /// Check that `other` describes the same field.
    ///
    /// # Errors
    ///
    /// Returns `GfError::CrossField` if the moduli differ.
    #[inline]
    pub fn check_same(&self, other: &Self) -> Result<(), GfError> {
        if self.modulus == other.modulus {
            Ok(())
        } else {
            Err(GfError::CrossField {
                lhs: self.modulus.to_u64(),
                rhs: other.modulus.to_u64(),
            })
        }
    }
}

impl<T: Word> fmt::Debug for FieldState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GF(2^{}) mod {:#b}", self.degree, self.modulus)
    }
}

impl<T: Word> fmt::Display for FieldState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_poly(f, self.modulus.to_u64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degree_and_order() {
        let s = FieldState::new(0b1011u8).unwrap();
        assert_eq!(s.degree(), 3);
        assert_eq!(s.order(), 8);
        assert_eq!(s.modulus(), 0b1011);

        let s = FieldState::new(0b1_0001_0000_0000_1011u32).unwrap();
        assert_eq!(s.degree(), 16);
        assert_eq!(s.order(), 65536);

        let s = FieldState::new(0x8000000000000003u64).unwrap();
        assert_eq!(s.degree(), 63);
        assert_eq!(s.order(), 1 << 63);
    }

    #[test]
    fn degenerate_moduli_rejected() {
        assert_eq!(FieldState::new(0u8), Err(ModulusError::Degenerate(0)));
        assert_eq!(FieldState::new(1u16), Err(ModulusError::Degenerate(1)));
        assert!(FieldState::new(0b11u8).is_ok());
    }

    #[test]
    fn reducible_moduli_rejected() {
        // x^2 + 1 = (x + 1)^2
        assert_eq!(
            FieldState::new(0b101u8),
            Err(ModulusError::NotIrreducible(0b101))
        );
        // x^8 + x^4 + x + 1 has the root 1
        assert_eq!(
            FieldState::new(0x113u16),
            Err(ModulusError::NotIrreducible(0x113))
        );
        assert!(FieldState::new(0b11111u8).is_ok());
        assert!(FieldState::new(0x11bu16).is_ok());
    }

    #[test]
    fn same_field_check() {
        let a = FieldState::new(0b1011u8).unwrap();
        let b = FieldState::new(0b1101u8).unwrap();
        assert!(a.check_same(&a).is_ok());
        assert_eq!(
            a.check_same(&b),
            Err(GfError::CrossField {
                lhs: 0b1011,
                rhs: 0b1101,
            })
        );
    }

    #[test]
    fn reduce_and_contains() {
        let s = FieldState::new(0b1011u8).unwrap();
        assert_eq!(s.reduce(9), 2);
        assert!(s.contains(7));
        assert!(!s.contains(8));
    }

    #[test]
    fn formatting() {
        let s = FieldState::new(0b1011u8).unwrap();
        assert_eq!(format!("{}", s), "x^3+x+1");
        assert_eq!(format!("{:?}", s), "GF(2^3) mod 0b1011");
    }
}
