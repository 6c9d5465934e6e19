use core::cmp::Ordering;
use core::fmt;

use crate::error::GfError;
use crate::structures::state::FieldState;
use crate::utils::lead_bit_position;
use crate::word::Word;

/// An element of a binary field GF(2^n).
///
/// Implemented by every representation: the direct polynomial form, the
/// log-table form and the full-table form, each in a fixed-modulus and a
/// runtime-modulus flavour. All of them agree on the results of every
/// operation; they only differ in speed and memory.
///
/// Binary operations are fallible because runtime-modulus operands may
/// belong to different fields. Fixed-modulus types never return
/// `GfError::CrossField`.
pub trait BinaryField: Sized + Clone + PartialEq + fmt::Debug + fmt::Display {
    /// Word holding the packed coefficients.
    type Word: Word;

    /// The reduced value, bit `i` being the coefficient of `x^i`.
    fn value(&self) -> Self::Word;

    /// Descriptor of the field this element lives in.
    fn state(&self) -> FieldState<Self::Word>;

    /// `n` for GF(2^n).
    #[inline]
    fn gf_degree(&self) -> u32 {
        self.state().degree()
    }

    /// `2^n` for GF(2^n).
    #[inline]
    fn gf_order(&self) -> u64 {
        self.state().order()
    }

    #[inline]
    fn modulus(&self) -> Self::Word {
        self.state().modulus()
    }

    /// Degree of the element as a polynomial, `None` for zero.
    #[inline]
    fn degree(&self) -> Option<u32> {
        self.degree_from(1)
    }

    /// Degree of the element ignoring its top `start - 1` bits of word width.
    #[inline]
    fn degree_from(&self, start: u32) -> Option<u32> {
        lead_bit_position(self.value().to_u64(), start, Self::Word::BITS)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.value() == Self::Word::ZERO
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.value() == Self::Word::ONE
    }

    /// Ensure `other` belongs to the same field as `self`.
    #[inline]
    fn check_same_field(&self, other: &Self) -> Result<(), GfError> {
        self.state().check_same(&other.state())
    }

    /// Field addition (XOR of the coefficients).
    fn try_add(&self, rhs: &Self) -> Result<Self, GfError>;

    /// Subtraction, identical to addition in characteristic 2.
    #[inline]
    fn try_sub(&self, rhs: &Self) -> Result<Self, GfError> {
        self.try_add(rhs)
    }

    fn try_mul(&self, rhs: &Self) -> Result<Self, GfError>;

    /// Field division.
    ///
    /// Returns `GfError::DivisionByZero` if `rhs` is zero.
    fn try_div(&self, rhs: &Self) -> Result<Self, GfError>;

    /// Multiplicative inverse, `None` for zero.
    fn inverse(&self) -> Option<Self>;

    /// Replace `self` by its inverse in place.
    ///
    /// Returns `GfError::DivisionByZero` and leaves `self` untouched if it
    /// is zero.
    fn invert(&mut self) -> Result<(), GfError> {
        *self = self.inverse().ok_or(GfError::DivisionByZero)?;
        Ok(())
    }

    /// `self^exp`, with `0^0 = 1`.
    fn pow(&self, exp: u64) -> Self;

    /// Compare the raw values of two elements of the same field.
    #[inline]
    fn try_cmp(&self, rhs: &Self) -> Result<Ordering, GfError> {
        self.check_same_field(rhs)?;
        Ok(self.value().cmp(&rhs.value()))
    }
}
