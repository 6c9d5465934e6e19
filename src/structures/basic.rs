use core::fmt;
use core::marker::PhantomData;
use core::ops::Mul;

use crate::algebra::field::BinaryField;
use crate::algebra::params::FieldParams;
use crate::error::{GfError, ModulusError};
use crate::structures::state::FieldState;
use crate::utils::{inverse_mod, mul_mod, pack_coeffs, pow_mod};
use crate::word::Word;

/// Element of GF(2^n) in direct polynomial form, with the field chosen at
/// runtime.
///
/// The element carries its [`FieldState`]. Multiplication is a shift-and-add
/// over the bits of one operand with on-the-fly reduction, inversion is
/// `a^(2^n - 2)`. No table is involved, so this is the baseline every other
/// representation is checked against.
///
/// Operators panic when the operands belong to different fields and on
/// division by zero; the [`BinaryField`] `try_*` methods return the error
/// instead.
///
/// # Example
///
/// ```
/// use gf2n::{BasicElem, BinaryField};
///
/// let a = BasicElem::new(3u8, 0b1011).unwrap(); // x + 1 in GF(8)
/// let b = BasicElem::new(4u8, 0b1011).unwrap(); // x^2
///
/// assert_eq!((a + b).value(), 7);
/// assert_eq!((a * a).value(), 5);
/// assert_eq!(a.to_string(), "x+1");
///
/// let other = BasicElem::new(3u8, 0b1101).unwrap();
/// assert!(a.try_add(&other).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BasicElem<T: Word> {
    value: T,
    state: FieldState<T>,
}

impl<T: Word> BasicElem<T> {
    /// Create an element of the field defined by `modulus`, reducing `value`.
    ///
    /// # Errors
    ///
    /// Returns `ModulusError::Degenerate` or `ModulusError::NotIrreducible`
    /// if the modulus does not define a field.
    pub fn new(value: T, modulus: T) -> Result<Self, ModulusError> {
        Ok(Self::with_state(value, FieldState::new(modulus)?))
    }

    /// Create an element of an existing field, reducing `value`.
    #[inline]
    pub fn with_state(value: T, state: FieldState<T>) -> Self {
        Self::from_u64(value.to_u64(), state)
    }

    /// Create an element from any raw value, reducing it.
    #[inline]
    pub fn from_u64(raw: u64, state: FieldState<T>) -> Self {
        Self {
            value: state.reduce(raw),
            state,
        }
    }

    /// Wrap a value that is already reduced.
    ///
    /// Skips the reduction; the caller guarantees `value < 2^n`.
    #[inline]
    pub const fn from_raw(value: T, state: FieldState<T>) -> Self {
        Self { value, state }
    }

    /// Create an element from coefficients given highest power first.
    ///
    /// The coefficient at index `k` of an `n`-long sequence is the
    /// coefficient of `x^(n-1-k)`. The result is reduced.
    ///
    /// # Errors
    ///
    /// Returns `ModulusError::Degenerate` or `ModulusError::NotIrreducible`
    /// if the modulus does not define a field.
    ///
    /// # Example
    ///
    /// ```
    /// use gf2n::{BasicElem, BinaryField};
    ///
    /// // x^2 + 1
    /// let a = BasicElem::from_coeffs([1u8, 0, 1], 0b1011u8).unwrap();
    /// assert_eq!(a.value(), 0b101);
    /// ```
    pub fn from_coeffs<I>(coeffs: I, modulus: T) -> Result<Self, ModulusError>
    where
        I: IntoIterator,
        I::Item: Into<u64>,
    {
        let state = FieldState::new(modulus)?;
        Ok(Self::from_u64(pack_coeffs(coeffs), state))
    }

    #[inline]
    pub fn zero(state: FieldState<T>) -> Self {
        Self::from_raw(T::ZERO, state)
    }

    #[inline]
    pub fn one(state: FieldState<T>) -> Self {
        Self::from_raw(T::ONE, state)
    }

    /// The zero element of the field `self` belongs to.
    #[inline]
    pub fn zero_like(&self) -> Self {
        Self::zero(self.state)
    }

    /// The unit element of the field `self` belongs to.
    #[inline]
    pub fn one_like(&self) -> Self {
        Self::one(self.state)
    }

    #[inline]
    pub const fn value(&self) -> T {
        self.value
    }

    #[inline]
    pub const fn state(&self) -> FieldState<T> {
        self.state
    }

    /// Mutable access to the stored value.
    ///
    /// Writing a value `>= 2^n` breaks the reduced invariant until
    /// [`reduce`](Self::reduce) is called.
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Restore the reduced invariant after a direct mutation and return the
    /// new value.
    #[inline]
    pub fn reduce(&mut self) -> T {
        self.value = self.state.reduce(self.value.to_u64());
        self.value
    }

    #[inline]
    fn modulus_u64(&self) -> u64 {
        self.state.modulus().to_u64()
    }

    /// Draw a uniformly random element of the field.
    #[cfg(feature = "rand")]
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R, state: FieldState<T>) -> Self {
        Self::from_u64(rng.gen_range(0..state.order()), state)
    }
}

impl<T: Word> BinaryField for BasicElem<T> {
    type Word = T;

    #[inline]
    fn value(&self) -> T {
        self.value
    }

    #[inline]
    fn state(&self) -> FieldState<T> {
        self.state
    }

    #[inline]
    fn try_add(&self, rhs: &Self) -> Result<Self, GfError> {
        self.check_same_field(rhs)?;
        Ok(Self::from_raw(self.value ^ rhs.value, self.state))
    }

    fn try_mul(&self, rhs: &Self) -> Result<Self, GfError> {
        self.check_same_field(rhs)?;
        let product = mul_mod(
            self.value.to_u64(),
            rhs.value.to_u64(),
            self.modulus_u64(),
            self.state.degree(),
        );
        Ok(Self::from_raw(T::from_u64_truncate(product), self.state))
    }

    fn try_div(&self, rhs: &Self) -> Result<Self, GfError> {
        self.check_same_field(rhs)?;
        let inv = rhs.inverse().ok_or(GfError::DivisionByZero)?;
        self.try_mul(&inv)
    }

    fn inverse(&self) -> Option<Self> {
        inverse_mod(self.value.to_u64(), self.modulus_u64(), self.state.degree())
            .map(|v| Self::from_raw(T::from_u64_truncate(v), self.state))
    }

    fn pow(&self, exp: u64) -> Self {
        let v = pow_mod(
            self.value.to_u64(),
            exp,
            self.modulus_u64(),
            self.state.degree(),
        );
        Self::from_raw(T::from_u64_truncate(v), self.state)
    }
}

impl_runtime_ops!(BasicElem);

impl<T: Word> fmt::Debug for BasicElem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BasicElem({:#b} in {:?})", self.value, self.state)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct ElemRepr {
    value: u64,
    modulus: u64,
}

/// Serialized as `{ "value": .., "modulus": .. }` so an element can be
/// restored without any context.
#[cfg(feature = "serde")]
impl<T: Word> serde::Serialize for BasicElem<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let repr = ElemRepr {
            value: self.value.to_u64(),
            modulus: self.modulus_u64(),
        };
        serde::Serialize::serialize(&repr, serializer)
    }
}

/// The modulus is validated and the value reduced, so a deserialized element
/// always satisfies the field invariants.
#[cfg(feature = "serde")]
impl<'de, T: Word> serde::Deserialize<'de> for BasicElem<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let repr = <ElemRepr as serde::Deserialize>::deserialize(deserializer)?;
        let modulus = T::try_from_u64(repr.modulus).ok_or_else(|| {
            D::Error::custom(ModulusError::ValueTooWide {
                value: repr.modulus,
                bits: T::BITS,
            })
        })?;
        let state = FieldState::new(modulus).map_err(D::Error::custom)?;
        Ok(Self::from_u64(repr.value, state))
    }
}

/// Element of GF(2^n) in direct polynomial form, with the field fixed at
/// compile time by `P`.
///
/// Same algorithms as [`BasicElem`], but the element is a bare word and
/// operators cannot fail except for division by zero.
///
/// # Example
///
/// ```
/// use gf2n::{binary_field, BasicPoly};
///
/// binary_field! {
///     pub struct Gf8(u8 = 0b1011);
/// }
///
/// let a = BasicPoly::<Gf8>::new(7);
/// let b = BasicPoly::<Gf8>::new(4);
/// assert_eq!(a * b, BasicPoly::ONE);
/// assert_eq!(BasicPoly::<Gf8>::new(42).value(), 6);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasicPoly<P: FieldParams> {
    value: P::Word,
    _params: PhantomData<P>,
}

impl_fixed_elem!(BasicPoly);

impl<P: FieldParams> BasicPoly<P> {
    /// Division, `None` if `rhs` is zero.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        Some(self * rhs.inverse()?)
    }

    /// Multiplicative inverse, `None` for zero.
    #[inline]
    pub fn inverse(self) -> Option<Self> {
        inverse_mod(self.value.to_u64(), P::MODULUS.to_u64(), P::DEGREE)
            .map(|v| Self::from_raw(P::Word::from_u64_truncate(v)))
    }

    /// `self^exp` by square-and-multiply, with `0^0 = 1`.
    #[inline]
    pub fn pow(self, exp: u64) -> Self {
        let v = pow_mod(self.value.to_u64(), exp, P::MODULUS.to_u64(), P::DEGREE);
        Self::from_raw(P::Word::from_u64_truncate(v))
    }
}

impl<P: FieldParams> Mul for BasicPoly<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let v = mul_mod(
            self.value.to_u64(),
            rhs.value.to_u64(),
            P::MODULUS.to_u64(),
            P::DEGREE,
        );
        Self::from_raw(P::Word::from_u64_truncate(v))
    }
}

impl<P: FieldParams> From<BasicPoly<P>> for BasicElem<P::Word> {
    fn from(a: BasicPoly<P>) -> Self {
        BasicElem::from_raw(a.value, P::state())
    }
}

#[cfg(feature = "subtle")]
impl<P: FieldParams> BasicPoly<P>
where
    P::Word: subtle::ConditionallySelectable,
{
    /// Constant-time exponentiation.
    ///
    /// Always performs 64 squarings and 64 multiplications regardless of
    /// `exp`. Requires the `subtle` feature.
    pub fn pow_ct(self, exp: u64) -> Self {
        use subtle::{Choice, ConditionallySelectable};

        let mut base = self;
        let mut result = Self::ONE;
        for i in 0..64 {
            let bit = Choice::from(((exp >> i) & 1) as u8);
            result = Self::conditional_select(&result, &(result * base), bit);
            base = base * base;
        }
        result
    }
}
