//! Concrete field element representations and their supporting tables.
//!
//! Each representation comes in two families:
//! - fixed modulus (`BasicPoly`, `PowPoly`, `TablePoly`): the field is a type
//!   parameter declared with [`binary_field!`](crate::binary_field)
//! - runtime modulus (`BasicElem`, `PowElem`, `TableElem`): the field state
//!   travels with each element, tables are shared through `Arc`

use core::fmt;

/// Unwrap the result of an operator, panicking with the error message.
///
/// Used by the `std::ops` impls, which cannot return errors; the fallible
/// `try_*` methods of [`BinaryField`](crate::BinaryField) are the
/// non-panicking path.
#[inline]
#[track_caller]
pub(crate) fn expect_ok<V, E: fmt::Display>(result: Result<V, E>) -> V {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

/// Inherent constructors, accessors, additive operators and formatting
/// shared by the fixed-modulus element types.
///
/// The type must have fields `value: P::Word` and `_params: PhantomData<P>`
/// and inherent `checked_div`, `inverse` and `pow` methods, plus a `Mul` impl.
macro_rules! impl_fixed_elem {
    ($ty:ident) => {
        impl<P: $crate::FieldParams> $ty<P> {
            pub const ZERO: Self = Self::from_raw(<P::Word as $crate::Word>::ZERO);
            pub const ONE: Self = Self::from_raw(<P::Word as $crate::Word>::ONE);

            /// Create an element, reducing `value` by the field modulus.
            #[inline]
            pub fn new(value: P::Word) -> Self {
                Self::from_u64($crate::Word::to_u64(value))
            }

            /// Create an element from any raw value, reducing it.
            #[inline]
            pub fn from_u64(raw: u64) -> Self {
                Self::from_raw(<P::Word as $crate::Word>::from_u64_truncate(
                    $crate::utils::reduce(raw, $crate::Word::to_u64(P::MODULUS)),
                ))
            }

            /// Wrap a value without reducing it.
            ///
            /// The caller guarantees `value < 2^n`.
            #[inline]
            pub const fn from_raw(value: P::Word) -> Self {
                Self {
                    value,
                    _params: core::marker::PhantomData,
                }
            }

            /// Create an element from coefficients given highest power first.
            ///
            /// The coefficient at index `k` of an `n`-long sequence is the
            /// coefficient of `x^(n-1-k)`. The result is reduced.
            pub fn from_coeffs<I>(coeffs: I) -> Self
            where
                I: IntoIterator,
                I::Item: Into<u64>,
            {
                Self::from_u64($crate::utils::pack_coeffs(coeffs))
            }

            #[inline]
            pub const fn value(self) -> P::Word {
                self.value
            }

            /// Mutable access to the stored value.
            ///
            /// Writing a value `>= 2^n` breaks the reduced invariant until
            /// [`reduce`](Self::reduce) is called.
            #[inline]
            pub fn value_mut(&mut self) -> &mut P::Word {
                &mut self.value
            }

            /// Restore the reduced invariant after a direct mutation.
            #[inline]
            pub fn reduce(&mut self) -> P::Word {
                self.value = Self::from_u64($crate::Word::to_u64(self.value)).value;
                self.value
            }

            #[inline]
            pub fn is_zero(self) -> bool {
                self.value == <P::Word as $crate::Word>::ZERO
            }
        }

        impl<P: $crate::FieldParams> core::ops::Add for $ty<P> {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                Self::from_raw(self.value ^ rhs.value)
            }
        }

        impl<P: $crate::FieldParams> core::ops::Sub for $ty<P> {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                self + rhs
            }
        }

        impl<P: $crate::FieldParams> core::ops::Neg for $ty<P> {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                self
            }
        }

        impl<P: $crate::FieldParams> core::ops::Div for $ty<P> {
            type Output = Self;

            #[inline]
            #[track_caller]
            fn div(self, rhs: Self) -> Self {
                self.checked_div(rhs).expect("division by zero")
            }
        }

        impl<P: $crate::FieldParams> core::ops::AddAssign for $ty<P> {
            #[inline]
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl<P: $crate::FieldParams> core::ops::SubAssign for $ty<P> {
            #[inline]
            fn sub_assign(&mut self, rhs: Self) {
                *self = *self - rhs;
            }
        }

        impl<P: $crate::FieldParams> core::ops::MulAssign for $ty<P> {
            #[inline]
            fn mul_assign(&mut self, rhs: Self) {
                *self = *self * rhs;
            }
        }

        impl<P: $crate::FieldParams> core::ops::DivAssign for $ty<P> {
            #[inline]
            #[track_caller]
            fn div_assign(&mut self, rhs: Self) {
                *self = *self / rhs;
            }
        }

        impl<P: $crate::FieldParams> core::fmt::Debug for $ty<P> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}({:#b})", stringify!($ty), self.value)
            }
        }

        impl<P: $crate::FieldParams> core::fmt::Display for $ty<P> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                $crate::utils::write_poly(f, $crate::Word::to_u64(self.value))
            }
        }

        impl<P: $crate::FieldParams> $crate::BinaryField for $ty<P> {
            type Word = P::Word;

            #[inline]
            fn value(&self) -> P::Word {
                self.value
            }

            #[inline]
            fn state(&self) -> $crate::FieldState<P::Word> {
                P::state()
            }

            #[inline]
            fn try_add(&self, rhs: &Self) -> Result<Self, $crate::GfError> {
                Ok(*self + *rhs)
            }

            #[inline]
            fn try_mul(&self, rhs: &Self) -> Result<Self, $crate::GfError> {
                Ok(*self * *rhs)
            }

            #[inline]
            fn try_div(&self, rhs: &Self) -> Result<Self, $crate::GfError> {
                $ty::checked_div(*self, *rhs).ok_or($crate::GfError::DivisionByZero)
            }

            #[inline]
            fn inverse(&self) -> Option<Self> {
                $ty::inverse(*self)
            }

            #[inline]
            fn pow(&self, exp: u64) -> Self {
                $ty::pow(*self, exp)
            }
        }

        #[cfg(feature = "rand")]
        impl<P: $crate::FieldParams> rand::distributions::Distribution<$ty<P>>
            for rand::distributions::Standard
        {
            fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> $ty<P> {
                $ty::from_u64(rng.gen_range(0..P::ORDER))
            }
        }

        #[cfg(feature = "subtle")]
        impl<P: $crate::FieldParams> subtle::ConstantTimeEq for $ty<P>
        where
            P::Word: subtle::ConstantTimeEq,
        {
            fn ct_eq(&self, other: &Self) -> subtle::Choice {
                subtle::ConstantTimeEq::ct_eq(&self.value, &other.value)
            }
        }

        #[cfg(feature = "subtle")]
        impl<P: $crate::FieldParams> subtle::ConditionallySelectable for $ty<P>
        where
            P::Word: subtle::ConditionallySelectable,
        {
            fn conditional_select(a: &Self, b: &Self, choice: subtle::Choice) -> Self {
                Self::from_raw(<P::Word as subtle::ConditionallySelectable>::conditional_select(
                    &a.value, &b.value, choice,
                ))
            }
        }

        /// Serialized as the bare value; the field is part of the type.
        #[cfg(feature = "serde")]
        impl<P: $crate::FieldParams> serde::Serialize for $ty<P> {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_u64($crate::Word::to_u64(self.value))
            }
        }

        /// Deserialized values are reduced into the field.
        #[cfg(feature = "serde")]
        impl<'de, P: $crate::FieldParams> serde::Deserialize<'de> for $ty<P> {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let value = <u64 as serde::Deserialize>::deserialize(deserializer)?;
                Ok(Self::from_u64(value))
            }
        }

        impl<P: $crate::FieldParams> Default for $ty<P> {
            fn default() -> Self {
                Self::ZERO
            }
        }
    };
}

/// Operators, ordering and formatting shared by the runtime-modulus element
/// types, implemented on top of their [`BinaryField`](crate::BinaryField)
/// impl.
///
/// Operators panic on cross-field operands and on division by zero.
macro_rules! impl_runtime_ops {
    ($ty:ident) => {
        impl<T: $crate::Word> core::ops::Add for &$ty<T> {
            type Output = $ty<T>;

            #[track_caller]
            fn add(self, rhs: Self) -> $ty<T> {
                $crate::structures::expect_ok($crate::BinaryField::try_add(self, rhs))
            }
        }

        impl<T: $crate::Word> core::ops::Sub for &$ty<T> {
            type Output = $ty<T>;

            #[track_caller]
            fn sub(self, rhs: Self) -> $ty<T> {
                $crate::structures::expect_ok($crate::BinaryField::try_sub(self, rhs))
            }
        }

        impl<T: $crate::Word> core::ops::Mul for &$ty<T> {
            type Output = $ty<T>;

            #[track_caller]
            fn mul(self, rhs: Self) -> $ty<T> {
                $crate::structures::expect_ok($crate::BinaryField::try_mul(self, rhs))
            }
        }

        impl<T: $crate::Word> core::ops::Div for &$ty<T> {
            type Output = $ty<T>;

            #[track_caller]
            fn div(self, rhs: Self) -> $ty<T> {
                $crate::structures::expect_ok($crate::BinaryField::try_div(self, rhs))
            }
        }

        impl<T: $crate::Word> core::ops::Add for $ty<T> {
            type Output = Self;

            #[track_caller]
            fn add(self, rhs: Self) -> Self {
                &self + &rhs
            }
        }

        impl<T: $crate::Word> core::ops::Sub for $ty<T> {
            type Output = Self;

            #[track_caller]
            fn sub(self, rhs: Self) -> Self {
                &self - &rhs
            }
        }

        impl<T: $crate::Word> core::ops::Mul for $ty<T> {
            type Output = Self;

            #[track_caller]
            fn mul(self, rhs: Self) -> Self {
                &self * &rhs
            }
        }

        impl<T: $crate::Word> core::ops::Div for $ty<T> {
            type Output = Self;

            #[track_caller]
            fn div(self, rhs: Self) -> Self {
                &self / &rhs
            }
        }

        impl<T: $crate::Word> core::ops::Neg for $ty<T> {
            type Output = Self;

            fn neg(self) -> Self {
                self
            }
        }

        impl<T: $crate::Word> core::ops::AddAssign<&$ty<T>> for $ty<T> {
            #[track_caller]
            fn add_assign(&mut self, rhs: &Self) {
                *self = &*self + rhs;
            }
        }

        impl<T: $crate::Word> core::ops::SubAssign<&$ty<T>> for $ty<T> {
            #[track_caller]
            fn sub_assign(&mut self, rhs: &Self) {
                *self = &*self - rhs;
            }
        }

        impl<T: $crate::Word> core::ops::MulAssign<&$ty<T>> for $ty<T> {
            #[track_caller]
            fn mul_assign(&mut self, rhs: &Self) {
                *self = &*self * rhs;
            }
        }

        impl<T: $crate::Word> core::ops::DivAssign<&$ty<T>> for $ty<T> {
            #[track_caller]
            fn div_assign(&mut self, rhs: &Self) {
                *self = &*self / rhs;
            }
        }

        /// Elements of different fields are unordered.
        impl<T: $crate::Word> PartialOrd for $ty<T> {
            fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
                $crate::BinaryField::try_cmp(self, other).ok()
            }
        }

        impl<T: $crate::Word> core::fmt::Display for $ty<T> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                $crate::utils::write_poly(f, $crate::Word::to_u64($crate::BinaryField::value(self)))
            }
        }
    };
}

pub mod basic;
pub mod lut;
pub mod matrix;
pub mod pow;
pub mod registry;
pub mod state;
pub mod table;
