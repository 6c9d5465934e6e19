use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::Mul;
use std::sync::Arc;

use crate::algebra::field::BinaryField;
use crate::algebra::params::FieldParams;
use crate::error::GfError;
use crate::structures::basic::{BasicElem, BasicPoly};
use crate::structures::lut::LogTable;
use crate::structures::state::FieldState;
use crate::utils::pack_coeffs;
use crate::word::Word;

/// Element of GF(2^n) backed by discrete-log tables, with the field chosen
/// at runtime.
///
/// Multiplication, division, inversion and exponentiation are O(1) table
/// lookups; addition is still a XOR. The element holds a shared handle to the
/// [`LogTable`] of its field, so the table lives at least as long as any
/// element using it. Get the handle from
/// [`TableRegistry`](crate::TableRegistry) to share one table per field.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gf2n::{BinaryField, LogTable, PowElem};
///
/// let lut = Arc::new(LogTable::build(0b1011u8).unwrap());
/// let a = PowElem::new(3, Arc::clone(&lut));
/// let b = PowElem::new(5, lut);
///
/// assert_eq!((&a * &b).value(), 4);
/// assert_eq!(a.pow(7).value(), 1);
/// ```
#[derive(Clone)]
pub struct PowElem<T: Word> {
    base: BasicElem<T>,
    lut: Arc<LogTable<T>>,
}

impl<T: Word> PowElem<T> {
    /// Create an element of the field of `lut`, reducing `value`.
    pub fn new(value: T, lut: Arc<LogTable<T>>) -> Self {
        let base = BasicElem::with_state(value, *lut.state());
        Self { base, lut }
    }

    /// Attach a log table to a direct-form element.
    ///
    /// # Errors
    ///
    /// Returns `GfError::CrossField` if the table belongs to another field.
    pub fn from_basic(base: BasicElem<T>, lut: Arc<LogTable<T>>) -> Result<Self, GfError> {
        base.state().check_same(lut.state())?;
        Ok(Self { base, lut })
    }

    /// Wrap an already reduced value without reducing it again.
    pub fn from_raw(value: T, lut: Arc<LogTable<T>>) -> Self {
        let base = BasicElem::from_raw(value, *lut.state());
        Self { base, lut }
    }

    /// Create an element from coefficients given highest power first.
    ///
    /// See [`BasicElem::from_coeffs`] for the bit order.
    pub fn from_coeffs<I>(coeffs: I, lut: Arc<LogTable<T>>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<u64>,
    {
        let base = BasicElem::from_u64(pack_coeffs(coeffs), *lut.state());
        Self { base, lut }
    }

    /// Drop the table handle, keeping the value and field.
    #[inline]
    pub fn to_basic(&self) -> BasicElem<T> {
        self.base
    }

    #[inline]
    pub fn lut(&self) -> &Arc<LogTable<T>> {
        &self.lut
    }

    #[inline]
    pub fn value(&self) -> T {
        self.base.value()
    }

    /// Mutable access to the stored value; call [`reduce`](Self::reduce)
    /// after writing an unreduced value.
    #[inline]
    pub fn value_mut(&mut self) -> &mut T {
        self.base.value_mut()
    }

    #[inline]
    pub fn reduce(&mut self) -> T {
        self.base.reduce()
    }

    pub fn zero_like(&self) -> Self {
        self.with_value(T::ZERO)
    }

    pub fn one_like(&self) -> Self {
        self.with_value(T::ONE)
    }

    #[inline]
    fn with_value(&self, value: T) -> Self {
        Self {
            base: BasicElem::from_raw(value, self.base.state()),
            lut: Arc::clone(&self.lut),
        }
    }
}

impl<T: Word> BinaryField for PowElem<T> {
    type Word = T;

    #[inline]
    fn value(&self) -> T {
        self.base.value()
    }

    #[inline]
    fn state(&self) -> FieldState<T> {
        self.base.state()
    }

    #[inline]
    fn try_add(&self, rhs: &Self) -> Result<Self, GfError> {
        self.check_same_field(rhs)?;
        Ok(self.with_value(self.value() ^ rhs.value()))
    }

    #[inline]
    fn try_mul(&self, rhs: &Self) -> Result<Self, GfError> {
        self.check_same_field(rhs)?;
        Ok(self.with_value(self.lut.mul(self.value(), rhs.value())))
    }

    #[inline]
    fn try_div(&self, rhs: &Self) -> Result<Self, GfError> {
        self.check_same_field(rhs)?;
        let q = self
            .lut
            .div(self.value(), rhs.value())
            .ok_or(GfError::DivisionByZero)?;
        Ok(self.with_value(q))
    }

    #[inline]
    fn inverse(&self) -> Option<Self> {
        self.lut.inverse(self.value()).map(|v| self.with_value(v))
    }

    #[inline]
    fn pow(&self, exp: u64) -> Self {
        self.with_value(self.lut.pow(self.value(), exp))
    }
}

impl_runtime_ops!(PowElem);

impl<T: Word> PartialEq for PowElem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<T: Word> Eq for PowElem<T> {}

impl<T: Word> Hash for PowElem<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
    }
}

impl<T: Word> fmt::Debug for PowElem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PowElem({:#b} in {:?})", self.value(), self.base.state())
    }
}

impl<T: Word> From<PowElem<T>> for BasicElem<T> {
    fn from(a: PowElem<T>) -> Self {
        a.base
    }
}

/// Serialized like the underlying [`BasicElem`]. There is no `Deserialize`:
/// rebuild the element with [`PowElem::from_basic`] and a table handle.
#[cfg(feature = "serde")]
impl<T: Word> serde::Serialize for PowElem<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.base, serializer)
    }
}

/// Element of GF(2^n) backed by the discrete-log tables of the fixed field
/// `P`.
///
/// The tables are built on first use and shared by every element of the
/// field. Using this type with a non-primitive modulus panics on the first
/// multiplicative operation; check with
/// [`FieldParams::validate`](crate::FieldParams::validate).
///
/// # Example
///
/// ```
/// use gf2n::{binary_field, PowPoly};
///
/// binary_field! {
///     pub struct Gf256(u16 = 0b1_0001_1101);
/// }
///
/// let a = PowPoly::<Gf256>::new(0x53);
/// assert_eq!(a * a.inverse().unwrap(), PowPoly::ONE);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PowPoly<P: FieldParams> {
    value: P::Word,
    _params: PhantomData<P>,
}

impl_fixed_elem!(PowPoly);

impl<P: FieldParams> PowPoly<P> {
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        P::log_table()
            .div(self.value, rhs.value)
            .map(Self::from_raw)
    }

    #[inline]
    pub fn inverse(self) -> Option<Self> {
        P::log_table().inverse(self.value).map(Self::from_raw)
    }

    /// `self^exp` as one table lookup, with `0^0 = 1`.
    #[inline]
    pub fn pow(self, exp: u64) -> Self {
        Self::from_raw(P::log_table().pow(self.value, exp))
    }

    /// Discrete logarithm to base `x`, `None` for zero.
    #[inline]
    pub fn log(self) -> Option<u32> {
        P::log_table().log(self.value)
    }
}

impl<P: FieldParams> Mul for PowPoly<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(P::log_table().mul(self.value, rhs.value))
    }
}

impl<P: FieldParams> From<BasicPoly<P>> for PowPoly<P> {
    fn from(a: BasicPoly<P>) -> Self {
        Self::from_raw(a.value())
    }
}

impl<P: FieldParams> From<PowPoly<P>> for BasicPoly<P> {
    fn from(a: PowPoly<P>) -> Self {
        Self::from_raw(a.value)
    }
}
