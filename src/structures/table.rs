use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::ops::Mul;
use std::sync::Arc;

use crate::algebra::field::BinaryField;
use crate::algebra::params::FieldParams;
use crate::error::GfError;
use crate::structures::basic::{BasicElem, BasicPoly};
use crate::structures::lut::FullTables;
use crate::structures::pow::PowPoly;
use crate::structures::state::FieldState;
use crate::utils::pack_coeffs;
use crate::word::Word;

/// Element of GF(2^n) backed by full multiplication and division tables,
/// with the field chosen at runtime.
///
/// Products and quotients are a single array lookup. The tables take
/// `2 * order²` words, so this representation only suits small fields.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use gf2n::{BinaryField, FullTables, TableElem};
///
/// let tables = Arc::new(FullTables::build(0b1011u8).unwrap());
/// let a = TableElem::new(7, Arc::clone(&tables));
/// let b = TableElem::new(4, tables);
///
/// assert!((&a * &b).is_one());
/// assert_eq!((&a / &b).value(), 3);
/// ```
#[derive(Clone)]
pub struct TableElem<T: Word> {
    base: BasicElem<T>,
    tables: Arc<FullTables<T>>,
}

impl<T: Word> TableElem<T> {
    /// Create an element of the field of `tables`, reducing `value`.
    pub fn new(value: T, tables: Arc<FullTables<T>>) -> Self {
        let base = BasicElem::with_state(value, *tables.state());
        Self { base, tables }
    }

    /// Attach full tables to a direct-form element.
    ///
    /// # Errors
    ///
    /// Returns `GfError::CrossField` if the tables belong to another field.
    pub fn from_basic(base: BasicElem<T>, tables: Arc<FullTables<T>>) -> Result<Self, GfError> {
        base.state().check_same(tables.state())?;
        Ok(Self { base, tables })
    }

    /// Wrap an already reduced value without reducing it again.
    pub fn from_raw(value: T, tables: Arc<FullTables<T>>) -> Self {
        let base = BasicElem::from_raw(value, *tables.state());
        Self { base, tables }
    }

    /// Create an element from coefficients given highest power first.
    ///
    /// See [`BasicElem::from_coeffs`] for the bit order.
    pub fn from_coeffs<I>(coeffs: I, tables: Arc<FullTables<T>>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<u64>,
    {
        let base = BasicElem::from_u64(pack_coeffs(coeffs), *tables.state());
        Self { base, tables }
    }

    #[inline]
    pub fn to_basic(&self) -> BasicElem<T> {
        self.base
    }

    #[inline]
    pub fn tables(&self) -> &Arc<FullTables<T>> {
        &self.tables
    }

    #[inline]
    pub fn value(&self) -> T {
        self.base.value()
    }

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
            tables: Arc::clone(&self.tables),
        }
    }
}

impl<T: Word> BinaryField for TableElem<T> {
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
        Ok(self.with_value(self.tables.mul(self.value(), rhs.value())))
    }

    #[inline]
    fn try_div(&self, rhs: &Self) -> Result<Self, GfError> {
        self.check_same_field(rhs)?;
        let q = self
            .tables
            .div(self.value(), rhs.value())
            .ok_or(GfError::DivisionByZero)?;
        Ok(self.with_value(q))
    }

    #[inline]
    fn inverse(&self) -> Option<Self> {
        self.tables.inverse(self.value()).map(|v| self.with_value(v))
    }

    /// Square-and-multiply over table products.
    fn pow(&self, exp: u64) -> Self {
        let mut result = T::ONE;
        let mut base = self.value();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = self.tables.mul(result, base);
            }
            base = self.tables.mul(base, base);
            e >>= 1;
        }
        self.with_value(result)
    }
}

impl_runtime_ops!(TableElem);

impl<T: Word> PartialEq for TableElem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
    }
}

impl<T: Word> Eq for TableElem<T> {}

impl<T: Word> Hash for TableElem<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
    }
}

impl<T: Word> fmt::Debug for TableElem<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableElem({:#b} in {:?})", self.value(), self.base.state())
    }
}

impl<T: Word> From<TableElem<T>> for BasicElem<T> {
    fn from(a: TableElem<T>) -> Self {
        a.base
    }
}

/// Serialized like the underlying [`BasicElem`]; tables are never
/// serialized.
#[cfg(feature = "serde")]
impl<T: Word> serde::Serialize for TableElem<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.base, serializer)
    }
}

/// Element of GF(2^n) backed by the full tables of the fixed field `P`.
///
/// The tables are built on first use; a field above
/// [`MAX_FULL_TABLE_DEGREE`](crate::MAX_FULL_TABLE_DEGREE) panics at that
/// point.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TablePoly<P: FieldParams> {
    value: P::Word,
    _params: PhantomData<P>,
}

impl_fixed_elem!(TablePoly);

impl<P: FieldParams> TablePoly<P> {
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        P::full_tables()
            .div(self.value, rhs.value)
            .map(Self::from_raw)
    }

    #[inline]
    pub fn inverse(self) -> Option<Self> {
        P::full_tables().inverse(self.value).map(Self::from_raw)
    }

    pub fn pow(self, exp: u64) -> Self {
        let mut result = Self::ONE;
        let mut base = self;
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result * base;
            }
            base = base * base;
            e >>= 1;
        }
        result
    }
}

impl<P: FieldParams> Mul for TablePoly<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(P::full_tables().mul(self.value, rhs.value))
    }
}

impl<P: FieldParams> From<BasicPoly<P>> for TablePoly<P> {
    fn from(a: BasicPoly<P>) -> Self {
        Self::from_raw(a.value())
    }
}

impl<P: FieldParams> From<TablePoly<P>> for BasicPoly<P> {
    fn from(a: TablePoly<P>) -> Self {
        Self::from_raw(a.value)
    }
}

impl<P: FieldParams> From<PowPoly<P>> for TablePoly<P> {
    fn from(a: PowPoly<P>) -> Self {
        Self::from_raw(a.value())
    }
}

impl<P: FieldParams> From<TablePoly<P>> for PowPoly<P> {
    fn from(a: TablePoly<P>) -> Self {
        Self::from_raw(a.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary_field;

    const M: u8 = 0b1011;

    binary_field! {
        struct Gf8(u8 = 0b1011);
    }

    binary_field! {
        struct Gf16(u8 = 0b10011);
    }

    fn tables() -> Arc<FullTables<u8>> {
        Arc::new(FullTables::build(M).unwrap())
    }

    #[test]
    fn scenarios() {
        let t = tables();
        let el = |v| TableElem::new(v, Arc::clone(&t));
        assert_eq!((&el(4) + &el(3)).value(), 7);
        assert_eq!((&el(3) * &el(3)).value(), 5);
        assert_eq!((&el(5) * &el(3)).value(), 4);
        assert_eq!((&el(2) / &el(6)).value(), 6);
        assert_eq!((&el(4) / &el(8)).value(), 5);
        assert_eq!(el(15).pow(3).value(), 5);
        assert_eq!(el(42).pow(7).value(), 1);
        assert_eq!(el(4).try_div(&el(0)), Err(GfError::DivisionByZero));
    }

    #[test]
    fn three_representations_agree_on_three_times_five() {
        let t = tables();
        let basic = BasicPoly::<Gf8>::new(3) * BasicPoly::new(5);
        let pow = PowPoly::<Gf8>::new(3) * PowPoly::new(5);
        let table = TablePoly::<Gf8>::new(3) * TablePoly::new(5);
        let runtime = &TableElem::new(3, Arc::clone(&t)) * &TableElem::new(5, t);
        assert_eq!(basic.value(), 4);
        assert_eq!(pow.value(), 4);
        assert_eq!(table.value(), 4);
        assert_eq!(runtime.value(), 4);
        assert_eq!(TablePoly::from(pow), table);
        assert_eq!(PowPoly::from(table), pow);
    }

    #[test]
    fn fixed_agrees_with_basic() {
        for x in 0..16u8 {
            for y in 0..16u8 {
                let (bx, by) = (BasicPoly::<Gf16>::new(x), BasicPoly::<Gf16>::new(y));
                let (tx, ty) = (TablePoly::<Gf16>::from(bx), TablePoly::<Gf16>::from(by));
                assert_eq!(BasicPoly::from(tx * ty), bx * by);
                assert_eq!(tx.checked_div(ty).map(BasicPoly::from), bx.checked_div(by));
            }
            let b = BasicPoly::<Gf16>::new(x);
            assert_eq!(TablePoly::<Gf16>::new(x).pow(11).value(), b.pow(11).value());
        }
    }

    #[test]
    fn coefficient_construction() {
        let t = tables();
        // x^2 + 1
        let a = TableElem::from_coeffs([1u8, 0, 1], Arc::clone(&t));
        assert_eq!(a.value(), 0b101);
        // x^4 + x^2 reduces to x
        let b = TableElem::from_coeffs([true, false, true, false, false], t);
        assert_eq!(b.value(), 0b010);
        assert_eq!((&a * &b).value(), 0b001);
    }

    #[test]
    fn reducible_modulus_has_no_tables() {
        assert_eq!(
            FullTables::build(0b101u8).unwrap_err(),
            crate::ModulusError::NotIrreducible(0b101)
        );
    }

    #[test]
    fn cross_field_and_mismatched_tables() {
        let a = TableElem::new(3, tables());
        let b = TableElem::new(3, Arc::new(FullTables::build(0b1101u8).unwrap()));
        assert!(matches!(a.try_add(&b), Err(GfError::CrossField { .. })));
        let foreign = BasicElem::new(1u8, 0b1101).unwrap();
        assert!(TableElem::from_basic(foreign, tables()).is_err());
    }

    #[test]
    fn inverse_and_identity() {
        let t = tables();
        for v in 1..8 {
            let a = TableElem::new(v, Arc::clone(&t));
            let inv = a.inverse().unwrap();
            assert!((&a * &inv).is_one());
            assert_eq!(&a * &a.one_like(), a);
        }
        assert_eq!(TableElem::new(0, t).inverse(), None);
        assert_eq!(TablePoly::<Gf8>::ZERO.inverse(), None);
    }
}
