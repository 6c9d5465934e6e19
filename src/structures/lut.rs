//! Precomputed lookup tables for fast multiplication and division.
//!
//! This module provides:
//! - [`LogTable`]: discrete logarithms relative to the primitive element `x`,
//!   O(order) memory, O(1) multiply/divide/power
//! - [`FullTables`]: complete multiplication and division tables,
//!   O(order²) memory, O(1) multiply/divide
//! - Builders for the raw tables, all using the polynomial kernels in
//!   [`crate::utils`] as ground truth
//!
//! Tables are immutable once built. Share them through `Arc` (see
//! [`TableRegistry`](crate::TableRegistry)) or through the statics of a
//! [`binary_field!`](crate::binary_field) type.

use crate::error::ModulusError;
use crate::structures::state::FieldState;
use crate::utils::{inverse_mod, mul_mod};
use crate::word::Word;

/// Largest degree for which a [`LogTable`] is built.
pub const MAX_LOG_TABLE_DEGREE: u32 = 24;

/// Largest degree for which [`FullTables`] are built.
pub const MAX_FULL_TABLE_DEGREE: u32 = 12;

/// The primitive element used for logarithms: the polynomial `x`.
const GENERATOR: u64 = 0b10;

fn check_degree<T: Word>(state: &FieldState<T>, max: u32) -> Result<(), ModulusError> {
    if state.degree() > max {
        return Err(ModulusError::TableTooLarge {
            degree: state.degree(),
            max,
        });
    }
    Ok(())
}

// ============================================================================
// Discrete logarithm tables
// ============================================================================

/// Discrete logarithm tables of a field relative to the generator `x`.
///
/// - `ind_to_pol[i] = x^i` for `i` in `[0, 2 * (order - 1))`; the second
///   half repeats the first so sums of two logarithms need no `% (order - 1)`
/// - `pol_to_ind[v] = log_x(v)` for every non-zero `v`
///
/// Building fails with `ModulusError::NotPrimitive` if `x` does not generate
/// the whole multiplicative group. Irreducible moduli can still be
/// non-primitive, e.g. `x^4 + x^3 + x^2 + x + 1`.
///
/// # Example
///
/// ```
/// use gf2n::{FieldState, LogTable};
///
/// let lut = LogTable::new(FieldState::new(0b1011u8).unwrap()).unwrap();
/// assert_eq!(lut.mul(3, 5), 4);
/// assert_eq!(lut.div(4, 5), Some(3));
/// assert_eq!(lut.log(0), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LogTable<T: Word> {
    state: FieldState<T>,
    ind_to_pol: Vec<T>,
    pol_to_ind: Vec<u32>,
}

impl<T: Word> LogTable<T> {
    /// Build the tables for `state`.
    ///
    /// # Errors
    ///
    /// - `ModulusError::TableTooLarge` if the degree exceeds
    ///   [`MAX_LOG_TABLE_DEGREE`]
    /// - `ModulusError::NotPrimitive` if `x` is not a generator
    pub fn new(state: FieldState<T>) -> Result<Self, ModulusError> {
        check_degree(&state, MAX_LOG_TABLE_DEGREE)?;

        let modulus = state.modulus().to_u64();
        let degree = state.degree();
        let group = (state.order() - 1) as usize;

        let mut ind_to_pol = vec![T::ZERO; group << 1];
        let mut pol_to_ind = vec![u32::MAX; state.order() as usize];

        let x = state.reduce(GENERATOR).to_u64();
        let mut counter = 1u64;
        for i in 0..group {
            if counter == 0 || pol_to_ind[counter as usize] != u32::MAX {
                return Err(ModulusError::NotPrimitive {
                    modulus,
                    order: i as u64,
                });
            }
            ind_to_pol[i] = T::from_u64_truncate(counter);
            pol_to_ind[counter as usize] = i as u32;
            counter = mul_mod(counter, x, modulus, degree);
        }
        pol_to_ind[0] = 0;

        // Repeat the cycle so that log(a) + log(b) indexes directly.
        ind_to_pol.copy_within(0..group, group);

        tracing::debug!(modulus, degree, entries = group << 1, "built log table");

        Ok(Self {
            state,
            ind_to_pol,
            pol_to_ind,
        })
    }

    /// Build the tables for the field defined by `modulus`.
    pub fn build(modulus: T) -> Result<Self, ModulusError> {
        Self::new(FieldState::new(modulus)?)
    }

    pub fn state(&self) -> &FieldState<T> {
        &self.state
    }

    /// Powers of the generator, doubled in length.
    pub fn ind_to_pol(&self) -> &[T] {
        &self.ind_to_pol
    }

    /// Logarithms of every element; the entry for zero is meaningless.
    pub fn pol_to_ind(&self) -> &[u32] {
        &self.pol_to_ind
    }

    #[inline]
    fn group_order(&self) -> u64 {
        self.state.order() - 1
    }

    /// Discrete logarithm of `v` to base `x`, `None` for zero.
    #[inline]
    pub fn log(&self, v: T) -> Option<u32> {
        if v == T::ZERO {
            None
        } else {
            Some(self.pol_to_ind[v.to_usize()])
        }
    }

    /// `x^i`.
    #[inline]
    pub fn exp(&self, i: u64) -> T {
        self.ind_to_pol[(i % self.group_order()) as usize]
    }

    /// Product of two reduced values.
    #[inline]
    pub fn mul(&self, a: T, b: T) -> T {
        if a == T::ZERO || b == T::ZERO {
            return T::ZERO;
        }
        let u = self.pol_to_ind[a.to_usize()] as usize;
        let v = self.pol_to_ind[b.to_usize()] as usize;
        self.ind_to_pol[u + v]
    }

    /// Quotient of two reduced values, `None` if `b` is zero.
    #[inline]
    pub fn div(&self, a: T, b: T) -> Option<T> {
        if b == T::ZERO {
            return None;
        }
        if a == T::ZERO {
            return Some(T::ZERO);
        }
        let mut u = self.pol_to_ind[a.to_usize()] as usize;
        let v = self.pol_to_ind[b.to_usize()] as usize;
        if u < v {
            u += self.group_order() as usize;
        }
        Some(self.ind_to_pol[u - v])
    }

    /// Inverse of a reduced value, `None` for zero.
    #[inline]
    pub fn inverse(&self, a: T) -> Option<T> {
        let u = self.log(a)? as u64;
        Some(self.ind_to_pol[(self.group_order() - u) as usize])
    }

    /// `a^n` as a single table lookup, with `0^0 = 1`.
    #[inline]
    pub fn pow(&self, a: T, n: u64) -> T {
        if a == T::ZERO {
            return if n == 0 { T::ONE } else { T::ZERO };
        }
        let group = self.group_order();
        let u = self.pol_to_ind[a.to_usize()] as u64;
        self.ind_to_pol[((u * (n % group)) % group) as usize]
    }
}

impl<T: Word> core::fmt::Debug for LogTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LogTable")
            .field("state", &self.state)
            .field("entries", &self.ind_to_pol.len())
            .finish()
    }
}

// ============================================================================
// Full multiplication / division tables
// ============================================================================

/// Build the multiplication table of a field: `table[a * order + b] = a * b`.
///
/// Only pairs with `a <= b` are computed; the table is filled symmetrically.
///
/// # Errors
///
/// Returns `ModulusError::TableTooLarge` if the degree exceeds
/// [`MAX_FULL_TABLE_DEGREE`].
pub fn build_mul_table<T: Word>(state: &FieldState<T>) -> Result<Vec<T>, ModulusError> {
    check_degree(state, MAX_FULL_TABLE_DEGREE)?;

    let order = state.order() as usize;
    let modulus = state.modulus().to_u64();
    let mut out = vec![T::ZERO; order * order];

    for i in 0..order {
        for j in i..order {
            let res = T::from_u64_truncate(mul_mod(i as u64, j as u64, modulus, state.degree()));
            out[i * order + j] = res;
            out[j * order + i] = res;
        }
    }

    tracing::debug!(
        modulus,
        degree = state.degree(),
        entries = out.len(),
        "built multiplication table"
    );
    Ok(out)
}

/// Build the division table of a field by brute force:
/// `table[a * order + b] = a / b`.
///
/// Column `b = 0` is left as zero.
///
/// # Errors
///
/// Returns `ModulusError::TableTooLarge` if the degree exceeds
/// [`MAX_FULL_TABLE_DEGREE`].
pub fn build_div_table<T: Word>(state: &FieldState<T>) -> Result<Vec<T>, ModulusError> {
    check_degree(state, MAX_FULL_TABLE_DEGREE)?;

    let order = state.order() as usize;
    let modulus = state.modulus().to_u64();
    let degree = state.degree();
    let mut out = vec![T::ZERO; order * order];

    for b in 1..order {
        let Some(b_inv) = inverse_mod(b as u64, modulus, degree) else {
            continue;
        };
        for a in 0..order {
            out[a * order + b] = T::from_u64_truncate(mul_mod(a as u64, b_inv, modulus, degree));
        }
    }

    tracing::debug!(modulus, degree, entries = out.len(), "built division table");
    Ok(out)
}

/// Derive the division table from a multiplication table.
///
/// `mul[i][j] = k` implies `div[k][j] = i` and `div[k][i] = j`. Column
/// `b = 0` is left as zero, matching [`build_div_table`].
///
/// # Errors
///
/// - `ModulusError::TableTooLarge` if the degree exceeds
///   [`MAX_FULL_TABLE_DEGREE`]
/// - `ModulusError::TableMismatch` if `mul` does not have `order²` entries
pub fn div_table_from_mul<T: Word>(
    mul: &[T],
    state: &FieldState<T>,
) -> Result<Vec<T>, ModulusError> {
    check_degree(state, MAX_FULL_TABLE_DEGREE)?;

    let order = state.order() as usize;
    if mul.len() != order * order {
        return Err(ModulusError::TableMismatch {
            expected: order * order,
            got: mul.len(),
        });
    }

    let mut out = vec![T::ZERO; order * order];
    for i in 1..order {
        for j in i..order {
            let k = mul[i * order + j].to_usize() * order;
            out[k + j] = T::from_u64_truncate(i as u64);
            out[k + i] = T::from_u64_truncate(j as u64);
        }
    }

    tracing::debug!(
        modulus = state.modulus().to_u64(),
        degree = state.degree(),
        entries = out.len(),
        "derived division table"
    );
    Ok(out)
}

/// Complete multiplication and division tables of a field.
///
/// Both tables are flat, row-major `order × order` arrays indexed by the two
/// operand values.
///
/// # Example
///
/// ```
/// use gf2n::{FieldState, FullTables};
///
/// let tables = FullTables::new(FieldState::new(0b1011u8).unwrap()).unwrap();
/// assert_eq!(tables.mul(7, 4), 1);
/// assert_eq!(tables.div(2, 6), Some(6));
/// assert_eq!(tables.div(2, 0), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct FullTables<T: Word> {
    state: FieldState<T>,
    mul: Vec<T>,
    div: Vec<T>,
}

impl<T: Word> FullTables<T> {
    /// Build both tables, deriving division from multiplication.
    pub fn new(state: FieldState<T>) -> Result<Self, ModulusError> {
        let mul = build_mul_table(&state)?;
        let div = div_table_from_mul(&mul, &state)?;
        Ok(Self { state, mul, div })
    }

    /// Build both tables for the field defined by `modulus`.
    pub fn build(modulus: T) -> Result<Self, ModulusError> {
        Self::new(FieldState::new(modulus)?)
    }

    /// Wrap tables built elsewhere.
    ///
    /// # Errors
    ///
    /// Returns `ModulusError::TableMismatch` if either table does not have
    /// `order²` entries.
    pub fn from_tables(
        state: FieldState<T>,
        mul: Vec<T>,
        div: Vec<T>,
    ) -> Result<Self, ModulusError> {
        check_degree(&state, MAX_FULL_TABLE_DEGREE)?;
        let expected = (state.order() * state.order()) as usize;
        for table in [&mul, &div] {
            if table.len() != expected {
                return Err(ModulusError::TableMismatch {
                    expected,
                    got: table.len(),
                });
            }
        }
        Ok(Self { state, mul, div })
    }

    pub fn state(&self) -> &FieldState<T> {
        &self.state
    }

    pub fn mul_table(&self) -> &[T] {
        &self.mul
    }

    pub fn div_table(&self) -> &[T] {
        &self.div
    }

    #[inline]
    fn index(&self, a: T, b: T) -> usize {
        a.to_usize() * self.state.order() as usize + b.to_usize()
    }

    /// Product of two reduced values.
    #[inline]
    pub fn mul(&self, a: T, b: T) -> T {
        self.mul[self.index(a, b)]
    }

    /// Quotient of two reduced values, `None` if `b` is zero.
    #[inline]
    pub fn div(&self, a: T, b: T) -> Option<T> {
        if b == T::ZERO {
            return None;
        }
        Some(self.div[self.index(a, b)])
    }

    /// Inverse of a reduced value, `None` for zero.
    #[inline]
    pub fn inverse(&self, a: T) -> Option<T> {
        self.div(T::ONE, a)
    }
}

impl<T: Word> core::fmt::Debug for FullTables<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FullTables")
            .field("state", &self.state)
            .field("entries", &self.mul.len())
            .finish()
    }
}
