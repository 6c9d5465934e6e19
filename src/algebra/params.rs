use core::fmt;
use core::hash::Hash;

use crate::error::ModulusError;
use crate::structures::lut::{FullTables, LogTable, MAX_FULL_TABLE_DEGREE, MAX_LOG_TABLE_DEGREE};
use crate::structures::state::FieldState;
use crate::word::Word;

/// Compile-time description of a binary field.
///
/// Implement it with [`binary_field!`](crate::binary_field), which also
/// provides lazily built, process-wide lookup tables for the field. Elements
/// of the fixed-modulus family ([`BasicPoly`](crate::BasicPoly),
/// [`PowPoly`](crate::PowPoly), [`TablePoly`](crate::TablePoly)) are
/// parameterized by such a type and carry no state besides their value.
pub trait FieldParams:
    'static + Send + Sync + Sized + Copy + Eq + Ord + Hash + Default + fmt::Debug
{
    type Word: Word;

    /// The modulus polynomial; bit `i` is the coefficient of `x^i`.
    const MODULUS: Self::Word;

    /// `n` for GF(2^n).
    const DEGREE: u32;

    /// `2^n` for GF(2^n).
    const ORDER: u64;

    /// Discrete-log tables of the field, built on first use.
    ///
    /// # Panics
    ///
    /// Panics if the modulus is not primitive or the degree exceeds
    /// [`MAX_LOG_TABLE_DEGREE`]. Use [`FieldParams::validate`] to detect that
    /// up front.
    fn log_table() -> &'static LogTable<Self::Word>;

    /// Multiplication and division tables of the field, built on first use.
    ///
    /// # Panics
    ///
    /// Panics if the degree exceeds [`MAX_FULL_TABLE_DEGREE`].
    fn full_tables() -> &'static FullTables<Self::Word>;

    #[inline]
    fn state() -> FieldState<Self::Word> {
        FieldState::new_unchecked(Self::MODULUS)
    }

    /// Check that the log tables of this field can be built.
    ///
    /// Call this at startup for early failure on misconfiguration. It walks
    /// the powers of `x` once but builds no table.
    fn validate() -> Result<(), ModulusError> {
        let state = FieldState::new(Self::MODULUS)?;
        if state.degree() > MAX_LOG_TABLE_DEGREE {
            return Err(ModulusError::TableTooLarge {
                degree: state.degree(),
                max: MAX_LOG_TABLE_DEGREE,
            });
        }
        let order = generator_order(&state);
        if order != state.order() - 1 {
            return Err(ModulusError::NotPrimitive {
                modulus: state.modulus().to_u64(),
                order,
            });
        }
        Ok(())
    }

    /// Check that the full multiplication and division tables of this field
    /// can be built.
    fn validate_full() -> Result<(), ModulusError> {
        let state = FieldState::new(Self::MODULUS)?;
        if state.degree() > MAX_FULL_TABLE_DEGREE {
            return Err(ModulusError::TableTooLarge {
                degree: state.degree(),
                max: MAX_FULL_TABLE_DEGREE,
            });
        }
        Ok(())
    }
}

/// Multiplicative order of `x` modulo the field modulus, or 0 if the powers
/// of `x` never return to 1 within the group order.
fn generator_order<T: Word>(state: &FieldState<T>) -> u64 {
    let modulus = state.modulus().to_u64();
    let x = state.reduce(0b10).to_u64();
    let mut acc = x;
    for k in 1..state.order() {
        if acc == 1 {
            return k;
        }
        acc = crate::utils::mul_mod(acc, x, modulus, state.degree());
    }
    0
}

/// Declare a binary field with a compile-time modulus.
///
/// Expands to a unit struct implementing [`FieldParams`] with its own
/// one-time-initialized lookup tables. A modulus of degree 0 or one that
/// factors over GF(2) is rejected at compile time.
///
/// # Example
///
/// ```
/// use gf2n::{binary_field, BasicPoly, FieldParams};
///
/// binary_field! {
///     /// GF(8) defined by x^3 + x + 1.
///     pub struct Gf8(u8 = 0b1011);
/// }
///
/// assert_eq!(Gf8::DEGREE, 3);
/// assert_eq!(Gf8::ORDER, 8);
/// assert!(Gf8::validate().is_ok());
///
/// let a = BasicPoly::<Gf8>::new(3);
/// assert_eq!((a * a).value(), 5);
/// ```
#[macro_export]
macro_rules! binary_field {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($word:ty = $modulus:expr);) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        $vis struct $name;

        const _: () = assert!(
            ($modulus as $word) > 1,
            concat!("modulus of ", stringify!($name), " must have degree at least 1")
        );
        const _: () = assert!(
            $crate::utils::is_irreducible(($modulus as $word) as u64),
            concat!("modulus of ", stringify!($name), " must be irreducible")
        );

        impl $crate::FieldParams for $name {
            type Word = $word;

            const MODULUS: $word = $modulus;
            const DEGREE: u32 = $crate::utils::modulus_degree(($modulus as $word) as u64);
            const ORDER: u64 = $crate::utils::field_order(Self::DEGREE);

            fn log_table() -> &'static $crate::LogTable<$word> {
                static TABLE: ::std::sync::OnceLock<$crate::LogTable<$word>> =
                    ::std::sync::OnceLock::new();
                TABLE.get_or_init(|| {
                    $crate::LogTable::new(<Self as $crate::FieldParams>::state())
                        .unwrap_or_else(|e| panic!("{}: {}", stringify!($name), e))
                })
            }

            fn full_tables() -> &'static $crate::FullTables<$word> {
                static TABLES: ::std::sync::OnceLock<$crate::FullTables<$word>> =
                    ::std::sync::OnceLock::new();
                TABLES.get_or_init(|| {
                    $crate::FullTables::new(<Self as $crate::FieldParams>::state())
                        .unwrap_or_else(|e| panic!("{}: {}", stringify!($name), e))
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    binary_field! {
        struct Gf8(u8 = 0b1011);
    }

    binary_field! {
        struct Gf16NonPrimitive(u8 = 0b11111);
    }

    binary_field! {
        struct Gf65536(u32 = 0b1_0001_0000_0000_1011);
    }

    #[test]
    fn constants() {
        assert_eq!(Gf8::MODULUS, 0b1011);
        assert_eq!(Gf8::DEGREE, 3);
        assert_eq!(Gf8::ORDER, 8);
        assert_eq!(Gf8::state(), FieldState::new(0b1011).unwrap());
        assert_eq!(Gf65536::DEGREE, 16);
    }

    #[test]
    fn tables_are_memoized() {
        let a = Gf8::log_table() as *const LogTable<u8>;
        let b = Gf8::log_table() as *const LogTable<u8>;
        assert_eq!(a, b);
        assert_eq!(Gf8::full_tables().mul(7, 4), 1);
    }

    #[test]
    fn validate() {
        assert!(Gf8::validate().is_ok());
        assert_eq!(
            Gf16NonPrimitive::validate(),
            Err(ModulusError::NotPrimitive {
                modulus: 0b11111,
                order: 5,
            })
        );
        assert!(Gf65536::validate().is_ok());
        assert!(Gf8::validate_full().is_ok());
        assert_eq!(
            Gf65536::validate_full(),
            Err(ModulusError::TableTooLarge {
                degree: 16,
                max: 12,
            })
        );
    }

    #[test]
    #[should_panic(expected = "Gf16NonPrimitive")]
    fn log_table_panics_for_non_primitive() {
        let _ = Gf16NonPrimitive::log_table();
    }
}
