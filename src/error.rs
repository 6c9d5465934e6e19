//! Error types for field construction and element arithmetic.

use thiserror::Error;

/// Error raised while setting up a field or its lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModulusError {
    /// The modulus has no term above `x^0`, so it defines no field.
    #[error("modulus {0:#b} has degree 0")]
    Degenerate(u64),
    /// The modulus factors over GF(2), so the quotient ring has zero divisors.
    #[error("modulus {0:#b} is not irreducible")]
    NotIrreducible(u64),
    /// `x` does not generate the multiplicative group modulo this polynomial,
    /// so no discrete-log table can be built for it.
    #[error("modulus {modulus:#b} is not primitive: x has order {order}")]
    NotPrimitive { modulus: u64, order: u64 },
    /// The requested table would be too large for this degree.
    #[error("table for degree {degree} exceeds the limit of degree {max}")]
    TableTooLarge { degree: u32, max: u32 },
    /// A table built elsewhere does not have the size of this field.
    #[error("table has {got} entries, expected {expected}")]
    TableMismatch { expected: usize, got: usize },
    /// A raw value does not fit the element word.
    #[error("value {value:#x} does not fit in {bits} bits")]
    ValueTooWide { value: u64, bits: u32 },
}

/// Error raised by element arithmetic and storage access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GfError {
    /// The two operands belong to fields with different moduli.
    #[error("elements belong to different fields (modulus {lhs:#b} vs {rhs:#b})")]
    CrossField { lhs: u64, rhs: u64 },
    #[error("division by zero")]
    DivisionByZero,
    #[error("index ({row}, {col}) is out of bounds")]
    OutOfBounds { row: usize, col: usize },
    /// Matrix dimensions do not fit the data or the other operand.
    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },
    #[error(transparent)]
    Modulus(#[from] ModulusError),
}
