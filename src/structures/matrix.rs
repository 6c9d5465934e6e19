use core::fmt;

use crate::algebra::field::BinaryField;
use crate::error::GfError;
use crate::structures::basic::BasicElem;
use crate::structures::state::FieldState;
use crate::word::Word;

/// Dense row-major matrix of elements of one runtime-modulus field.
///
/// Only the raw values are stored; the shared [`FieldState`] is attached
/// again on every read, so an entry costs a single word.
///
/// # Example
///
/// ```
/// use gf2n::{BasicElem, FieldState, GfMatrix};
///
/// let state = FieldState::new(0b1011u8).unwrap();
/// let mut m = GfMatrix::new(2, 4, state);
/// assert_eq!(m.len(), 8);
///
/// let a = BasicElem::with_state(10, state);
/// m.set(0, 0, &a).unwrap();
/// assert_eq!(m.get(0, 0).unwrap(), a);
/// assert!(m.get(2, 0).is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GfMatrix<T: Word> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
    state: FieldState<T>,
}

impl<T: Word> GfMatrix<T> {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize, state: FieldState<T>) -> Self {
        Self {
            rows,
            cols,
            data: vec![T::ZERO; rows * cols],
            state,
        }
    }

    /// Build a matrix from elements given in row-major order.
    ///
    /// # Errors
    ///
    /// Returns `GfError::CrossField` if an element is not in `state`'s field
    /// and `GfError::ShapeMismatch` if the number of elements is not
    /// `rows * cols`.
    pub fn from_elements<I>(
        rows: usize,
        cols: usize,
        state: FieldState<T>,
        elements: I,
    ) -> Result<Self, GfError>
    where
        I: IntoIterator<Item = BasicElem<T>>,
    {
        let data = elements
            .into_iter()
            .map(|e| {
                state.check_same(&e.state())?;
                Ok(e.value())
            })
            .collect::<Result<Vec<T>, GfError>>()?;
        if data.len() != rows * cols {
            return Err(GfError::ShapeMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            data,
            state,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of entries, `rows * cols`.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn state(&self) -> FieldState<T> {
        self.state
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GfError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(GfError::OutOfBounds { row, col })
        }
    }

    #[inline]
    fn attach(&self, value: T) -> BasicElem<T> {
        BasicElem::from_raw(value, self.state)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<BasicElem<T>, GfError> {
        let i = self.index(row, col)?;
        Ok(self.attach(self.data[i]))
    }

    /// Store `value` at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Fails on an out-of-range index or an element of another field.
    pub fn set(&mut self, row: usize, col: usize, value: &BasicElem<T>) -> Result<(), GfError> {
        let i = self.index(row, col)?;
        self.state.check_same(&value.state())?;
        self.data[i] = value.value();
        Ok(())
    }

    /// Replace the entry at `(row, col)` with `f(entry)`.
    pub fn update<F>(&mut self, row: usize, col: usize, f: F) -> Result<(), GfError>
    where
        F: FnOnce(BasicElem<T>) -> BasicElem<T>,
    {
        let current = self.get(row, col)?;
        self.set(row, col, &f(current))
    }

    /// Entries of one row, left to right.
    pub fn row(&self, row: usize) -> Result<impl Iterator<Item = BasicElem<T>> + '_, GfError> {
        if row >= self.rows {
            return Err(GfError::OutOfBounds { row, col: 0 });
        }
        let start = row * self.cols;
        Ok(self.data[start..start + self.cols]
            .iter()
            .map(move |&v| self.attach(v)))
    }

    /// All entries in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = BasicElem<T>> + '_ {
        self.data.iter().map(move |&v| self.attach(v))
    }

    /// Raw stored values in row-major order.
    pub fn values(&self) -> &[T] {
        &self.data
    }
}

impl<T: Word> fmt::Debug for GfMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GfMatrix<{}x{}, {:?}>", self.rows, self.cols, self.state)?;
        f.debug_list()
            .entries(self.data.chunks(self.cols.max(1)))
            .finish()
    }
}

impl<T: Word> fmt::Display for GfMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let start = r * self.cols;
            for (c, &v) in self.data[start..start + self.cols].iter().enumerate() {
                if c > 0 {
                    f.write_str("  ")?;
                }
                write!(f, "{}", self.attach(v))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Row-by-column product.
///
/// # Errors
///
/// Fails with `GfError::CrossField` for matrices of different fields and
/// `GfError::ShapeMismatch` when `lhs.cols() != rhs.rows()`.
pub fn mat_mul<T: Word>(lhs: &GfMatrix<T>, rhs: &GfMatrix<T>) -> Result<GfMatrix<T>, GfError> {
    lhs.state.check_same(&rhs.state)?;
    if lhs.cols != rhs.rows {
        return Err(GfError::ShapeMismatch {
            expected: lhs.cols,
            got: rhs.rows,
        });
    }
    let mut out = GfMatrix::new(lhs.rows, rhs.cols, lhs.state);
    for i in 0..lhs.rows {
        for j in 0..rhs.cols {
            let mut acc = out.attach(T::ZERO);
            for k in 0..lhs.cols {
                let a = lhs.attach(lhs.data[i * lhs.cols + k]);
                let b = rhs.attach(rhs.data[k * rhs.cols + j]);
                acc = acc.try_add(&a.try_mul(&b)?)?;
            }
            out.data[i * out.cols + j] = acc.value();
        }
    }
    Ok(out)
}
