use core::fmt;
use core::hash::Hash;
use core::ops::BitXor;

/// Unsigned machine word holding the bit-packed coefficients of a
/// GF(2^n) element.
///
/// Bit `i` is the coefficient of `x^i`. All arithmetic kernels work on
/// `u64`; a word only has to widen losslessly and narrow back.
pub trait Word:
    Copy
    + Eq
    + Ord
    + Hash
    + Default
    + fmt::Debug
    + fmt::Display
    + fmt::Binary
    + BitXor<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Width of the word in bits.
    const BITS: u32;
    const ZERO: Self;
    const ONE: Self;

    fn to_u64(self) -> u64;

    /// Narrow a `u64`, keeping only the low `BITS` bits.
    fn from_u64_truncate(v: u64) -> Self;

    /// Narrow a `u64`, returning `None` if any bit above `BITS` is set.
    fn try_from_u64(v: u64) -> Option<Self>;

    #[inline]
    fn to_usize(self) -> usize {
        self.to_u64() as usize
    }
}

macro_rules! impl_word {
    ($($t:ty),*) => {
        $(
            impl Word for $t {
                const BITS: u32 = <$t>::BITS;
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline]
                fn to_u64(self) -> u64 {
                    self as u64
                }

                #[inline]
                fn from_u64_truncate(v: u64) -> Self {
                    v as $t
                }

                #[inline]
                fn try_from_u64(v: u64) -> Option<Self> {
                    <$t>::try_from(v).ok()
                }
            }
        )*
    };
}

impl_word!(u8, u16, u32, u64);
