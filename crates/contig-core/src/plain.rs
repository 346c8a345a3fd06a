//! The [`Plain`] element contract.
//!
//! Raw-address views bypass every ownership check the compiler would
//! otherwise make, so they are only available for element types that
//! hold no references, own no resources, and accept the all-zero bit
//! pattern. The same contract makes bulk byte-level zeroing sound.

#![allow(unsafe_code)]

/// Element types made of plain bits.
///
/// # Safety
///
/// Implementors must guarantee that:
///
/// - the type contains no references, pointers to owned data, or other
///   embedded handles whose validity the compiler tracks,
/// - the type has no drop glue (`std::mem::needs_drop::<Self>()` is false),
/// - the all-zero bit pattern is a valid value of the type.
pub unsafe trait Plain: Copy + 'static {}

macro_rules! impl_plain {
    ($($t:ty),* $(,)?) => {
        $(
            // SAFETY: primitive value types; zero is a valid value.
            unsafe impl Plain for $t {}
        )*
    };
}

impl_plain!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, (),
);

// SAFETY: an array of plain values is itself plain.
unsafe impl<T: Plain, const N: usize> Plain for [T; N] {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_plain<T: Plain>() -> bool {
        !std::mem::needs_drop::<T>()
    }

    #[test]
    fn primitives_and_arrays_are_plain() {
        assert!(assert_plain::<u8>());
        assert!(assert_plain::<f64>());
        assert!(assert_plain::<char>());
        assert!(assert_plain::<[u32; 4]>());
        assert!(assert_plain::<[[i16; 2]; 3]>());
    }
}
