//! Element types the scan engine understands.

#![allow(unsafe_code)]

/// An element type that can be searched and compared.
///
/// Every `Copy + PartialEq` type can implement this trait with the
/// defaults, which route all operations through the scalar loops. Types
/// whose equality is plain bit equality additionally set
/// [`BITWISE_EQ`](ScanElement::BITWISE_EQ) and are compared as raw bytes
/// in vector registers.
///
/// # Safety
///
/// When `BITWISE_EQ` is `true` the implementor guarantees that:
///
/// - the type has no padding or otherwise uninitialized bytes,
/// - `a == b` holds exactly when `a` and `b` have identical bytes,
/// - [`same`](ScanElement::same) agrees with `==`.
///
/// Implementations that keep `BITWISE_EQ = false` carry no obligation.
pub unsafe trait ScanElement: Copy + PartialEq + 'static {
    /// Whether equality of two values is equality of their bytes.
    const BITWISE_EQ: bool = false;

    /// Element equality used by every scan.
    ///
    /// Defaults to `==`. Floating-point types override it so that `NaN`
    /// matches `NaN`, keeping [`sequence_equal`](crate::sequence_equal)
    /// reflexive.
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

macro_rules! impl_bitwise {
    ($($t:ty),* $(,)?) => {
        $(
            // SAFETY: integer-like types have no padding and compare by value bits.
            unsafe impl ScanElement for $t {
                const BITWISE_EQ: bool = true;
            }
        )*
    };
}

impl_bitwise!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, bool, char);

// SAFETY: BITWISE_EQ stays false; floats only use the scalar paths.
unsafe impl ScanElement for f32 {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

// SAFETY: BITWISE_EQ stays false; floats only use the scalar paths.
unsafe impl ScanElement for f64 {
    #[inline]
    fn same(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_bitwise() {
        assert!(<u8 as ScanElement>::BITWISE_EQ);
        assert!(<i64 as ScanElement>::BITWISE_EQ);
        assert!(<char as ScanElement>::BITWISE_EQ);
        assert!(!<f32 as ScanElement>::BITWISE_EQ);
    }

    #[test]
    fn float_nan_is_same_as_nan() {
        assert!(f64::NAN.same(&f64::NAN));
        assert!(0.0f32.same(&-0.0));
        assert!(!1.0f32.same(&2.0));
    }
}
