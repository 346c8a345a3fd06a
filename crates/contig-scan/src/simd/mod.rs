//! Byte-lane vector kernels.
//!
//! Every kernel works on bytes: a needle element is repeated across a
//! register ([`Pattern`]), compared byte-wise against the haystack, and
//! the resulting byte mask is folded into per-element hits. This lets one
//! set of kernels serve every lane size from 1 to 8 bytes.
//!
//! Kernels are generic over a [`Block`] (one register flavour) and are
//! monomorphized inside `#[target_feature]` entry points in the
//! per-architecture modules, so the intrinsics inline with the right
//! feature set.

#![allow(unsafe_code)]

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "x86_64")]
mod x86;

use crate::config::VectorWidth;
use crate::lanes::{self, Pattern};

/// One vector register flavour.
pub(crate) trait Block {
    /// Register type.
    type V: Copy;

    /// Register width in bytes.
    const BYTES: usize;

    /// Mask bits produced per byte lane by [`Block::eq_bits`].
    const BITS_PER_BYTE: u32;

    /// Mask with every lane bit set.
    const FULL: u64 = if Self::BYTES * Self::BITS_PER_BYTE as usize >= 64 {
        u64::MAX
    } else {
        (1u64 << (Self::BYTES * Self::BITS_PER_BYTE as usize)) - 1
    };

    /// Unaligned load of `BYTES` bytes.
    ///
    /// # Safety
    ///
    /// `ptr..ptr + BYTES` must be readable and the CPU must support the
    /// block's instruction set.
    unsafe fn load(ptr: *const u8) -> Self::V;

    /// Byte-wise equality mask of two registers.
    ///
    /// # Safety
    ///
    /// The CPU must support the block's instruction set.
    unsafe fn eq_bits(a: Self::V, b: Self::V) -> u64;
}

/// Element-hit mask of the block at `ptr` against every needle.
#[inline(always)]
unsafe fn hits<B: Block>(ptr: *const u8, needles: &[B::V], size: usize) -> u64 {
    let v = B::load(ptr);
    let mut acc = 0u64;
    for &needle in needles {
        acc |= lanes::fold_elements(B::eq_bits(v, needle), size, B::BITS_PER_BYTE);
    }
    acc
}

/// Element index of the first hit in `base..base + len`.
///
/// After the first (unaligned) block, the scan realigns to a register
/// boundary; the final block overlaps already-scanned bytes instead of
/// falling back to a scalar tail.
///
/// # Safety
///
/// `base..base + len` must be readable, `len >= B::BYTES`, and `len` must
/// be a multiple of `size`.
#[inline(always)]
pub(crate) unsafe fn find_first<B: Block>(
    base: *const u8,
    len: usize,
    size: usize,
    needles: &[B::V],
) -> Option<usize> {
    debug_assert!(len >= B::BYTES && len % size == 0);
    let group = size as u32 * B::BITS_PER_BYTE;
    let first_hit = |off: usize, m: u64| off / size + (m.trailing_zeros() / group) as usize;

    let m = hits::<B>(base, needles, size);
    if m != 0 {
        return Some(first_hit(0, m));
    }
    let mut off = lanes::align_step(base as usize, B::BYTES, size);
    while off + B::BYTES <= len {
        let m = hits::<B>(base.add(off), needles, size);
        if m != 0 {
            return Some(first_hit(off, m));
        }
        off += B::BYTES;
    }
    if off < len {
        let tail = len - B::BYTES;
        let m = hits::<B>(base.add(tail), needles, size);
        if m != 0 {
            return Some(first_hit(tail, m));
        }
    }
    None
}

/// Element index of the last hit in `base..base + len`.
///
/// Mirror image of [`find_first`]: the last block is read unaligned, then
/// the scan walks backwards over aligned blocks, finishing with an
/// overlapping block at offset zero.
///
/// # Safety
///
/// Same contract as [`find_first`].
#[inline(always)]
pub(crate) unsafe fn find_last<B: Block>(
    base: *const u8,
    len: usize,
    size: usize,
    needles: &[B::V],
) -> Option<usize> {
    debug_assert!(len >= B::BYTES && len % size == 0);
    let group = size as u32 * B::BITS_PER_BYTE;
    let last_hit = |off: usize, m: u64| off / size + ((63 - m.leading_zeros()) / group) as usize;

    let mut start = len - B::BYTES;
    let m = hits::<B>(base.add(start), needles, size);
    if m != 0 {
        return Some(last_hit(start, m));
    }
    let back = lanes::align_back(base as usize + start, B::BYTES, size);
    let mut next = start.checked_sub(back);
    while let Some(s) = next {
        let m = hits::<B>(base.add(s), needles, size);
        if m != 0 {
            return Some(last_hit(s, m));
        }
        start = s;
        next = s.checked_sub(B::BYTES);
    }
    if start > 0 {
        let m = hits::<B>(base, needles, size);
        if m != 0 {
            return Some(last_hit(0, m));
        }
    }
    None
}

/// Byte index of the first difference between `a` and `b`.
///
/// Compares whole registers, then machine words, then single bytes.
///
/// # Safety
///
/// `a..a + len` and `b..b + len` must be readable.
#[inline(always)]
pub(crate) unsafe fn first_difference<B: Block>(
    a: *const u8,
    b: *const u8,
    len: usize,
) -> Option<usize> {
    let mut off = 0;
    while off + B::BYTES <= len {
        let eq = B::eq_bits(B::load(a.add(off)), B::load(b.add(off)));
        if eq != B::FULL {
            let diff = !eq & B::FULL;
            return Some(off + (diff.trailing_zeros() / B::BITS_PER_BYTE) as usize);
        }
        off += B::BYTES;
    }
    let rest_a = std::slice::from_raw_parts(a.add(off), len - off);
    let rest_b = std::slice::from_raw_parts(b.add(off), len - off);
    lanes::first_difference_words(rest_a, rest_b).map(|i| off + i)
}

/// Direction of a find.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

/// Find the first or last element of `hay` (lanes of `size` bytes)
/// matching any of `patterns`, using registers of `width`.
///
/// # Panics
///
/// Panics if `width` is [`VectorWidth::Scalar`], unsupported on this
/// target, or wider than `hay`.
pub(crate) fn find(
    width: VectorWidth,
    hay: &[u8],
    size: usize,
    patterns: &[Pattern],
    direction: Direction,
) -> Option<usize> {
    assert!(width != VectorWidth::Scalar && hay.len() >= width.bytes());
    assert!(hay.len() % size == 0);
    find_impl(width, hay, size, patterns, direction)
}

/// Byte index of the first difference between two equal-length byte runs.
///
/// # Panics
///
/// Panics if `width` is [`VectorWidth::Scalar`] or unsupported on this
/// target, or if the runs differ in length.
pub(crate) fn difference(width: VectorWidth, a: &[u8], b: &[u8]) -> Option<usize> {
    assert!(width != VectorWidth::Scalar && a.len() == b.len());
    difference_impl(width, a, b)
}

#[cfg(target_arch = "x86_64")]
fn find_impl(
    width: VectorWidth,
    hay: &[u8],
    size: usize,
    patterns: &[Pattern],
    direction: Direction,
) -> Option<usize> {
    assert!(width <= VectorWidth::detect(), "vector width not supported by this CPU");
    // SAFETY: bounds and lane alignment asserted by `find`; the CPU
    // supports `width` per the detection check above.
    unsafe {
        match width {
            VectorWidth::V256 => x86::find_avx2(hay, size, patterns, direction),
            _ => x86::find_sse2(hay, size, patterns, direction),
        }
    }
}

#[cfg(target_arch = "x86_64")]
fn difference_impl(width: VectorWidth, a: &[u8], b: &[u8]) -> Option<usize> {
    assert!(width <= VectorWidth::detect(), "vector width not supported by this CPU");
    // SAFETY: equal lengths asserted by `difference`; feature checked above.
    unsafe {
        match width {
            VectorWidth::V256 => x86::difference_avx2(a, b),
            _ => x86::difference_sse2(a, b),
        }
    }
}

#[cfg(target_arch = "aarch64")]
fn find_impl(
    width: VectorWidth,
    hay: &[u8],
    size: usize,
    patterns: &[Pattern],
    direction: Direction,
) -> Option<usize> {
    assert!(width == VectorWidth::V128, "only 128-bit vectors on aarch64");
    // SAFETY: NEON is available on all aarch64 targets; bounds asserted by `find`.
    unsafe { neon::find_neon(hay, size, patterns, direction) }
}

#[cfg(target_arch = "aarch64")]
fn difference_impl(width: VectorWidth, a: &[u8], b: &[u8]) -> Option<usize> {
    assert!(width == VectorWidth::V128, "only 128-bit vectors on aarch64");
    // SAFETY: NEON is available on all aarch64 targets; lengths asserted by `difference`.
    unsafe { neon::difference_neon(a, b) }
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn find_impl(
    _width: VectorWidth,
    _hay: &[u8],
    _size: usize,
    _patterns: &[Pattern],
    _direction: Direction,
) -> Option<usize> {
    unreachable!("vector scans are not available on this target")
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn difference_impl(_width: VectorWidth, _a: &[u8], _b: &[u8]) -> Option<usize> {
    unreachable!("vector scans are not available on this target")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths() -> Vec<VectorWidth> {
        [VectorWidth::V128, VectorWidth::V256]
            .into_iter()
            .filter(|w| *w <= VectorWidth::detect())
            .collect()
    }

    #[test]
    fn find_bytes_every_position() {
        for width in widths() {
            for len in width.bytes()..width.bytes() * 4 + 3 {
                for target in 0..len {
                    let mut hay = vec![0u8; len];
                    hay[target] = 7;
                    let p = lanes::pattern(&7u8);
                    assert_eq!(
                        find(width, &hay, 1, &[p], Direction::Forward),
                        Some(target),
                        "forward width={width:?} len={len} target={target}"
                    );
                    assert_eq!(
                        find(width, &hay, 1, &[p], Direction::Backward),
                        Some(target),
                        "backward width={width:?} len={len} target={target}"
                    );
                }
            }
        }
    }

    #[test]
    fn find_wide_lanes_ignores_partial_matches() {
        for width in widths() {
            // 0x0101 as u16 lanes; a lone 0x01 byte straddling lanes must not match.
            let mut hay = vec![0u16; 40];
            hay[10] = 0x0100;
            hay[11] = 0x0001;
            hay[33] = 0x0101;
            let bytes = lanes::as_bytes(&hay);
            let p = lanes::pattern(&0x0101u16);
            assert_eq!(find(width, bytes, 2, &[p], Direction::Forward), Some(33));
            assert_eq!(find(width, bytes, 2, &[p], Direction::Backward), Some(33));
        }
    }

    #[test]
    fn find_any_of_several_needles() {
        for width in widths() {
            let hay: Vec<u32> = (0..64).collect();
            let bytes = lanes::as_bytes(&hay);
            let ps = [lanes::pattern(&50u32), lanes::pattern(&20u32), lanes::pattern(&40u32)];
            assert_eq!(find(width, bytes, 4, &ps, Direction::Forward), Some(20));
            assert_eq!(find(width, bytes, 4, &ps, Direction::Backward), Some(50));
        }
    }

    #[test]
    fn difference_locates_first_changed_byte() {
        for width in widths() {
            let a: Vec<u8> = (0..100).collect();
            for at in 0..100 {
                let mut b = a.clone();
                b[at] ^= 0xFF;
                assert_eq!(difference(width, &a, &b), Some(at));
            }
            assert_eq!(difference(width, &a, &a.clone()), None);
        }
    }
}
