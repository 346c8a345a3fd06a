//! Byte-lane helpers shared by the vector kernels and the scalar fallback.
//!
//! A vector compare yields a bitmask with `bits_per_byte` bits per byte
//! lane (1 for SSE2/AVX2 `movemask`, 4 for the NEON narrowing trick). An
//! element of `size` bytes matches when every bit of its byte group is
//! set; [`fold_elements`] collapses each group onto its lowest bit.

#![allow(unsafe_code)]

use crate::element::ScanElement;

/// A needle value repeated across 32 bytes, ready for a vector load.
pub(crate) type Pattern = [u8; 32];

/// Lane size in bytes if `T` can use the vector find kernels.
#[inline]
pub(crate) fn lane_size<T: ScanElement>() -> Option<usize> {
    let size = std::mem::size_of::<T>();
    if T::BITWISE_EQ && matches!(size, 1 | 2 | 4 | 8) {
        Some(size)
    } else {
        None
    }
}

/// View a run of bitwise-comparable elements as bytes.
///
/// # Panics
///
/// Panics if `T` is not bitwise-comparable.
#[inline]
pub(crate) fn as_bytes<T: ScanElement>(run: &[T]) -> &[u8] {
    assert!(T::BITWISE_EQ, "byte view of a non-bitwise element type");
    // SAFETY: BITWISE_EQ guarantees every byte of T is initialized; the
    // byte slice covers exactly the memory of `run` and borrows it.
    unsafe { std::slice::from_raw_parts(run.as_ptr().cast::<u8>(), std::mem::size_of_val(run)) }
}

/// Repeat the bytes of `value` across a [`Pattern`].
///
/// # Panics
///
/// Panics if `T` is not a vector lane type (see [`lane_size`]).
pub(crate) fn pattern<T: ScanElement>(value: &T) -> Pattern {
    let size = lane_size::<T>().expect("pattern requested for a non-lane element type");
    let bytes = as_bytes(std::slice::from_ref(value));
    let mut out = [0u8; 32];
    for chunk in out.chunks_exact_mut(size) {
        chunk.copy_from_slice(bytes);
    }
    out
}

/// Bit set at the lowest position of every `group`-bit group of a `u64`.
#[inline(always)]
fn group_lsb_mask(group: u32) -> u64 {
    if group >= 64 {
        1
    } else {
        u64::MAX / ((1u64 << group) - 1)
    }
}

/// Collapse a per-byte compare mask into one bit per fully-matching element.
///
/// The surviving bit of element `i` sits at position `i * size * bits_per_byte`.
#[inline(always)]
pub(crate) fn fold_elements(mut bits: u64, size: usize, bits_per_byte: u32) -> u64 {
    let group = size as u32 * bits_per_byte;
    let mut span = bits_per_byte;
    while span < group {
        bits &= bits >> span;
        span <<= 1;
    }
    bits & group_lsb_mask(group)
}

/// First byte index where `a` and `b` differ, comparing a machine word at
/// a time and then byte by byte. Only the common prefix is compared.
pub(crate) fn first_difference_words(a: &[u8], b: &[u8]) -> Option<usize> {
    const WORD: usize = std::mem::size_of::<usize>();
    let n = a.len().min(b.len());
    let mut off = 0;
    while off + WORD <= n {
        if read_word(&a[off..off + WORD]) != read_word(&b[off..off + WORD]) {
            break;
        }
        off += WORD;
    }
    a[off..n]
        .iter()
        .zip(&b[off..n])
        .position(|(x, y)| x != y)
        .map(|i| off + i)
}

#[inline(always)]
fn read_word(bytes: &[u8]) -> usize {
    let mut word = [0u8; std::mem::size_of::<usize>()];
    word.copy_from_slice(bytes);
    usize::from_ne_bytes(word)
}

/// Offset of the first vector-aligned block after the block at `addr`.
///
/// Falls back to a full block step when the aligned boundary would not
/// land on an element boundary.
#[inline(always)]
pub(crate) fn align_step(addr: usize, block: usize, size: usize) -> usize {
    let misalign = addr & (block - 1);
    let step = if misalign == 0 { block } else { block - misalign };
    if step % size == 0 {
        step
    } else {
        block
    }
}

/// Distance to step back from the block at `addr` so the previous block
/// starts on a vector-aligned address.
#[inline(always)]
pub(crate) fn align_back(addr: usize, block: usize, size: usize) -> usize {
    let misalign = addr & (block - 1);
    if misalign != 0 && misalign % size == 0 {
        misalign
    } else {
        block
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lane_size_only_for_bitwise_power_of_two() {
        assert_eq!(lane_size::<u8>(), Some(1));
        assert_eq!(lane_size::<u16>(), Some(2));
        assert_eq!(lane_size::<char>(), Some(4));
        assert_eq!(lane_size::<i64>(), Some(8));
        assert_eq!(lane_size::<u128>(), None);
        assert_eq!(lane_size::<f32>(), None);
    }

    #[test]
    fn pattern_repeats_value() {
        let p = pattern(&0x0102u16);
        let expected = 0x0102u16.to_ne_bytes();
        for pair in p.chunks_exact(2) {
            assert_eq!(pair, expected);
        }
    }

    #[test]
    fn fold_single_byte_lanes_is_identity() {
        assert_eq!(fold_elements(0b1011, 1, 1), 0b1011);
    }

    #[test]
    fn fold_requires_every_byte_of_element() {
        // Bytes 0..4 all match (element 0); bytes 5..8 partially (element 1).
        let bits = 0b0110_1111;
        assert_eq!(fold_elements(bits, 4, 1), 0b1);
        // Element 1 fully matching.
        assert_eq!(fold_elements(0b1111_0000, 4, 1), 1 << 4);
    }

    #[test]
    fn fold_nibble_masks() {
        // Four bits per byte; element of two bytes matches at byte 2..4.
        let bits = 0xFF00u64;
        assert_eq!(fold_elements(bits, 2, 4), 1 << 8);
        // Only one byte of the pair matches.
        assert_eq!(fold_elements(0x0F00, 2, 4), 0);
    }

    #[test]
    fn group_mask_spacing() {
        assert_eq!(group_lsb_mask(1), u64::MAX);
        assert_eq!(group_lsb_mask(8), 0x0101_0101_0101_0101);
        assert_eq!(group_lsb_mask(32), 0x0000_0001_0000_0001);
    }

    #[test]
    fn word_difference_finds_first_byte() {
        let a = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];
        let mut b = a;
        assert_eq!(first_difference_words(&a, &b), None);
        b[9] = 0;
        assert_eq!(first_difference_words(&a, &b), Some(9));
        b[2] = 0;
        assert_eq!(first_difference_words(&a, &b), Some(2));
    }

    #[test]
    fn alignment_steps_land_on_boundaries() {
        assert_eq!(align_step(0x1000, 16, 1), 16);
        assert_eq!(align_step(0x1003, 16, 1), 13);
        // 13 bytes is not a whole number of 4-byte elements.
        assert_eq!(align_step(0x1003, 16, 4), 16);
        assert_eq!(align_step(0x1004, 16, 4), 12);
        assert_eq!(align_back(0x1008, 16, 4), 8);
        assert_eq!(align_back(0x1000, 16, 4), 16);
    }
}
