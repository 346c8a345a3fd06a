//! NEON block for aarch64.
//!
//! NEON has no `movemask`; the compare result is narrowed with a 4-bit
//! shift so that every byte lane contributes one nibble to a `u64`.

use core::arch::aarch64::*;

use smallvec::SmallVec;

use super::{Block, Direction};
use crate::lanes::Pattern;

/// 128-bit NEON registers (aarch64 baseline).
pub(super) struct Neon;

impl Block for Neon {
    type V = uint8x16_t;
    const BYTES: usize = 16;
    const BITS_PER_BYTE: u32 = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> uint8x16_t {
        vld1q_u8(ptr)
    }

    #[inline(always)]
    unsafe fn eq_bits(a: uint8x16_t, b: uint8x16_t) -> u64 {
        let eq = vceqq_u8(a, b);
        let nibbles = vshrn_n_u16::<4>(vreinterpretq_u16_u8(eq));
        vget_lane_u64::<0>(vreinterpret_u64_u8(nibbles))
    }
}

/// # Safety
///
/// `hay.len() >= 16` and a multiple of `size`.
#[target_feature(enable = "neon")]
pub(super) unsafe fn find_neon(
    hay: &[u8],
    size: usize,
    patterns: &[Pattern],
    direction: Direction,
) -> Option<usize> {
    let needles: SmallVec<[uint8x16_t; 4]> =
        patterns.iter().map(|p| Neon::load(p.as_ptr())).collect();
    match direction {
        Direction::Forward => super::find_first::<Neon>(hay.as_ptr(), hay.len(), size, &needles),
        Direction::Backward => super::find_last::<Neon>(hay.as_ptr(), hay.len(), size, &needles),
    }
}

/// # Safety
///
/// `a` and `b` must have equal lengths.
#[target_feature(enable = "neon")]
pub(super) unsafe fn difference_neon(a: &[u8], b: &[u8]) -> Option<usize> {
    super::first_difference::<Neon>(a.as_ptr(), b.as_ptr(), a.len())
}
