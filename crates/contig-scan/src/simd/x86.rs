//! SSE2 and AVX2 blocks for x86_64.

use core::arch::x86_64::*;

use smallvec::SmallVec;

use super::{Block, Direction};
use crate::lanes::Pattern;

/// 128-bit SSE2 registers (x86_64 baseline).
pub(super) struct Sse2;

/// 256-bit AVX2 registers (runtime detected).
pub(super) struct Avx2;

impl Block for Sse2 {
    type V = __m128i;
    const BYTES: usize = 16;
    const BITS_PER_BYTE: u32 = 1;

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> __m128i {
        _mm_loadu_si128(ptr as *const __m128i)
    }

    #[inline(always)]
    unsafe fn eq_bits(a: __m128i, b: __m128i) -> u64 {
        _mm_movemask_epi8(_mm_cmpeq_epi8(a, b)) as u16 as u64
    }
}

impl Block for Avx2 {
    type V = __m256i;
    const BYTES: usize = 32;
    const BITS_PER_BYTE: u32 = 1;

    #[inline(always)]
    unsafe fn load(ptr: *const u8) -> __m256i {
        _mm256_loadu_si256(ptr as *const __m256i)
    }

    #[inline(always)]
    unsafe fn eq_bits(a: __m256i, b: __m256i) -> u64 {
        _mm256_movemask_epi8(_mm256_cmpeq_epi8(a, b)) as u32 as u64
    }
}

#[inline(always)]
unsafe fn find_with<B: Block>(
    hay: &[u8],
    size: usize,
    patterns: &[Pattern],
    direction: Direction,
) -> Option<usize> {
    let needles: SmallVec<[B::V; 4]> = patterns.iter().map(|p| B::load(p.as_ptr())).collect();
    match direction {
        Direction::Forward => super::find_first::<B>(hay.as_ptr(), hay.len(), size, &needles),
        Direction::Backward => super::find_last::<B>(hay.as_ptr(), hay.len(), size, &needles),
    }
}

/// # Safety
///
/// `hay.len() >= 16` and a multiple of `size`.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn find_sse2(
    hay: &[u8],
    size: usize,
    patterns: &[Pattern],
    direction: Direction,
) -> Option<usize> {
    find_with::<Sse2>(hay, size, patterns, direction)
}

/// # Safety
///
/// AVX2 must be available; `hay.len() >= 32` and a multiple of `size`.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn find_avx2(
    hay: &[u8],
    size: usize,
    patterns: &[Pattern],
    direction: Direction,
) -> Option<usize> {
    find_with::<Avx2>(hay, size, patterns, direction)
}

/// # Safety
///
/// `a` and `b` must have equal lengths.
#[target_feature(enable = "sse2")]
pub(super) unsafe fn difference_sse2(a: &[u8], b: &[u8]) -> Option<usize> {
    super::first_difference::<Sse2>(a.as_ptr(), b.as_ptr(), a.len())
}

/// # Safety
///
/// AVX2 must be available; `a` and `b` must have equal lengths.
#[target_feature(enable = "avx2")]
pub(super) unsafe fn difference_avx2(a: &[u8], b: &[u8]) -> Option<usize> {
    super::first_difference::<Avx2>(a.as_ptr(), b.as_ptr(), a.len())
}
