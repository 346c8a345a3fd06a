//! The [`Scanner`]: every scan operation at a fixed vector width.

use std::cmp::Ordering;

use smallvec::SmallVec;

use crate::config::{ScanConfig, VectorWidth};
use crate::element::ScanElement;
use crate::lanes::{self, Pattern};
use crate::scalar;
use crate::simd::{self, Direction};

/// Search and comparison routines bound to one vector width.
///
/// Cheap to copy. Scanners built with different widths return identical
/// results; the width only affects speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scanner {
    width: VectorWidth,
}

impl Scanner {
    /// Build a scanner from a config, clamping its width to the hardware.
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            width: config.effective_width(),
        }
    }

    /// A scanner using the widest vectors the running CPU supports.
    pub fn detected() -> Self {
        Self {
            width: VectorWidth::detect(),
        }
    }

    /// A scanner restricted to unrolled scalar loops.
    pub fn scalar() -> Self {
        Self {
            width: VectorWidth::Scalar,
        }
    }

    /// The vector width this scanner uses.
    pub fn width(&self) -> VectorWidth {
        self.width
    }

    // ── Single and multi-value finds ────────────────────────────────

    /// Index of the first element equal to `value`.
    pub fn index_of<T: ScanElement>(&self, haystack: &[T], value: T) -> Option<usize> {
        self.find(haystack, &[value], Direction::Forward)
    }

    /// Index of the last element equal to `value`.
    pub fn last_index_of<T: ScanElement>(&self, haystack: &[T], value: T) -> Option<usize> {
        self.find(haystack, &[value], Direction::Backward)
    }

    /// Index of the first element equal to `a` or `b`.
    pub fn index_of_any2<T: ScanElement>(&self, haystack: &[T], a: T, b: T) -> Option<usize> {
        self.find(haystack, &[a, b], Direction::Forward)
    }

    /// Index of the first element equal to `a`, `b` or `c`.
    pub fn index_of_any3<T: ScanElement>(&self, haystack: &[T], a: T, b: T, c: T) -> Option<usize> {
        self.find(haystack, &[a, b, c], Direction::Forward)
    }

    /// Index of the first element equal to any of `values`.
    ///
    /// An empty `values` set matches nothing.
    pub fn index_of_any<T: ScanElement>(&self, haystack: &[T], values: &[T]) -> Option<usize> {
        self.find(haystack, values, Direction::Forward)
    }

    /// Index of the last element equal to `a` or `b`.
    pub fn last_index_of_any2<T: ScanElement>(&self, haystack: &[T], a: T, b: T) -> Option<usize> {
        self.find(haystack, &[a, b], Direction::Backward)
    }

    /// Index of the last element equal to `a`, `b` or `c`.
    pub fn last_index_of_any3<T: ScanElement>(
        &self,
        haystack: &[T],
        a: T,
        b: T,
        c: T,
    ) -> Option<usize> {
        self.find(haystack, &[a, b, c], Direction::Backward)
    }

    /// Index of the last element equal to any of `values`.
    pub fn last_index_of_any<T: ScanElement>(&self, haystack: &[T], values: &[T]) -> Option<usize> {
        self.find(haystack, values, Direction::Backward)
    }

    /// Number of elements equal to `value`.
    pub fn count<T: ScanElement>(&self, haystack: &[T], value: T) -> usize {
        let mut count = 0;
        let mut rest = haystack;
        while let Some(i) = self.index_of(rest, value) {
            count += 1;
            rest = &rest[i + 1..];
        }
        count
    }

    /// Whether any element equals `value`.
    pub fn contains<T: ScanElement>(&self, haystack: &[T], value: T) -> bool {
        self.index_of(haystack, value).is_some()
    }

    fn find<T: ScanElement>(&self, haystack: &[T], values: &[T], direction: Direction) -> Option<usize> {
        if values.is_empty() || haystack.is_empty() {
            return None;
        }
        if let Some(size) = lanes::lane_size::<T>() {
            let bytes = lanes::as_bytes(haystack);
            let width = self.width.fit(bytes.len());
            if width != VectorWidth::Scalar {
                let patterns: SmallVec<[Pattern; 4]> = values.iter().map(lanes::pattern).collect();
                return simd::find(width, bytes, size, &patterns, direction);
            }
        }
        match (values, direction) {
            ([a], Direction::Forward) => scalar::position(haystack, |x| x.same(a)),
            ([a], Direction::Backward) => scalar::rposition(haystack, |x| x.same(a)),
            ([a, b], Direction::Forward) => scalar::position(haystack, |x| x.same(a) || x.same(b)),
            ([a, b], Direction::Backward) => {
                scalar::rposition(haystack, |x| x.same(a) || x.same(b))
            }
            (_, Direction::Forward) => scalar::position(haystack, |x| values.iter().any(|v| x.same(v))),
            (_, Direction::Backward) => {
                scalar::rposition(haystack, |x| values.iter().any(|v| x.same(v)))
            }
        }
    }

    // ── Subsequence search ──────────────────────────────────────────

    /// Index of the first occurrence of `needle` in `haystack`.
    ///
    /// Candidates are located by scanning for the needle's first element;
    /// each candidate is then verified with a block comparison of the
    /// remaining elements. An empty needle matches at index 0.
    pub fn index_of_seq<T: ScanElement>(&self, haystack: &[T], needle: &[T]) -> Option<usize> {
        let Some((&first, rest)) = needle.split_first() else {
            return Some(0);
        };
        if needle.len() > haystack.len() {
            return None;
        }
        let last_start = haystack.len() - needle.len();
        let mut offset = 0;
        while offset <= last_start {
            let pos = offset + self.index_of(&haystack[offset..=last_start], first)?;
            if self.sequence_equal(&haystack[pos + 1..pos + needle.len()], rest) {
                return Some(pos);
            }
            offset = pos + 1;
        }
        None
    }

    /// Index of the last occurrence of `needle` in `haystack`.
    ///
    /// An empty needle matches at index 0.
    pub fn last_index_of_seq<T: ScanElement>(&self, haystack: &[T], needle: &[T]) -> Option<usize> {
        let Some((&first, rest)) = needle.split_first() else {
            return Some(0);
        };
        if needle.len() > haystack.len() {
            return None;
        }
        // Candidate start positions are `0..end`.
        let mut end = haystack.len() - needle.len() + 1;
        while end > 0 {
            let pos = self.last_index_of(&haystack[..end], first)?;
            if self.sequence_equal(&haystack[pos + 1..pos + needle.len()], rest) {
                return Some(pos);
            }
            end = pos;
        }
        None
    }

    // ── Run comparison ──────────────────────────────────────────────

    /// First index within the common prefix where `a` and `b` differ.
    ///
    /// `None` means the shorter run is a prefix of the longer one (or the
    /// runs are equal).
    pub fn mismatch<T: ScanElement>(&self, a: &[T], b: &[T]) -> Option<usize> {
        let n = a.len().min(b.len());
        let (a, b) = (&a[..n], &b[..n]);
        if a.as_ptr() == b.as_ptr() {
            return None;
        }
        if T::BITWISE_EQ && std::mem::size_of::<T>() > 0 {
            let (x, y) = (lanes::as_bytes(a), lanes::as_bytes(b));
            let width = self.width.fit(x.len());
            let byte = if width == VectorWidth::Scalar {
                lanes::first_difference_words(x, y)
            } else {
                simd::difference(width, x, y)
            };
            return byte.map(|i| i / std::mem::size_of::<T>());
        }
        scalar::mismatch(a, b)
    }

    /// Whether `a` and `b` have equal lengths and equal elements.
    pub fn sequence_equal<T: ScanElement>(&self, a: &[T], b: &[T]) -> bool {
        a.len() == b.len() && self.mismatch(a, b).is_none()
    }

    /// Lexicographic three-way comparison.
    ///
    /// Returns `-1` or `1` according to the first differing element. When
    /// one run is a prefix of the other the result is
    /// `a.len() - b.len()`, so the shorter run compares as less and equal
    /// runs compare as `0`.
    pub fn sequence_compare_to<T: ScanElement + Ord>(&self, a: &[T], b: &[T]) -> isize {
        match self.mismatch(a, b) {
            Some(i) => match a[i].cmp(&b[i]) {
                Ordering::Less => -1,
                Ordering::Greater => 1,
                Ordering::Equal => 0,
            },
            None => a.len() as isize - b.len() as isize,
        }
    }

    /// Whether `haystack` begins with `prefix`.
    pub fn starts_with<T: ScanElement>(&self, haystack: &[T], prefix: &[T]) -> bool {
        prefix.len() <= haystack.len() && self.sequence_equal(&haystack[..prefix.len()], prefix)
    }

    /// Whether `haystack` ends with `suffix`.
    pub fn ends_with<T: ScanElement>(&self, haystack: &[T], suffix: &[T]) -> bool {
        suffix.len() <= haystack.len()
            && self.sequence_equal(&haystack[haystack.len() - suffix.len()..], suffix)
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::detected()
    }
}
