//! Free-function entry points using the detected vector width.
//!
//! Each function forwards to [`Scanner::detected`]. Build a [`Scanner`]
//! from a [`ScanConfig`](crate::ScanConfig) to pin the width instead.

use crate::element::ScanElement;
use crate::scanner::Scanner;

/// Index of the first element equal to `value`.
pub fn index_of<T: ScanElement>(haystack: &[T], value: T) -> Option<usize> {
    Scanner::detected().index_of(haystack, value)
}

/// Index of the last element equal to `value`.
pub fn last_index_of<T: ScanElement>(haystack: &[T], value: T) -> Option<usize> {
    Scanner::detected().last_index_of(haystack, value)
}

/// Index of the first element equal to `a` or `b`.
pub fn index_of_any2<T: ScanElement>(haystack: &[T], a: T, b: T) -> Option<usize> {
    Scanner::detected().index_of_any2(haystack, a, b)
}

/// Index of the first element equal to `a`, `b` or `c`.
pub fn index_of_any3<T: ScanElement>(haystack: &[T], a: T, b: T, c: T) -> Option<usize> {
    Scanner::detected().index_of_any3(haystack, a, b, c)
}

/// Index of the first element equal to any of `values`.
pub fn index_of_any<T: ScanElement>(haystack: &[T], values: &[T]) -> Option<usize> {
    Scanner::detected().index_of_any(haystack, values)
}

/// Index of the last element equal to `a` or `b`.
pub fn last_index_of_any2<T: ScanElement>(haystack: &[T], a: T, b: T) -> Option<usize> {
    Scanner::detected().last_index_of_any2(haystack, a, b)
}

/// Index of the last element equal to `a`, `b` or `c`.
pub fn last_index_of_any3<T: ScanElement>(haystack: &[T], a: T, b: T, c: T) -> Option<usize> {
    Scanner::detected().last_index_of_any3(haystack, a, b, c)
}

/// Index of the last element equal to any of `values`.
pub fn last_index_of_any<T: ScanElement>(haystack: &[T], values: &[T]) -> Option<usize> {
    Scanner::detected().last_index_of_any(haystack, values)
}

/// Index of the first occurrence of `needle`; an empty needle matches at 0.
pub fn index_of_seq<T: ScanElement>(haystack: &[T], needle: &[T]) -> Option<usize> {
    Scanner::detected().index_of_seq(haystack, needle)
}

/// Index of the last occurrence of `needle`; an empty needle matches at 0.
pub fn last_index_of_seq<T: ScanElement>(haystack: &[T], needle: &[T]) -> Option<usize> {
    Scanner::detected().last_index_of_seq(haystack, needle)
}

/// Number of elements equal to `value`.
pub fn count<T: ScanElement>(haystack: &[T], value: T) -> usize {
    Scanner::detected().count(haystack, value)
}

/// Whether any element equals `value`.
pub fn contains<T: ScanElement>(haystack: &[T], value: T) -> bool {
    Scanner::detected().contains(haystack, value)
}

/// Whether `haystack` begins with `prefix`.
pub fn starts_with<T: ScanElement>(haystack: &[T], prefix: &[T]) -> bool {
    Scanner::detected().starts_with(haystack, prefix)
}

/// Whether `haystack` ends with `suffix`.
pub fn ends_with<T: ScanElement>(haystack: &[T], suffix: &[T]) -> bool {
    Scanner::detected().ends_with(haystack, suffix)
}

/// First index within the common prefix where `a` and `b` differ.
pub fn mismatch<T: ScanElement>(a: &[T], b: &[T]) -> Option<usize> {
    Scanner::detected().mismatch(a, b)
}

/// Whether `a` and `b` have equal lengths and equal elements.
pub fn sequence_equal<T: ScanElement>(a: &[T], b: &[T]) -> bool {
    Scanner::detected().sequence_equal(a, b)
}

/// Lexicographic three-way comparison; see [`Scanner::sequence_compare_to`].
///
/// ```
/// assert!(contig_scan::sequence_compare_to(&[1, 2, 3], &[1, 2, 3, 4]) < 0);
/// ```
pub fn sequence_compare_to<T: ScanElement + Ord>(a: &[T], b: &[T]) -> isize {
    Scanner::detected().sequence_compare_to(a, b)
}
