//! Obviously-correct linear scans.
//!
//! Every function here walks its input one element at a time with `==`
//! and is meant only as an oracle for tests.

use std::cmp::Ordering;

pub fn naive_index_of<T: PartialEq>(haystack: &[T], value: &T) -> Option<usize> {
    haystack.iter().position(|x| x == value)
}

pub fn naive_last_index_of<T: PartialEq>(haystack: &[T], value: &T) -> Option<usize> {
    haystack.iter().rposition(|x| x == value)
}

pub fn naive_index_of_any<T: PartialEq>(haystack: &[T], values: &[T]) -> Option<usize> {
    haystack.iter().position(|x| values.contains(x))
}

pub fn naive_last_index_of_any<T: PartialEq>(haystack: &[T], values: &[T]) -> Option<usize> {
    haystack.iter().rposition(|x| values.contains(x))
}

/// First window equal to `needle`; an empty needle matches at 0.
pub fn naive_index_of_seq<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Last window equal to `needle`; an empty needle matches at 0.
pub fn naive_last_index_of_seq<T: PartialEq>(haystack: &[T], needle: &[T]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

pub fn naive_count<T: PartialEq>(haystack: &[T], value: &T) -> usize {
    haystack.iter().filter(|x| *x == value).count()
}

/// Sign of the lexicographic comparison of `a` and `b`.
pub fn naive_compare_sign<T: Ord>(a: &[T], b: &[T]) -> Ordering {
    a.cmp(b)
}

/// Insertion point of `value` in a sorted run: the number of elements
/// strictly less than it.
pub fn naive_insertion_point<T: Ord>(sorted: &[T], value: &T) -> usize {
    sorted.iter().take_while(|x| *x < value).count()
}
