//! Scan Engine operations as view methods.
//!
//! Each method forwards the view's elements to the matching
//! `contig_scan` free function. Operands that take a second run accept
//! anything that dereferences to a slice, including other views via
//! [`View::as_slice`].

use std::cmp::Ordering;

use contig_core::Mutability;
use contig_scan::ScanElement;

use crate::view::View;

impl<T: ScanElement, M: Mutability> View<'_, T, M> {
    /// Index of the first element equal to `value`.
    pub fn index_of(&self, value: T) -> Option<usize> {
        contig_scan::index_of(self.as_slice(), value)
    }

    /// Index of the last element equal to `value`.
    pub fn last_index_of(&self, value: T) -> Option<usize> {
        contig_scan::last_index_of(self.as_slice(), value)
    }

    /// Index of the first element equal to `a` or `b`.
    pub fn index_of_any2(&self, a: T, b: T) -> Option<usize> {
        contig_scan::index_of_any2(self.as_slice(), a, b)
    }

    /// Index of the first element equal to `a`, `b` or `c`.
    pub fn index_of_any3(&self, a: T, b: T, c: T) -> Option<usize> {
        contig_scan::index_of_any3(self.as_slice(), a, b, c)
    }

    /// Index of the first element equal to any of `values`.
    pub fn index_of_any(&self, values: &[T]) -> Option<usize> {
        contig_scan::index_of_any(self.as_slice(), values)
    }

    /// Index of the last element equal to `a` or `b`.
    pub fn last_index_of_any2(&self, a: T, b: T) -> Option<usize> {
        contig_scan::last_index_of_any2(self.as_slice(), a, b)
    }

    /// Index of the last element equal to `a`, `b` or `c`.
    pub fn last_index_of_any3(&self, a: T, b: T, c: T) -> Option<usize> {
        contig_scan::last_index_of_any3(self.as_slice(), a, b, c)
    }

    /// Index of the last element equal to any of `values`.
    pub fn last_index_of_any(&self, values: &[T]) -> Option<usize> {
        contig_scan::last_index_of_any(self.as_slice(), values)
    }

    /// Index of the first occurrence of `needle`; an empty needle matches
    /// at 0.
    pub fn index_of_seq(&self, needle: &[T]) -> Option<usize> {
        contig_scan::index_of_seq(self.as_slice(), needle)
    }

    /// Index of the last occurrence of `needle`; an empty needle matches
    /// at 0.
    pub fn last_index_of_seq(&self, needle: &[T]) -> Option<usize> {
        contig_scan::last_index_of_seq(self.as_slice(), needle)
    }

    /// Whether any element equals `value`.
    pub fn contains(&self, value: T) -> bool {
        contig_scan::contains(self.as_slice(), value)
    }

    /// Number of elements equal to `value`.
    pub fn count(&self, value: T) -> usize {
        contig_scan::count(self.as_slice(), value)
    }

    /// Whether the view begins with `prefix`.
    pub fn starts_with(&self, prefix: &[T]) -> bool {
        contig_scan::starts_with(self.as_slice(), prefix)
    }

    /// Whether the view ends with `suffix`.
    pub fn ends_with(&self, suffix: &[T]) -> bool {
        contig_scan::ends_with(self.as_slice(), suffix)
    }

    /// Whether `other` has the same length and elements.
    pub fn sequence_equal(&self, other: &[T]) -> bool {
        contig_scan::sequence_equal(self.as_slice(), other)
    }

    /// First index within the common prefix where the view and `other`
    /// differ.
    pub fn mismatch(&self, other: &[T]) -> Option<usize> {
        contig_scan::mismatch(self.as_slice(), other)
    }

    /// Lexicographic three-way comparison against `other`.
    pub fn sequence_compare_to(&self, other: &[T]) -> isize
    where
        T: Ord,
    {
        contig_scan::sequence_compare_to(self.as_slice(), other)
    }
}

impl<T, M: Mutability> View<'_, T, M> {
    /// Binary search for `value` in a view sorted ascending.
    ///
    /// Returns the match index, or `!k` where `k` is the insertion point.
    pub fn binary_search(&self, value: &T) -> isize
    where
        T: Ord,
    {
        contig_scan::binary_search(self.as_slice(), value)
    }

    /// Binary search against a three-way comparison; see
    /// [`contig_scan::binary_search_by`].
    pub fn binary_search_by(&self, compare: impl FnMut(&T) -> Ordering) -> isize {
        contig_scan::binary_search_by(self.as_slice(), compare)
    }
}

#[cfg(test)]
mod tests {
    use crate::View;

    #[test]
    fn index_of_first_and_last() {
        let data = [5, 3, 9, 1, 3];
        let v = View::from_slice(&data);
        assert_eq!(v.index_of(3), Some(1));
        assert_eq!(v.last_index_of(3), Some(4));
        assert_eq!(v.index_of(4), None);
        assert_eq!(v.count(3), 2);
        assert!(v.contains(9));
    }

    #[test]
    fn sliced_view_reports_relative_indices() {
        let data: Vec<u8> = b"one two three two one".to_vec();
        let v = View::from_slice(&data).slice_from(4).unwrap();
        assert_eq!(v.index_of_seq(b"two"), Some(0));
        assert_eq!(v.last_index_of_seq(b"two"), Some(10));
        assert_eq!(v.index_of_any2(b'h', b'r'), Some(5));
        assert_eq!(v.last_index_of_any3(b'x', b'n', b'q'), Some(15));
        assert!(v.starts_with(b"two "));
        assert!(v.ends_with(b" one"));
    }

    #[test]
    fn compare_views() {
        let a = [1, 2, 3];
        let b = [1, 2, 3, 4];
        let va = View::from_slice(&a);
        let vb = View::from_slice(&b);
        assert!(va.sequence_compare_to(vb.as_slice()) < 0);
        assert!(!va.sequence_equal(vb.as_slice()));
        assert!(va.sequence_equal(vb.slice(0, 3).unwrap().as_slice()));
        assert_eq!(va.mismatch(&[1, 5]), Some(1));
    }

    #[test]
    fn binary_search_sorted_view() {
        let data = [1, 3, 5, 9];
        let v = View::from_slice(&data);
        assert_eq!(v.binary_search(&3), 1);
        assert_eq!(v.binary_search(&4), !2);
        assert_eq!(v.binary_search_by(|x| x.cmp(&9)), 3);
    }

    #[test]
    fn string_view_search() {
        let v = View::from_str("hello, world");
        assert_eq!(v.index_of(b','), Some(5));
        assert_eq!(v.index_of_seq(b"world"), Some(7));
    }
}
