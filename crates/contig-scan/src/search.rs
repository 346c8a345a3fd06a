//! Binary search over sorted runs.
//!
//! Results use a single signed index: a non-negative value is the index of
//! a match, a negative value is the bitwise complement of the insertion
//! point (`!k`). Complementing a negative result again recovers `k`.

use std::cmp::Ordering;

/// Binary search against a three-way comparison.
///
/// `compare` reports how an element orders relative to the target: it
/// must return `Less` for elements before the target, `Greater` for
/// elements after it. Returns the index of an element reported `Equal`, or
/// `!k` where `k` is the index at which the target would be inserted to
/// keep the run sorted.
///
/// When several elements compare `Equal`, any one of them may be returned.
pub fn binary_search_by<T>(run: &[T], mut compare: impl FnMut(&T) -> Ordering) -> isize {
    let mut lo = 0usize;
    let mut hi = run.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        match compare(&run[mid]) {
            Ordering::Less => lo = mid + 1,
            Ordering::Greater => hi = mid,
            Ordering::Equal => return mid as isize,
        }
    }
    !(lo as isize)
}

/// Binary search for `value` in a run sorted ascending by `Ord`.
///
/// ```
/// use contig_scan::binary_search;
///
/// let sorted = [1, 3, 5, 9];
/// assert_eq!(binary_search(&sorted, &3), 1);
/// assert_eq!(binary_search(&sorted, &4), !2);
/// ```
pub fn binary_search<T: Ord>(run: &[T], value: &T) -> isize {
    binary_search_by(run, |probe| probe.cmp(value))
}

/// Split a signed search result into `Ok(index)` or `Err(insertion_point)`,
/// matching the shape of [`slice::binary_search`].
pub fn decode_search_result(result: isize) -> Result<usize, usize> {
    if result >= 0 {
        Ok(result as usize)
    } else {
        Err(!result as usize)
    }
}
