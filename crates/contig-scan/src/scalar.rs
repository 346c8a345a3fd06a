//! Unrolled scalar loops.
//!
//! Runs are consumed in batches of 8 elements, then 4, then one at a
//! time. Used for element types without bitwise equality and for runs
//! shorter than one vector register.

use crate::element::ScanElement;

/// Test the listed lanes of `$chunk` in order, returning on the first hit.
macro_rules! probe {
    ($chunk:ident, $base:expr, $pred:ident; $($i:literal)*) => {
        $(
            if $pred(&$chunk[$i]) {
                return Some($base + $i);
            }
        )*
    };
}

/// Index of the first element satisfying `pred`.
pub(crate) fn position<T>(run: &[T], mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
    let mut base = 0;
    let mut eights = run.chunks_exact(8);
    for c in eights.by_ref() {
        probe!(c, base, pred; 0 1 2 3 4 5 6 7);
        base += 8;
    }
    let mut fours = eights.remainder().chunks_exact(4);
    for c in fours.by_ref() {
        probe!(c, base, pred; 0 1 2 3);
        base += 4;
    }
    for (i, x) in fours.remainder().iter().enumerate() {
        if pred(x) {
            return Some(base + i);
        }
    }
    None
}

/// Index of the last element satisfying `pred`.
pub(crate) fn rposition<T>(run: &[T], mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
    let mut end = run.len();
    let mut eights = run.rchunks_exact(8);
    for c in eights.by_ref() {
        end -= 8;
        probe!(c, end, pred; 7 6 5 4 3 2 1 0);
    }
    let mut fours = eights.remainder().rchunks_exact(4);
    for c in fours.by_ref() {
        end -= 4;
        probe!(c, end, pred; 3 2 1 0);
    }
    fours.remainder().iter().rposition(pred)
}

/// First index of the common prefix where `a` and `b` differ.
pub(crate) fn mismatch<T: ScanElement>(a: &[T], b: &[T]) -> Option<usize> {
    let n = a.len().min(b.len());
    let (a, b) = (&a[..n], &b[..n]);
    let mut base = 0;
    let mut pairs = a.chunks_exact(4).zip(b.chunks_exact(4));
    for (x, y) in pairs.by_ref() {
        if !(x[0].same(&y[0]) && x[1].same(&y[1]) && x[2].same(&y[2]) && x[3].same(&y[3])) {
            break;
        }
        base += 4;
    }
    a[base..]
        .iter()
        .zip(&b[base..])
        .position(|(x, y)| !x.same(y))
        .map(|i| base + i)
}
