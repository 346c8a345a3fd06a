//! Copy, fill, and clear over raw element runs.
//!
//! Implemented once against pointer + length pairs and reused by every
//! view, including views projected from handles.

#![allow(unsafe_code)]

use std::ptr;

use contig_core::{Mutable, Mutability, Plain, ViewError};

use crate::view::View;

/// How [`clear_run`] zeroes a run of plain elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ClearStrategy {
    /// Elements narrower than a machine word: one byte-wise fill.
    SubWord,
    /// Elements spanning whole machine words: one word store per word.
    Words,
}

const WORD: usize = size_of::<usize>();

pub(crate) fn clear_strategy<T>(base: *const T) -> ClearStrategy {
    let size = size_of::<T>();
    if size >= WORD && size % WORD == 0 && (base as usize) % align_of::<usize>() == 0 {
        ClearStrategy::Words
    } else {
        ClearStrategy::SubWord
    }
}

/// Copy `len` elements from `src` to `dst`, handling overlap.
///
/// Disjoint runs take a single block copy. Overlapping runs are copied
/// element by element, forwards when `dst` precedes `src` and backwards
/// otherwise, so every source element is read before it is overwritten.
///
/// # Safety
///
/// `src..src + len` must be readable and `dst..dst + len` writable, both
/// aligned for `T`.
pub(crate) unsafe fn copy_run<T: Copy>(src: *const T, dst: *mut T, len: usize) {
    let bytes = len * size_of::<T>();
    let (s, d) = (src as usize, dst as usize);
    if bytes == 0 || s == d {
        return;
    }
    if s + bytes <= d || d + bytes <= s {
        ptr::copy_nonoverlapping(src, dst, len);
    } else if d < s {
        for i in 0..len {
            dst.add(i).write(src.add(i).read());
        }
    } else {
        for i in (0..len).rev() {
            dst.add(i).write(src.add(i).read());
        }
    }
}

/// Write `value` into every element of `run`.
///
/// One-byte elements go through a single `memset`.
pub(crate) fn fill_run<T: Copy>(run: &mut [T], value: T) {
    if size_of::<T>() == 1 {
        // SAFETY: `T` is one byte wide, so its value is exactly one byte
        // and the run spans `run.len()` bytes.
        unsafe {
            let byte: u8 = std::mem::transmute_copy(&value);
            ptr::write_bytes(run.as_mut_ptr().cast::<u8>(), byte, run.len());
        }
    } else {
        for slot in run {
            *slot = value;
        }
    }
}

/// Zero every element of `run`.
pub(crate) fn clear_run<T: Plain>(run: &mut [T]) {
    let base = run.as_mut_ptr();
    let bytes = size_of::<T>() * run.len();
    match clear_strategy(base) {
        ClearStrategy::SubWord => {
            // SAFETY: `Plain` guarantees all-zero is a valid `T`; the
            // write covers exactly the run.
            unsafe { ptr::write_bytes(base.cast::<u8>(), 0, bytes) }
        }
        ClearStrategy::Words => {
            let words = base.cast::<usize>();
            for i in 0..bytes / WORD {
                // SAFETY: the base is word aligned and the run is a whole
                // number of words (checked by `clear_strategy`).
                unsafe { words.add(i).write(0) }
            }
        }
    }
}

/// Reset every element of `run` to `T::default()`, dropping old values.
pub(crate) fn clear_run_default<T: Default>(run: &mut [T]) {
    for slot in run {
        *slot = T::default();
    }
}

// ── View methods ────────────────────────────────────────────────

impl<'a, T, M: Mutability> View<'a, T, M> {
    /// Copy every element into `destination`, which must be at least as
    /// long as this view.
    ///
    /// Correct even when the two views overlap. Fails with
    /// [`ViewError::DestinationTooShort`] before writing anything.
    pub fn copy_to(&self, destination: &mut View<'_, T, Mutable>) -> Result<(), ViewError>
    where
        T: Copy,
    {
        if destination.len() < self.len() {
            return Err(ViewError::DestinationTooShort {
                required: self.len(),
                available: destination.len(),
            });
        }
        // SAFETY: both runs are valid for their lengths and the
        // destination holds at least `self.len()` elements.
        unsafe { copy_run(self.as_ptr(), destination.as_mut_ptr(), self.len()) };
        Ok(())
    }

    /// Like [`copy_to`](Self::copy_to), returning `false` instead of an
    /// error when the destination is too short.
    pub fn try_copy_to(&self, destination: &mut View<'_, T, Mutable>) -> bool
    where
        T: Copy,
    {
        self.copy_to(destination).is_ok()
    }
}

impl<'a, T> View<'a, T, Mutable> {
    /// Assign `value` to every element.
    pub fn fill(&mut self, value: T)
    where
        T: Copy,
    {
        fill_run(self.as_mut_slice(), value);
    }

    /// Zero every element.
    pub fn clear(&mut self)
    where
        T: Plain,
    {
        clear_run(self.as_mut_slice());
    }

    /// Reset every element to `T::default()`.
    ///
    /// Use for element types that own resources or embed references:
    /// each old value is dropped and replaced individually.
    pub fn clear_default(&mut self)
    where
        T: Default,
    {
        clear_run_default(self.as_mut_slice());
    }
}
