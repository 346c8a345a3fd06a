//! Backing storage shared by handles.
//!
//! A handle points at one of three store kinds (or at nothing). Each store
//! carries a [`Header`] with a non-blocking borrow flag, which arbitrates
//! the views projected from every handle sharing the store, and a count of
//! live pins.

#![allow(unsafe_code)]

use std::fmt;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};
use std::sync::Arc;

use contig_core::HandleError;

use crate::manager::MemoryManager;

// ── Header ──────────────────────────────────────────────────────

/// Borrow state of a store: `0` free, `n > 0` shared by `n` views,
/// `-1` held by one exclusive view.
#[derive(Default)]
pub(crate) struct Header {
    borrow: AtomicIsize,
    pins: AtomicUsize,
}

const EXCLUSIVE: isize = -1;

impl Header {
    /// Acquire a view borrow without waiting.
    pub(crate) fn try_borrow(&self, exclusive: bool) -> Result<(), HandleError> {
        if exclusive {
            return self
                .borrow
                .compare_exchange(0, EXCLUSIVE, Ordering::Acquire, Ordering::Relaxed)
                .map(|_| ())
                .map_err(|_| HandleError::Borrowed { exclusive });
        }
        let mut current = self.borrow.load(Ordering::Relaxed);
        loop {
            if current < 0 {
                return Err(HandleError::Borrowed { exclusive });
            }
            match self.borrow.compare_exchange_weak(
                current,
                current + 1,
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    /// Release a borrow taken by [`Header::try_borrow`].
    pub(crate) fn release_borrow(&self, exclusive: bool) {
        if exclusive {
            self.borrow.store(0, Ordering::Release);
        } else {
            self.borrow.fetch_sub(1, Ordering::Release);
        }
    }

    pub(crate) fn add_pin(&self) -> usize {
        self.pins.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub(crate) fn remove_pin(&self) -> usize {
        self.pins.fetch_sub(1, Ordering::AcqRel) - 1
    }

    pub(crate) fn pins(&self) -> usize {
        self.pins.load(Ordering::Acquire)
    }
}

// ── Stores ──────────────────────────────────────────────────────

/// Heap array owned by the handle layer.
///
/// The elements are held as a raw pointer rather than a `Box`, so that
/// views and pins can alias them without retagging the allocation.
pub(crate) struct ArrayStore<T> {
    pub(crate) header: Header,
    data: NonNull<[T]>,
}

// SAFETY: element access goes through the header's borrow flag, which
// admits either shared readers or one writer at a time.
unsafe impl<T: Send + Sync> Sync for ArrayStore<T> {}
// SAFETY: the store owns its elements.
unsafe impl<T: Send> Send for ArrayStore<T> {}

impl<T> ArrayStore<T> {
    pub(crate) fn new(data: Box<[T]>) -> Self {
        Self {
            header: Header::default(),
            data: NonNull::from(Box::leak(data)),
        }
    }

    pub(crate) fn base(&self) -> NonNull<T> {
        self.data.cast()
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> Drop for ArrayStore<T> {
    fn drop(&mut self) {
        // SAFETY: `data` came from `Box::leak` in `new` and is released
        // exactly once, here.
        drop(unsafe { Box::from_raw(self.data.as_ptr()) });
    }
}

/// Immutable UTF-8 text.
pub(crate) struct TextStore {
    pub(crate) header: Header,
    text: Arc<str>,
}

impl TextStore {
    pub(crate) fn new(text: Arc<str>) -> Self {
        Self {
            header: Header::default(),
            text,
        }
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }
}

/// Region owned by a [`MemoryManager`].
pub(crate) struct ManagedStore<T> {
    pub(crate) header: Header,
    pub(crate) manager: Box<dyn MemoryManager<T>>,
}

// ── Backing ─────────────────────────────────────────────────────

/// Which kind of storage a handle refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackingKind {
    /// No storage; the handle is empty.
    Empty,
    /// A heap array owned by the handle layer.
    Array,
    /// The UTF-8 buffer of a shared string.
    Text,
    /// A region supplied by a [`MemoryManager`].
    Manager,
}

impl fmt::Display for BackingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "empty",
            Self::Array => "array",
            Self::Text => "text",
            Self::Manager => "manager",
        };
        f.write_str(name)
    }
}

/// Shared reference to a handle's storage.
pub(crate) enum Backing<T: 'static> {
    Empty,
    Array(Arc<ArrayStore<T>>),
    /// Only constructed through `Backing::<u8>::text`.
    Text(Arc<TextStore>),
    Manager(Arc<ManagedStore<T>>),
}

impl<T: 'static> Clone for Backing<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Array(s) => Self::Array(Arc::clone(s)),
            Self::Text(s) => Self::Text(Arc::clone(s)),
            Self::Manager(s) => Self::Manager(Arc::clone(s)),
        }
    }
}

impl Backing<u8> {
    pub(crate) fn text(text: Arc<str>) -> Self {
        Self::Text(Arc::new(TextStore::new(text)))
    }
}

impl<T: 'static> Backing<T> {
    pub(crate) fn kind(&self) -> BackingKind {
        match self {
            Self::Empty => BackingKind::Empty,
            Self::Array(_) => BackingKind::Array,
            Self::Text(_) => BackingKind::Text,
            Self::Manager(_) => BackingKind::Manager,
        }
    }

    pub(crate) fn header(&self) -> Option<&Header> {
        match self {
            Self::Empty => None,
            Self::Array(s) => Some(&s.header),
            Self::Text(s) => Some(&s.header),
            Self::Manager(s) => Some(&s.header),
        }
    }

    /// First element of the store and its element count.
    pub(crate) fn region(&self) -> (NonNull<T>, usize) {
        match self {
            Self::Empty => (NonNull::dangling(), 0),
            Self::Array(s) => (s.base(), s.len()),
            Self::Text(s) => {
                let bytes = s.bytes();
                // Text backing only exists for `T = u8`.
                (NonNull::from(bytes).cast::<T>(), bytes.len())
            }
            Self::Manager(s) => (s.manager.as_ptr(), s.manager.len()),
        }
    }

    /// Same store (or both empty).
    pub(crate) fn same_store(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Array(a), Self::Array(b)) => Arc::ptr_eq(a, b),
            (Self::Text(a), Self::Text(b)) => Arc::ptr_eq(a, b),
            (Self::Manager(a), Self::Manager(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
