//! Pinning: stable element addresses for interop call sites.
//!
//! A [`Pinned`] token keeps the backing storage alive and fixed in place
//! until it is released. Heap arrays and text never move once handed to a
//! handle, so pinning them only counts the pin; manager-backed storage
//! delegates to [`MemoryManager::pin`](crate::MemoryManager::pin).

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::ptr::NonNull;

use contig_core::{HandleError, Mutability, Mutable};

use crate::handle::Handle;
use crate::store::Backing;

/// A stable address for a handle's window, valid until the token is
/// released (explicitly or on drop).
///
/// Releasing is deterministic and non-blocking: dropping the token on any
/// exit path, including unwinding, releases the pin.
#[must_use = "dropping a Pinned releases the pin immediately"]
pub struct Pinned<T: 'static, M: Mutability = Mutable> {
    backing: Backing<T>,
    ptr: NonNull<T>,
    start: usize,
    len: usize,
    _access: PhantomData<M>,
}

// SAFETY: the token shares the store like a handle does; the pointer is
// into that store.
unsafe impl<T: Send + Sync, M: Mutability> Send for Pinned<T, M> {}
// SAFETY: shared access to the token only reads its address and length.
unsafe impl<T: Send + Sync, M: Mutability> Sync for Pinned<T, M> {}

impl<T: 'static, M: Mutability> Handle<T, M> {
    /// Pin the backing storage and return a stable address for the window.
    ///
    /// Fails with [`HandleError::NotPinnable`] when the storage is owned by
    /// a memory manager that cannot pin.
    pub fn pin(&self) -> Result<Pinned<T, M>, HandleError> {
        let ptr = match &self.backing {
            Backing::Empty => NonNull::dangling(),
            Backing::Array(_) | Backing::Text(_) => {
                let (base, _) = self.backing.region();
                // SAFETY: `start <= capacity` holds for every handle window.
                unsafe { base.add(self.start) }
            }
            Backing::Manager(store) => match store.manager.pin(self.start) {
                Ok(ptr) => ptr,
                Err(e) => {
                    tracing::debug!(
                        target: "contig::handle",
                        kind = %self.backing.kind(),
                        start = self.start,
                        len = self.len,
                        error = %e,
                        "pin refused"
                    );
                    return Err(e);
                }
            },
        };
        if let Some(header) = self.backing.header() {
            let pins = header.add_pin();
            tracing::trace!(
                target: "contig::handle",
                kind = %self.backing.kind(),
                start = self.start,
                len = self.len,
                pins,
                "pin acquired"
            );
        }
        Ok(Pinned {
            backing: self.backing.clone(),
            ptr,
            start: self.start,
            len: self.len,
            _access: PhantomData,
        })
    }
}

impl<T: 'static, M: Mutability> Pinned<T, M> {
    /// Address of the first element of the pinned window.
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Number of elements behind [`as_ptr`](Self::as_ptr).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the pinned window is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Release the pin.
    pub fn release(self) {
        drop(self);
    }
}

impl<T: 'static> Pinned<T, Mutable> {
    /// Address of the first element, for writing.
    ///
    /// Writes through this pointer must not overlap a live view of the
    /// same storage.
    pub fn as_mut_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T: 'static, M: Mutability> Drop for Pinned<T, M> {
    fn drop(&mut self) {
        let Some(header) = self.backing.header() else {
            return;
        };
        if let Backing::Manager(store) = &self.backing {
            store.manager.unpin();
        }
        let pins = header.remove_pin();
        tracing::trace!(
            target: "contig::handle",
            kind = %self.backing.kind(),
            start = self.start,
            len = self.len,
            pins,
            "pin released"
        );
    }
}

impl<T: 'static, M: Mutability> fmt::Debug for Pinned<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pinned")
            .field("backing", &self.backing.kind())
            .field("ptr", &self.ptr)
            .field("len", &self.len)
            .finish()
    }
}
