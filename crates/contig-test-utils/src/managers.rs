//! Mock memory managers.
//!
//! - [`VecManager`]: owns a heap region, supports pinning, and counts
//!   every pin and unpin in shared [`PinCounters`].
//! - [`UnpinnableManager`]: owns a heap region and refuses every pin.

#![allow(unsafe_code)]

use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use contig_handle::{HandleError, MemoryManager};

/// Heap region released when the owning manager drops.
struct Region<T> {
    data: NonNull<[T]>,
}

impl<T> Region<T> {
    fn new(elements: Vec<T>) -> Self {
        Self {
            data: NonNull::from(Box::leak(elements.into_boxed_slice())),
        }
    }
}

impl<T> Drop for Region<T> {
    fn drop(&mut self) {
        // SAFETY: `data` came from `Box::leak` and is released once.
        drop(unsafe { Box::from_raw(self.data.as_ptr()) });
    }
}

// SAFETY: the region owns its elements; access is arbitrated by the
// handles built over the manager.
unsafe impl<T: Send> Send for Region<T> {}
// SAFETY: as above.
unsafe impl<T: Send + Sync> Sync for Region<T> {}

/// Pin and unpin tallies shared between a [`VecManager`] and the test.
#[derive(Debug, Default)]
pub struct PinCounters {
    pins: AtomicUsize,
    unpins: AtomicUsize,
    last_index: AtomicUsize,
}

impl PinCounters {
    pub fn pins(&self) -> usize {
        self.pins.load(Ordering::SeqCst)
    }

    pub fn unpins(&self) -> usize {
        self.unpins.load(Ordering::SeqCst)
    }

    /// Element index passed to the most recent pin.
    pub fn last_index(&self) -> usize {
        self.last_index.load(Ordering::SeqCst)
    }

    /// Pins not yet balanced by an unpin.
    pub fn outstanding(&self) -> usize {
        self.pins() - self.unpins()
    }
}

/// A pinnable region backed by a `Vec`.
pub struct VecManager<T> {
    region: Region<T>,
    counters: Arc<PinCounters>,
}

impl<T> VecManager<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            region: Region::new(elements),
            counters: Arc::new(PinCounters::default()),
        }
    }

    /// Shared tallies; clone before handing the manager to a handle.
    pub fn counters(&self) -> Arc<PinCounters> {
        Arc::clone(&self.counters)
    }
}

// SAFETY: the region never moves or resizes while the manager lives, and
// pinned addresses stay valid until the manager drops.
unsafe impl<T: Send + Sync + 'static> MemoryManager<T> for VecManager<T> {
    fn len(&self) -> usize {
        self.region.data.len()
    }

    fn as_ptr(&self) -> NonNull<T> {
        self.region.data.cast()
    }

    fn pin(&self, element_index: usize) -> Result<NonNull<T>, HandleError> {
        assert!(element_index <= self.len(), "pin index past end of region");
        self.counters.pins.fetch_add(1, Ordering::SeqCst);
        self.counters.last_index.store(element_index, Ordering::SeqCst);
        // SAFETY: `element_index <= len`, so the result is in bounds or
        // one past the end.
        Ok(unsafe { self.as_ptr().add(element_index) })
    }

    fn unpin(&self) {
        self.counters.unpins.fetch_add(1, Ordering::SeqCst);
    }
}

/// A region whose manager cannot pin.
pub struct UnpinnableManager<T> {
    region: Region<T>,
}

impl<T> UnpinnableManager<T> {
    pub fn new(elements: Vec<T>) -> Self {
        Self {
            region: Region::new(elements),
        }
    }
}

// SAFETY: the region never moves or resizes while the manager lives.
unsafe impl<T: Send + Sync + 'static> MemoryManager<T> for UnpinnableManager<T> {
    fn len(&self) -> usize {
        self.region.data.len()
    }

    fn as_ptr(&self) -> NonNull<T> {
        self.region.data.cast()
    }
}
