//! The [`MemoryManager`] capability for externally managed regions.

#![allow(unsafe_code)]

use std::ptr::NonNull;

use contig_core::HandleError;

/// A contiguous region of `T` whose storage is owned outside the handle
/// layer.
///
/// A handle built over a manager projects views from [`as_ptr`] and
/// delegates pinning to [`pin`] / [`unpin`]. Managers that cannot hand
/// out a stable address keep the default [`pin`], which refuses with
/// [`HandleError::NotPinnable`].
///
/// [`as_ptr`]: MemoryManager::as_ptr
/// [`pin`]: MemoryManager::pin
/// [`unpin`]: MemoryManager::unpin
///
/// # Safety
///
/// Implementors must guarantee that, for as long as the manager is alive:
///
/// - [`as_ptr`] returns the same aligned, non-null address on every call,
///   and `as_ptr()..as_ptr() + len()` is initialized memory readable and
///   writable through that pointer,
/// - [`len`](MemoryManager::len) never changes,
/// - nothing outside the manager's handles reads or writes the region
///   while a handle view or pin over it is live,
/// - a pointer returned by a successful [`pin`] stays valid for the rest
///   of the region until the matching [`unpin`] call.
pub unsafe trait MemoryManager<T>: Send + Sync + 'static {
    /// Number of elements in the region.
    fn len(&self) -> usize;

    /// Address of the first element.
    fn as_ptr(&self) -> NonNull<T>;

    /// Fix the region in place and return the address of element
    /// `element_index`.
    ///
    /// Every successful call is balanced by exactly one [`unpin`] call.
    ///
    /// [`unpin`]: MemoryManager::unpin
    fn pin(&self, element_index: usize) -> Result<NonNull<T>, HandleError> {
        let _ = element_index;
        Err(HandleError::NotPinnable {
            reason: "memory manager does not support pinning",
        })
    }

    /// Release one pin taken by [`pin`](MemoryManager::pin).
    fn unpin(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use contig_core::ErrorKind;

    struct Fixed;

    // SAFETY: zero-length region; the dangling pointer is never read.
    unsafe impl MemoryManager<u32> for Fixed {
        fn len(&self) -> usize {
            0
        }

        fn as_ptr(&self) -> NonNull<u32> {
            NonNull::dangling()
        }
    }

    #[test]
    fn default_pin_refuses() {
        let err = Fixed.pin(0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidOperation);
        Fixed.unpin();
    }
}
