//! The [`View`] type: construction, access, and slicing.

#![allow(unsafe_code)]

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::NonNull;

use contig_core::{Mutability, Mutable, Plain, ReadOnly, ViewError};

/// Where a view's elements live.
///
/// Exactly one of the two: borrowed storage with a known extent, or a raw
/// address supplied by the caller.
#[derive(Clone, Copy)]
enum Origin {
    /// Borrowed storage whose first byte is `base`, spanning `extent` bytes.
    Managed { base: NonNull<u8>, extent: usize },
    /// A caller-supplied address; the caller vouches for the extent.
    Raw { base: NonNull<u8> },
}

impl Origin {
    fn base(self) -> NonNull<u8> {
        match self {
            Origin::Managed { base, .. } | Origin::Raw { base } => base,
        }
    }
}

/// A non-owning, bounds-checked reference to a contiguous run of `T`.
///
/// `M` is the mutability capability: [`Mutable`] (the default) behaves
/// like `&'a mut [T]`, [`ReadOnly`] like `&'a [T]` and is `Copy`. A
/// mutable view widens to a read-only one through [`View::as_read_only`]
/// or `From`; there is no conversion back.
///
/// The element pointer is `base + byte_offset`, where `base` is the first
/// byte of the storage the view was built over. Slicing only moves
/// `byte_offset` and shrinks `len`, so every view derived from the same
/// storage reports offsets against the same base.
pub struct View<'a, T, M: Mutability = Mutable> {
    origin: Origin,
    byte_offset: usize,
    len: usize,
    _marker: PhantomData<(&'a mut [T], M)>,
}

// SAFETY: a mutable view is an exclusive borrow, like `&mut [T]`.
unsafe impl<T: Send> Send for View<'_, T, Mutable> {}
// SAFETY: a read-only view is a shared borrow, like `&[T]`.
unsafe impl<T: Sync> Send for View<'_, T, ReadOnly> {}
// SAFETY: shared access to a view only reads elements.
unsafe impl<T: Sync, M: Mutability> Sync for View<'_, T, M> {}

impl<T> Clone for View<'_, T, ReadOnly> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for View<'_, T, ReadOnly> {}

// ── Construction ────────────────────────────────────────────────

impl<'a, T, M: Mutability> View<'a, T, M> {
    fn managed(ptr: NonNull<T>, len: usize, byte_offset: usize, view_len: usize) -> Self {
        let view = Self {
            origin: Origin::Managed {
                base: ptr.cast(),
                extent: len * size_of::<T>(),
            },
            byte_offset,
            len: view_len,
            _marker: PhantomData,
        };
        view.debug_check_extent();
        view
    }

    /// An empty view.
    pub fn empty() -> Self {
        Self::managed(NonNull::dangling(), 0, 0, 0)
    }

    /// Build a view over `len` elements starting at `ptr`.
    ///
    /// Only available for [`Plain`] element types: nothing tracks the
    /// ownership of memory behind a raw address, so the elements must not
    /// embed references or own resources. A null `ptr` is accepted only
    /// with `len == 0`.
    ///
    /// # Safety
    ///
    /// For the whole lifetime `'a`:
    ///
    /// - `ptr` must be aligned for `T` and `ptr..ptr + len` must be
    ///   readable (and writable if `M` is [`Mutable`]) initialized memory,
    /// - no other reference may write those elements while the view
    ///   reads them, and a mutable view must be the only accessor.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` is null with a non-zero `len`, or if the run spans
    /// more than `isize::MAX` bytes.
    pub unsafe fn from_raw_parts(ptr: *mut T, len: usize) -> Self
    where
        T: Plain,
    {
        let bytes = len.checked_mul(size_of::<T>());
        assert!(
            bytes.is_some_and(|b| b <= isize::MAX as usize),
            "raw view of {len} elements exceeds the address space"
        );
        let base = match NonNull::new(ptr) {
            Some(p) => p.cast(),
            None => {
                assert!(len == 0, "null address with non-zero length {len}");
                NonNull::<T>::dangling().cast()
            }
        };
        Self {
            origin: Origin::Raw { base },
            byte_offset: 0,
            len,
            _marker: PhantomData,
        }
    }

    /// A view over `len` elements starting at element `start` of a
    /// storage region of `capacity` elements at `base`.
    ///
    /// For owners of shared storage that arbitrate access themselves, such
    /// as handles. Byte offsets are reported against `base`.
    ///
    /// # Safety
    ///
    /// `base..base + capacity` must be aligned, initialized storage that
    /// stays valid for `'a`. For the whole of `'a`, nothing may write the
    /// viewed elements except through this view, and a mutable view must
    /// be their only accessor.
    pub unsafe fn from_storage_range(
        base: NonNull<T>,
        capacity: usize,
        start: usize,
        len: usize,
    ) -> Result<Self, ViewError> {
        ViewError::check_range(start, len, capacity)?;
        Ok(Self::managed(base, capacity, start * size_of::<T>(), len))
    }

    fn debug_check_extent(&self) {
        if let Origin::Managed { extent, .. } = self.origin {
            debug_assert!(self.byte_offset + self.len * size_of::<T>() <= extent);
        }
    }
}

impl<'a, T> View<'a, T, ReadOnly> {
    /// A read-only view over a whole slice.
    pub fn from_slice(slice: &'a [T]) -> Self {
        Self::managed(NonNull::from(slice).cast(), slice.len(), 0, slice.len())
    }

    /// A read-only view over `len` elements of `slice` starting at `start`.
    pub fn from_slice_range(slice: &'a [T], start: usize, len: usize) -> Result<Self, ViewError> {
        ViewError::check_range(start, len, slice.len())?;
        Ok(Self::managed(
            NonNull::from(slice).cast(),
            slice.len(),
            start * size_of::<T>(),
            len,
        ))
    }

    /// A read-only view holding the elements of `storage`, which must be
    /// a `Vec<T>` or `Box<[T]>`.
    pub fn from_any(storage: &'a dyn Any) -> Result<Self, ViewError>
    where
        T: 'static,
    {
        if let Some(v) = storage.downcast_ref::<Vec<T>>() {
            Ok(Self::from_slice(v))
        } else if let Some(b) = storage.downcast_ref::<Box<[T]>>() {
            Ok(Self::from_slice(b))
        } else {
            Err(type_mismatch::<T>())
        }
    }
}

impl<'a> View<'a, u8, ReadOnly> {
    /// A read-only byte view over the UTF-8 buffer of a string.
    ///
    /// Text is only ever exposed read-only: writing through the view
    /// could break the UTF-8 invariant of the string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Self {
        Self::from_slice(text.as_bytes())
    }
}

impl<'a, T> View<'a, T, Mutable> {
    /// A mutable view over a whole slice.
    pub fn from_mut_slice(slice: &'a mut [T]) -> Self {
        let len = slice.len();
        Self::managed(NonNull::from(slice).cast(), len, 0, len)
    }

    /// A mutable view over `len` elements of `slice` starting at `start`.
    pub fn from_mut_slice_range(
        slice: &'a mut [T],
        start: usize,
        len: usize,
    ) -> Result<Self, ViewError> {
        let available = slice.len();
        ViewError::check_range(start, len, available)?;
        Ok(Self::managed(
            NonNull::from(slice).cast(),
            available,
            start * size_of::<T>(),
            len,
        ))
    }

    /// A mutable view over the elements of `storage`, which must be a
    /// `Vec<T>` or `Box<[T]>`.
    pub fn from_any_mut(storage: &'a mut dyn Any) -> Result<Self, ViewError>
    where
        T: 'static,
    {
        if storage.is::<Vec<T>>() {
            let v = storage.downcast_mut::<Vec<T>>().ok_or_else(type_mismatch::<T>)?;
            Ok(Self::from_mut_slice(v))
        } else {
            let b = storage
                .downcast_mut::<Box<[T]>>()
                .ok_or_else(type_mismatch::<T>)?;
            Ok(Self::from_mut_slice(b))
        }
    }
}

fn type_mismatch<T>() -> ViewError {
    ViewError::TypeMismatch {
        expected: std::any::type_name::<T>(),
        found: None,
    }
}

// ── Access ──────────────────────────────────────────────────────

impl<'a, T, M: Mutability> View<'a, T, M> {
    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Byte offset of the first element from the start of the storage the
    /// view was built over.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// Whether the view was built over a raw address.
    pub fn is_raw(&self) -> bool {
        matches!(self.origin, Origin::Raw { .. })
    }

    fn ptr(&self) -> *mut T {
        self.origin
            .base()
            .as_ptr()
            .wrapping_add(self.byte_offset)
            .cast::<T>()
    }

    /// Address of the first element.
    pub fn as_ptr(&self) -> *const T {
        self.ptr()
    }

    /// The elements as a shared slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: construction and slicing keep `ptr..ptr + len` inside
        // the borrowed (or caller-vouched) storage for `'a`.
        unsafe { std::slice::from_raw_parts(self.ptr(), self.len) }
    }

    /// Consume the view, returning a slice with the full lifetime `'a`.
    pub fn into_slice(self) -> &'a [T] {
        // SAFETY: as for `as_slice`; the view is consumed so no mutable
        // alias outlives this call.
        unsafe { std::slice::from_raw_parts(self.ptr(), self.len) }
    }

    /// Iterate over the elements.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Copy the elements into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, ViewError> {
        ViewError::check_index(index, self.len)?;
        Ok(&self.as_slice()[index])
    }

    /// A read-only view of the same elements.
    pub fn as_read_only(&self) -> View<'_, T, ReadOnly> {
        View {
            origin: self.origin,
            byte_offset: self.byte_offset,
            len: self.len,
            _marker: PhantomData,
        }
    }

    /// If `other` shares memory with this view, the element offset of
    /// `other`'s first element relative to this view's first element.
    ///
    /// Empty views and zero-sized element types never overlap.
    pub fn overlaps<N: Mutability>(&self, other: &View<'_, T, N>) -> Option<isize> {
        let size = size_of::<T>();
        if size == 0 || self.is_empty() || other.is_empty() {
            return None;
        }
        let a = self.ptr() as usize;
        let b = other.ptr() as usize;
        let a_end = a + self.len * size;
        let b_end = b + other.len * size;
        if a < b_end && b < a_end {
            Some((b as isize - a as isize) / size as isize)
        } else {
            None
        }
    }
}

impl<'a, T> View<'a, T, Mutable> {
    /// Address of the first element, for writing.
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr()
    }

    /// The elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: a mutable view is the only accessor of its range.
        unsafe { std::slice::from_raw_parts_mut(self.ptr(), self.len) }
    }

    /// Consume the view, returning a mutable slice with the full
    /// lifetime `'a`.
    pub fn into_mut_slice(self) -> &'a mut [T] {
        // SAFETY: as for `as_mut_slice`; the view is consumed.
        unsafe { std::slice::from_raw_parts_mut(self.ptr(), self.len) }
    }

    /// Iterate mutably over the elements.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ViewError> {
        ViewError::check_index(index, self.len)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// A shorter-lived mutable view of the same elements.
    pub fn reborrow(&mut self) -> View<'_, T, Mutable> {
        View {
            origin: self.origin,
            byte_offset: self.byte_offset,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

// ── Slicing ─────────────────────────────────────────────────────

impl<'a, T, M: Mutability> View<'a, T, M> {
    fn narrowed(&self, start: usize, len: usize) -> Self {
        let view = Self {
            origin: self.origin,
            byte_offset: self.byte_offset + start * size_of::<T>(),
            len,
            _marker: PhantomData,
        };
        view.debug_check_extent();
        view
    }

    /// The elements from `start` to the end.
    ///
    /// `start == len()` yields an empty view.
    pub fn slice_from(self, start: usize) -> Result<Self, ViewError> {
        let len = self.len.checked_sub(start).ok_or(ViewError::OutOfBounds {
            start,
            len: 0,
            available: self.len,
        })?;
        Ok(self.narrowed(start, len))
    }

    /// `len` elements starting at `start`.
    pub fn slice(self, start: usize, len: usize) -> Result<Self, ViewError> {
        ViewError::check_range(start, len, self.len)?;
        Ok(self.narrowed(start, len))
    }

    /// Split into `[0, mid)` and `[mid, len)`.
    pub fn split_at(self, mid: usize) -> Result<(Self, Self), ViewError> {
        ViewError::check_range(0, mid, self.len)?;
        Ok((self.narrowed(0, mid), self.narrowed(mid, self.len - mid)))
    }
}

// ── Trait impls ─────────────────────────────────────────────────

impl<'a, T> From<View<'a, T, Mutable>> for View<'a, T, ReadOnly> {
    fn from(view: View<'a, T, Mutable>) -> Self {
        View {
            origin: view.origin,
            byte_offset: view.byte_offset,
            len: view.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> From<&'a [T]> for View<'a, T, ReadOnly> {
    fn from(slice: &'a [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<'a, T> From<&'a mut [T]> for View<'a, T, Mutable> {
    fn from(slice: &'a mut [T]) -> Self {
        Self::from_mut_slice(slice)
    }
}

impl<'a> From<&'a str> for View<'a, u8, ReadOnly> {
    fn from(text: &'a str) -> Self {
        Self::from_str(text)
    }
}

impl<T> Default for View<'_, T, ReadOnly> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, M: Mutability> AsRef<[T]> for View<'_, T, M> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for View<'_, T, Mutable> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, M: Mutability> Index<usize> for View<'_, T, M> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for View<'_, T, Mutable> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match ViewError::check_index(index, self.len) {
            Ok(()) => &mut self.as_mut_slice()[index],
            Err(e) => panic!("{e}"),
        }
    }
}

impl<'a, T, M: Mutability> IntoIterator for &'a View<'_, T, M> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq, M: Mutability, N: Mutability> PartialEq<View<'_, T, N>> for View<'_, T, M> {
    fn eq(&self, other: &View<'_, T, N>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: fmt::Debug, M: Mutability> fmt::Debug for View<'_, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("View");
        s.field("access", &M::NAME)
            .field("byte_offset", &self.byte_offset)
            .field("len", &self.len);
        match self.origin {
            Origin::Managed { extent, .. } => s.field("extent", &extent),
            Origin::Raw { .. } => s.field("raw", &true),
        };
        s.field("elements", &self.as_slice()).finish()
    }
}
