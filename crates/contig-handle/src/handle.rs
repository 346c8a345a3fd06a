//! The [`Handle`] type and its view guard.

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use contig_core::{HandleError, Mutability, Mutable, ReadOnly, ViewError};
use contig_view::View;

use crate::any::AnyArray;
use crate::manager::MemoryManager;
use crate::store::{ArrayStore, Backing, BackingKind, Header, ManagedStore};

/// A shareable, sliceable reference to a contiguous run of `T`.
///
/// Cloning or slicing a handle never copies elements: every handle derived
/// from the same storage shares it and only differs in its
/// `start`/`len` window. The storage lives until the last handle (or pin)
/// referring to it is dropped.
///
/// Elements are reached through views ([`Handle::as_view`]), which borrow
/// the whole store: any number of read-only views may be live at once, a
/// mutable view excludes every other view. Conflicting requests fail
/// immediately with [`HandleError::Borrowed`].
///
/// Two handles are equal when they share the same storage, start, and
/// length; element values are never compared.
pub struct Handle<T: 'static, M: Mutability = Mutable> {
    pub(crate) backing: Backing<T>,
    pub(crate) start: usize,
    pub(crate) len: usize,
    _access: PhantomData<M>,
}

impl<T: 'static, M: Mutability> Clone for Handle<T, M> {
    fn clone(&self) -> Self {
        Self::new(self.backing.clone(), self.start, self.len)
    }
}

// ── Construction ────────────────────────────────────────────────

impl<T: 'static, M: Mutability> Handle<T, M> {
    fn new(backing: Backing<T>, start: usize, len: usize) -> Self {
        Self {
            backing,
            start,
            len,
            _access: PhantomData,
        }
    }

    fn whole(backing: Backing<T>) -> Self {
        let (_, len) = backing.region();
        Self::new(backing, 0, len)
    }

    /// A handle over no storage.
    pub fn empty() -> Self {
        Self::new(Backing::Empty, 0, 0)
    }
}

impl<T: 'static> Handle<T, Mutable> {
    /// Take ownership of `elements`.
    pub fn from_vec(elements: Vec<T>) -> Self {
        Self::from_boxed_slice(elements.into_boxed_slice())
    }

    /// Take ownership of `elements`.
    pub fn from_boxed_slice(elements: Box<[T]>) -> Self {
        Self::whole(Backing::Array(Arc::new(ArrayStore::new(elements))))
    }

    /// Wrap a region owned by `manager`.
    pub fn from_manager(manager: impl MemoryManager<T>) -> Self {
        Self::whole(Backing::Manager(Arc::new(ManagedStore {
            header: Header::default(),
            manager: Box::new(manager),
        })))
    }

    /// A typed handle over the array held by `array`.
    ///
    /// Fails with [`ViewError::TypeMismatch`] if the array holds elements
    /// of another type.
    pub fn from_any_array(array: &AnyArray) -> Result<Self, HandleError>
    where
        T: Send + Sync,
    {
        let store = array.store::<T>().ok_or(ViewError::TypeMismatch {
            expected: std::any::type_name::<T>(),
            found: Some(array.element_type_name()),
        })?;
        Ok(Self::whole(Backing::Array(store)))
    }
}

impl Handle<u8, ReadOnly> {
    /// A read-only byte handle over the UTF-8 buffer of `text`.
    ///
    /// Text handles never conflict on borrow: the buffer is immutable.
    pub fn from_text(text: impl Into<Arc<str>>) -> Self {
        Self::whole(Backing::text(text.into()))
    }
}

// ── Access ──────────────────────────────────────────────────────

impl<T: 'static, M: Mutability> Handle<T, M> {
    /// Number of elements in the handle's window.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the window is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element index of the window's start within the backing storage.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Kind of the backing storage.
    pub fn backing_kind(&self) -> BackingKind {
        self.backing.kind()
    }

    /// Number of live pins over the backing storage, from any handle.
    pub fn pin_count(&self) -> usize {
        self.backing.header().map_or(0, Header::pins)
    }

    /// The elements from `start` to the end of the window.
    pub fn slice_from(&self, start: usize) -> Result<Self, HandleError> {
        let len = self.len.checked_sub(start).ok_or(ViewError::OutOfBounds {
            start,
            len: 0,
            available: self.len,
        })?;
        Ok(Self::new(self.backing.clone(), self.start + start, len))
    }

    /// `len` elements of the window starting at `start`.
    pub fn slice(&self, start: usize, len: usize) -> Result<Self, HandleError> {
        ViewError::check_range(start, len, self.len)?;
        Ok(Self::new(self.backing.clone(), self.start + start, len))
    }

    /// A read-only handle over the same window.
    pub fn as_read_only(&self) -> Handle<T, ReadOnly> {
        Handle::new(self.backing.clone(), self.start, self.len)
    }

    /// Project the window as a view with the handle's own mutability.
    ///
    /// A mutable view needs exclusive access to the backing storage; a
    /// read-only view shares it with other read-only views.
    pub fn as_view(&self) -> Result<HandleView<'_, T, M>, HandleError> {
        self.project()
    }

    /// Project the window as a read-only view.
    pub fn as_read_only_view(&self) -> Result<HandleView<'_, T, ReadOnly>, HandleError> {
        self.project()
    }

    /// Copy the window's elements into a new `Vec`.
    pub fn to_vec(&self) -> Result<Vec<T>, HandleError>
    where
        T: Clone,
    {
        Ok(self.as_read_only_view()?.to_vec())
    }

    fn project<N: Mutability>(&self) -> Result<HandleView<'_, T, N>, HandleError> {
        let exclusive = N::WRITABLE;
        let release = match &self.backing {
            Backing::Empty | Backing::Text(_) => None,
            Backing::Array(s) => Some(&s.header),
            Backing::Manager(s) => Some(&s.header),
        };
        if let Some(header) = release {
            if let Err(e) = header.try_borrow(exclusive) {
                tracing::debug!(
                    target: "contig::handle",
                    kind = %self.backing.kind(),
                    start = self.start,
                    len = self.len,
                    exclusive,
                    "view borrow conflict"
                );
                return Err(e);
            }
        }
        let (base, capacity) = self.backing.region();
        // SAFETY: the store behind `self.backing` keeps `capacity`
        // elements alive at `base` while `self` is borrowed, and the
        // borrow flag taken above excludes conflicting views. Text is
        // immutable and only ever viewed read-only.
        let view = unsafe { View::from_storage_range(base, capacity, self.start, self.len) };
        match view {
            Ok(view) => Ok(HandleView {
                view,
                release: release.map(|h| (h, exclusive)),
            }),
            Err(e) => {
                if let Some(header) = release {
                    header.release_borrow(exclusive);
                }
                Err(e.into())
            }
        }
    }
}

// ── Trait impls ─────────────────────────────────────────────────

impl<T: 'static> From<Handle<T, Mutable>> for Handle<T, ReadOnly> {
    fn from(handle: Handle<T, Mutable>) -> Self {
        Handle::new(handle.backing, handle.start, handle.len)
    }
}

impl<T: 'static> From<Vec<T>> for Handle<T, Mutable> {
    fn from(elements: Vec<T>) -> Self {
        Self::from_vec(elements)
    }
}

impl From<&str> for Handle<u8, ReadOnly> {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl<T: 'static, M: Mutability> Default for Handle<T, M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: 'static, M: Mutability, N: Mutability> PartialEq<Handle<T, N>> for Handle<T, M> {
    fn eq(&self, other: &Handle<T, N>) -> bool {
        self.backing.same_store(&other.backing) && self.start == other.start && self.len == other.len
    }
}

impl<T: 'static, M: Mutability> Eq for Handle<T, M> {}

impl<T: 'static, M: Mutability> fmt::Debug for Handle<T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("access", &M::NAME)
            .field("backing", &self.backing.kind())
            .field("start", &self.start)
            .field("len", &self.len)
            .finish()
    }
}

// ── HandleView ──────────────────────────────────────────────────

/// A view projected from a [`Handle`], holding a borrow of its storage.
///
/// Dereferences to `[T]` (mutably only when `M` is [`Mutable`]). Views
/// with the full scan and copy API come from [`HandleView::view`] and
/// [`HandleView::view_mut`]; both reborrow the guard, so no view outlives
/// it. The borrow is released when the guard is dropped.
///
/// ```
/// use contig_handle::Handle;
///
/// let handle = Handle::from_vec(vec![4u32, 2, 4]);
/// let mut guard = handle.as_view().unwrap();
/// guard[1] = 4;
/// assert_eq!(guard.view().count(4), 3);
/// guard.view_mut().fill(0);
/// assert_eq!(guard.as_slice(), &[0, 0, 0]);
/// ```
///
/// A view taken from the guard cannot be kept past the guard:
///
/// ```compile_fail
/// use contig_handle::Handle;
///
/// let handle = Handle::from_vec(vec![1u32, 2, 3]);
/// let escaped = {
///     let guard = handle.as_read_only_view().unwrap();
///     guard.view()
/// };
/// let mut writer = handle.as_view().unwrap();
/// writer[0] = 9;
/// assert_eq!(escaped[0], 9);
/// ```
///
/// Nor can the guard's own view be copied out of it:
///
/// ```compile_fail
/// use contig_handle::{Handle, ReadOnly};
/// use contig_view::View;
///
/// let handle = Handle::from_vec(vec![1u32, 2, 3]);
/// let guard = handle.as_read_only_view().unwrap();
/// let escaped: View<'_, u32, ReadOnly> = *guard;
/// ```
pub struct HandleView<'h, T, M: Mutability = Mutable> {
    view: View<'h, T, M>,
    release: Option<(&'h Header, bool)>,
}

impl<T, M: Mutability> HandleView<'_, T, M> {
    /// A read-only view of the window, borrowed from the guard.
    pub fn view(&self) -> View<'_, T, ReadOnly> {
        self.view.as_read_only()
    }

    /// The window's elements.
    pub fn as_slice(&self) -> &[T] {
        self.view.as_slice()
    }

    /// Byte offset of the window from the start of the backing storage.
    pub fn byte_offset(&self) -> usize {
        self.view.byte_offset()
    }
}

impl<T> HandleView<'_, T, Mutable> {
    /// A mutable view of the window, borrowed from the guard.
    pub fn view_mut(&mut self) -> View<'_, T, Mutable> {
        self.view.reborrow()
    }

    /// The window's elements, for writing.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.view.as_mut_slice()
    }
}

impl<T, M: Mutability> Deref for HandleView<'_, T, M> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.view.as_slice()
    }
}

impl<T> DerefMut for HandleView<'_, T, Mutable> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.view.as_mut_slice()
    }
}

impl<T, M: Mutability> Drop for HandleView<'_, T, M> {
    fn drop(&mut self) {
        if let Some((header, exclusive)) = self.release {
            header.release_borrow(exclusive);
        }
    }
}

impl<T: fmt::Debug, M: Mutability> fmt::Debug for HandleView<'_, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contig_core::ErrorKind;

    #[test]
    fn slice_then_view_reads_backing_elements() {
        let h = Handle::from_vec((0..10).collect::<Vec<i32>>());
        let s = h.slice(3, 4).unwrap();
        assert_eq!(s.start(), 3);
        let v = s.as_view().unwrap();
        assert_eq!(v[0], 3);
        assert_eq!(v.len(), 4);
        assert_eq!(v.byte_offset(), 12);
    }

    #[test]
    fn slicing_is_relative_to_window() {
        let h = Handle::from_vec(vec![0u8; 10]);
        let s = h.slice_from(2).unwrap().slice(1, 5).unwrap();
        assert_eq!((s.start(), s.len()), (3, 5));
        assert!(s.slice(4, 2).is_err());
        let err = h.slice_from(11).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bounds);
        assert!(h.slice_from(10).unwrap().is_empty());
    }

    #[test]
    fn writes_are_shared_between_handles() {
        let h = Handle::from_vec(vec![0u32; 6]);
        let tail = h.slice_from(4).unwrap();
        tail.as_view().unwrap().fill(7);
        assert_eq!(h.to_vec().unwrap(), vec![0, 0, 0, 0, 7, 7]);
    }

    #[test]
    fn equality_is_identity_and_range() {
        let h = Handle::from_vec(vec![1, 2, 3]);
        let same = h.slice(0, 3).unwrap();
        let other = Handle::from_vec(vec![1, 2, 3]);
        assert_eq!(h, same);
        assert_eq!(h, h.as_read_only());
        assert_ne!(h, other);
        assert_ne!(h, h.slice(1, 2).unwrap());
        assert_eq!(Handle::<u8>::empty(), Handle::<u8>::default());
    }

    #[test]
    fn mutable_view_is_exclusive() {
        let h = Handle::from_vec(vec![1, 2, 3]);
        let alias = h.clone();
        let guard = h.as_view().unwrap();
        assert_eq!(
            alias.as_view().unwrap_err(),
            HandleError::Borrowed { exclusive: true }
        );
        assert_eq!(alias.as_read_only_view().unwrap_err().kind(), ErrorKind::Borrowed);
        drop(guard);
        let read_only = h.as_read_only();
        let r1 = alias.as_read_only_view().unwrap();
        let r2 = read_only.as_view().unwrap();
        assert_eq!(r1.as_slice(), r2.as_slice());
        assert!(h.as_view().is_err());
    }

    #[test]
    fn text_handles_are_read_only_and_never_conflict() {
        let h = Handle::from_text("hello world");
        assert_eq!(h.backing_kind(), BackingKind::Text);
        let world = h.slice(6, 5).unwrap();
        let a = h.as_view().unwrap();
        let b = world.as_view().unwrap();
        assert_eq!(a.view().index_of(b' '), Some(5));
        assert_eq!(b.as_slice(), b"world");
        assert_eq!(Handle::from("abc").len(), 3);
    }

    #[test]
    fn widening_keeps_window() {
        let h = Handle::from_vec(vec![1u64, 2, 3, 4]).slice(1, 2).unwrap();
        let r: Handle<u64, ReadOnly> = h.clone().into();
        assert_eq!(r.to_vec().unwrap(), vec![2, 3]);
        assert_eq!(r, h);
    }

    #[test]
    fn empty_handle_projects_empty_view() {
        let h: Handle<i16> = Handle::empty();
        assert_eq!(h.backing_kind(), BackingKind::Empty);
        assert!(h.as_view().unwrap().is_empty());
        assert_eq!(h.pin_count(), 0);
    }

    #[test]
    fn debug_names_backing() {
        let h = Handle::from_vec(vec![1]);
        let s = format!("{h:?}");
        assert!(s.contains("Array"));
        assert!(s.contains("Mutable"));
    }

    #[test]
    fn guard_views_reborrow_the_guard() {
        let h = Handle::from_vec(vec![3u8, 1, 3, 2]);
        let mut guard = h.as_view().unwrap();
        assert_eq!(guard.view().last_index_of(3), Some(2));
        {
            let mut tail = guard.view_mut().slice_from(2).unwrap();
            tail.fill(8);
        }
        guard[0] = 5;
        assert_eq!(guard.as_slice(), &[5, 1, 8, 8]);
        assert!(h.as_read_only_view().is_err());
        drop(guard);
        assert_eq!(h.to_vec().unwrap(), vec![5, 1, 8, 8]);
    }

    #[test]
    fn borrow_is_held_until_the_guard_drops() {
        let h = Handle::from_vec(vec![0u32; 4]);
        let reader = h.as_read_only_view().unwrap();
        let first = reader.view().slice(0, 2).unwrap().to_vec();
        assert_eq!(first, vec![0, 0]);
        assert_eq!(
            h.as_view().unwrap_err(),
            HandleError::Borrowed { exclusive: true }
        );
        drop(reader);
        h.as_view().unwrap().as_mut_slice()[3] = 1;
        assert_eq!(h.to_vec().unwrap(), vec![0, 0, 0, 1]);
    }

    fn assert_send_sync<S: Send + Sync>() {}

    #[test]
    fn handles_and_guards_are_thread_safe() {
        assert_send_sync::<Handle<u32>>();
        assert_send_sync::<Handle<u8, ReadOnly>>();
        assert_send_sync::<HandleView<'static, u32, ReadOnly>>();
        assert_send_sync::<HandleView<'static, u32, Mutable>>();
    }

    #[test]
    fn read_only_handles_are_shared_across_threads() {
        let text = Handle::from_text("the quick brown fox");
        let numbers = Handle::from_vec((0..1000u32).collect()).as_read_only();
        std::thread::scope(|scope| {
            for i in 0..4u32 {
                let text = text.clone();
                let numbers = numbers.clone();
                scope.spawn(move || {
                    let t = text.as_view().unwrap();
                    assert_eq!(t.view().index_of_seq(b"brown"), Some(10));
                    let n = numbers.as_view().unwrap();
                    assert_eq!(n.view().index_of(i * 100), Some(i as usize * 100));
                });
            }
        });
        assert_eq!(numbers.to_vec().unwrap().len(), 1000);
    }

    #[test]
    fn writer_on_one_thread_blocks_readers_on_another() {
        use std::sync::Barrier;

        let h = Handle::from_vec(vec![1u16, 2, 3]);
        let held = Barrier::new(2);
        let checked = Barrier::new(2);
        std::thread::scope(|scope| {
            scope.spawn(|| {
                let mut guard = h.as_view().unwrap();
                guard[0] = 10;
                held.wait();
                checked.wait();
            });
            held.wait();
            assert_eq!(
                h.as_read_only_view().unwrap_err(),
                HandleError::Borrowed { exclusive: false }
            );
            checked.wait();
        });
        assert_eq!(h.to_vec().unwrap(), vec![10, 2, 3]);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sliced_handle_view_matches_slice(
                data in proptest::collection::vec(any::<u32>(), 0..64),
                a in 0usize..64,
                b in 0usize..64,
            ) {
                let start = a.min(data.len());
                let len = b.min(data.len() - start);
                let h = Handle::from_vec(data.clone());
                let s = h.slice(start, len).unwrap();
                prop_assert_eq!(s.to_vec().unwrap(), data[start..start + len].to_vec());
            }
        }
    }
}
