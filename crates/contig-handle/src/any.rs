//! Type-erased arrays.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use contig_core::HandleError;

use crate::handle::Handle;
use crate::store::ArrayStore;

/// A shareable array whose element type is only known at runtime.
///
/// Typed handles are requested with [`AnyArray::handle`] (or
/// [`Handle::from_any_array`]); asking for the wrong element type fails
/// with a type-mismatch error instead of reinterpreting the memory. Every
/// handle obtained from the same `AnyArray` shares its storage.
#[derive(Clone)]
pub struct AnyArray {
    store: Arc<dyn Any + Send + Sync>,
    element_type: &'static str,
    len: usize,
}

impl AnyArray {
    /// Erase the element type of `elements`.
    pub fn new<T: Send + Sync + 'static>(elements: Vec<T>) -> Self {
        Self::from_boxed_slice(elements.into_boxed_slice())
    }

    /// Erase the element type of `elements`.
    pub fn from_boxed_slice<T: Send + Sync + 'static>(elements: Box<[T]>) -> Self {
        let len = elements.len();
        Self {
            store: Arc::new(ArrayStore::new(elements)),
            element_type: std::any::type_name::<T>(),
            len,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Name of the stored element type.
    pub fn element_type_name(&self) -> &'static str {
        self.element_type
    }

    /// Whether the array holds elements of type `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.store.is::<ArrayStore<T>>()
    }

    /// A mutable handle over the whole array, typed as `T`.
    pub fn handle<T: Send + Sync + 'static>(&self) -> Result<Handle<T>, HandleError> {
        Handle::from_any_array(self)
    }

    pub(crate) fn store<T: Send + Sync + 'static>(&self) -> Option<Arc<ArrayStore<T>>> {
        Arc::clone(&self.store).downcast::<ArrayStore<T>>().ok()
    }
}

impl fmt::Debug for AnyArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyArray")
            .field("element_type", &self.element_type)
            .field("len", &self.len)
            .finish()
    }
}
