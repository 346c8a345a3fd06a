//! Shareable, sliceable handles over contiguous element runs, with
//! pinning for interop.
//!
//! A [`Handle`] can be stored, cloned, and sliced freely; every handle
//! derived from the same storage shares it. Elements are reached through
//! [`HandleView`] guards, which dereference to the window's elements and
//! lend out [`View`](contig_view::View)s for no longer than they live.
//!
//! # Backing kinds
//!
//! | Kind | Constructor | Pinning |
//! |------|-------------|---------|
//! | array | [`Handle::from_vec`], [`AnyArray::handle`] | always succeeds |
//! | text | [`Handle::from_text`] (read-only bytes) | always succeeds |
//! | manager | [`Handle::from_manager`] | delegated to [`MemoryManager::pin`] |
//!
//! ```
//! use contig_handle::Handle;
//!
//! let handle = Handle::from_vec((0..10).collect::<Vec<i32>>());
//! let window = handle.slice(3, 4).unwrap();
//! assert_eq!(window.as_view().unwrap()[0], 3);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod any;
pub mod handle;
pub mod manager;
pub mod pin;
mod store;

pub use any::AnyArray;
pub use contig_core::{HandleError, Mutability, Mutable, ReadOnly};
pub use handle::{Handle, HandleView};
pub use manager::MemoryManager;
pub use pin::Pinned;
pub use store::BackingKind;
