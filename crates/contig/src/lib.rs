//! Contig: bounds-checked views, vectorized scans, and pinnable handles
//! over contiguous memory.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all contig sub-crates. For most users, adding `contig` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use contig::prelude::*;
//!
//! // A shareable handle over a heap array.
//! let handle = Handle::from_vec((0..10u32).collect());
//! let window = handle.slice(3, 4).unwrap();
//!
//! // Project a view and search it.
//! {
//!     let mut guard = window.as_view().unwrap();
//!     assert_eq!(guard[0], 3);
//!     assert_eq!(guard.view().index_of(5), Some(2));
//!     guard.view_mut().fill(0);
//! }
//! assert_eq!(handle.to_vec().unwrap(), vec![0, 1, 2, 0, 0, 0, 0, 7, 8, 9]);
//!
//! // Views also wrap plain slices.
//! let sorted = View::from_slice(&[1, 3, 5, 9]);
//! assert_eq!(sorted.binary_search(&4), !2);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `contig-core` | Errors, mutability markers, the `Plain` contract |
//! | [`scan`] | `contig-scan` | Search and comparison over raw runs, `Scanner`, `ScanConfig` |
//! | [`view`] | `contig-view` | Stack-scoped views and the copy/fill/clear primitives |
//! | [`handle`] | `contig-handle` | Shareable handles, memory managers, pinning |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and contracts (`contig-core`).
///
/// Contains the error types ([`types::ViewError`], [`types::HandleError`]),
/// the capability markers [`types::Mutable`] and [`types::ReadOnly`], and
/// the [`types::Plain`] element contract.
pub use contig_core as types;

/// Search and comparison over contiguous runs (`contig-scan`).
///
/// Free functions use the detected vector width; build a
/// [`scan::Scanner`] from a [`scan::ScanConfig`] to cap it.
pub use contig_scan as scan;

/// Non-owning views (`contig-view`).
pub use contig_view as view;

/// Shareable, pinnable handles (`contig-handle`).
///
/// [`handle::Handle`] for heap arrays, text and manager-owned regions;
/// [`handle::Pinned`] for stable addresses; [`handle::AnyArray`] for
/// runtime-typed storage.
pub use contig_handle as handle;

/// Common imports for typical contig usage.
///
/// ```rust
/// use contig::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use contig_core::{ErrorKind, HandleError, Mutability, Mutable, Plain, ReadOnly, ViewError};

    // Scan engine
    pub use contig_scan::{ScanConfig, ScanElement, Scanner, VectorWidth};

    // Views
    pub use contig_view::View;

    // Handles
    pub use contig_handle::{AnyArray, Handle, HandleView, MemoryManager, Pinned};
}
