//! Non-owning, bounds-checked views over contiguous element runs.
//!
//! A [`View`] addresses a run of `T` borrowed from a slice, a string's
//! UTF-8 buffer, type-erased storage, or a raw address, without copying.
//! One generic type covers both flavours: `View<'a, T, Mutable>` writes,
//! `View<'a, T, ReadOnly>` only reads and is `Copy`.
//!
//! Every range is validated when a view is built or sliced; once built, a
//! view never discovers an out-of-bounds access later.
//!
//! ```
//! use contig_view::View;
//!
//! let mut data = [5, 3, 9, 1, 3];
//! let mut view = View::from_mut_slice(&mut data);
//! assert_eq!(view.last_index_of(3), Some(4));
//!
//! let mut tail = view.reborrow().slice_from(3).unwrap();
//! tail.fill(0);
//! assert_eq!(data, [5, 3, 9, 0, 0]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

mod primitives;
mod scan;
pub mod view;

pub use contig_core::{Mutability, Mutable, ReadOnly, ViewError};
pub use view::View;
