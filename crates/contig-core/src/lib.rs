//! Core types and contracts for contig memory views.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by every layer of the workspace: error types,
//! the mutability capability markers that parameterize views and
//! handles, and the [`Plain`] element contract required for raw-address
//! construction and bulk zeroing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod error;
pub mod mutability;
pub mod plain;

pub use error::{ErrorKind, HandleError, ViewError};
pub use mutability::{Mutability, Mutable, ReadOnly};
pub use plain::Plain;
