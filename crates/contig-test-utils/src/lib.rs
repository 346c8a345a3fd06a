//! Test utilities and mock types for contig development.
//!
//! Provides naive reference scans ([`naive`]) to cross-check the Scan
//! Engine against, and mock [`MemoryManager`] implementations in
//! [`managers`] for exercising manager-backed handles.
//!
//! [`MemoryManager`]: contig_handle::MemoryManager

#![deny(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod managers;
pub mod naive;

pub use managers::{PinCounters, UnpinnableManager, VecManager};
