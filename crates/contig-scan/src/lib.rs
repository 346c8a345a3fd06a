//! Search and comparison over contiguous element runs.
//!
//! The scan engine is stateless: every entry point takes plain slices and
//! returns an index, a boolean, or a three-way comparison. Element types
//! whose equality is bitwise ([`ScanElement::BITWISE_EQ`]) are compared as
//! byte lanes in vector registers; everything else goes through unrolled
//! scalar loops.
//!
//! # Architecture
//!
//! ```text
//! api (free functions) ──► Scanner (vector width from ScanConfig)
//!                             ├── simd   byte-lane kernels: SSE2 / AVX2 / NEON
//!                             ├── scalar unrolled 8 → 4 → 1 loops
//!                             └── lanes  patterns, mask folding, word compares
//! search (binary search, independent of vector width)
//! ```
//!
//! # Result conventions
//!
//! - `index_of*` return `None` when nothing matches.
//! - [`binary_search`] returns the match index, or `!insertion_point`
//!   (a negative number) when the value is absent.
//! - [`sequence_compare_to`] returns the sign of the first differing
//!   element, or `first.len() - second.len()` when one run is a prefix of
//!   the other.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod api;
pub mod config;
pub mod element;
mod lanes;
mod scalar;
pub mod scanner;
pub mod search;
mod simd;

pub use api::{
    contains, count, ends_with, index_of, index_of_any, index_of_any2, index_of_any3,
    index_of_seq, last_index_of, last_index_of_any, last_index_of_any2, last_index_of_any3,
    last_index_of_seq, mismatch, sequence_compare_to, sequence_equal, starts_with,
};
pub use config::{ScanConfig, VectorWidth};
pub use element::ScanElement;
pub use scanner::Scanner;
pub use search::{binary_search, binary_search_by, decode_search_result};
