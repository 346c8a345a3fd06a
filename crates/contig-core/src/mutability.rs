//! Mutability capabilities for views and handles.
//!
//! A single generic `View<'a, T, M>` / `Handle<T, M>` serves both the
//! mutable and the read-only flavour. `M` is one of the two uninhabited
//! marker types below; write access is only implemented for [`Mutable`].
//!
//! Conversions only ever widen: a mutable view or handle can become a
//! read-only one, never the reverse.

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Mutable {}
    impl Sealed for super::ReadOnly {}
}

/// A mutability capability. Sealed: only [`Mutable`] and [`ReadOnly`]
/// implement it.
pub trait Mutability: sealed::Sealed + 'static {
    /// Whether values parameterized by this capability may write elements.
    const WRITABLE: bool;

    /// Short name used in `Debug` output.
    const NAME: &'static str;
}

/// Capability marker for views and handles that may write elements.
#[derive(Debug)]
pub enum Mutable {}

/// Capability marker for views and handles that only read elements.
#[derive(Debug)]
pub enum ReadOnly {}

impl Mutability for Mutable {
    const WRITABLE: bool = true;
    const NAME: &'static str = "Mutable";
}

impl Mutability for ReadOnly {
    const WRITABLE: bool = false;
    const NAME: &'static str = "ReadOnly";
}
