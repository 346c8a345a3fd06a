//! Error types for contig views and handles.
//!
//! Every error here is a caller contract violation: it is raised at the
//! offending call, before any partial effect, and is never retried or
//! recovered internally.

use std::error::Error;
use std::fmt;

/// Coarse classification of a contig error.
///
/// Lets callers branch on the category of a failure without matching
/// every variant of [`ViewError`] or [`HandleError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index or range fell outside `[0, len]`.
    Bounds,
    /// A copy destination was shorter than the source.
    Length,
    /// A typed view or handle was requested over storage of another type.
    TypeMismatch,
    /// The requested operation is not supported by the backing storage.
    InvalidOperation,
    /// The backing storage is already borrowed incompatibly.
    Borrowed,
}

/// Errors raised by view construction, slicing, indexing, and copying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// A slice range `start..start + len` does not fit in `available`
    /// elements.
    OutOfBounds {
        /// First element of the requested range.
        start: usize,
        /// Requested element count.
        len: usize,
        /// Element count of the source.
        available: usize,
    },
    /// An element index is not below the view length.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the indexed view.
        len: usize,
    },
    /// A copy destination cannot hold every source element.
    DestinationTooShort {
        /// Elements the copy needs to write.
        required: usize,
        /// Elements available in the destination.
        available: usize,
    },
    /// The storage holds elements of a different runtime type.
    TypeMismatch {
        /// Element type the caller asked for.
        expected: &'static str,
        /// Element type actually stored, when known.
        found: Option<&'static str>,
    },
}

impl ViewError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. } | Self::IndexOutOfRange { .. } => ErrorKind::Bounds,
            Self::DestinationTooShort { .. } => ErrorKind::Length,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
        }
    }

    /// Check that `start..start + len` lies within `available` elements.
    ///
    /// Overflowing ranges are rejected rather than wrapped.
    pub fn check_range(start: usize, len: usize, available: usize) -> Result<(), ViewError> {
        match start.checked_add(len) {
            Some(end) if end <= available => Ok(()),
            _ => Err(ViewError::OutOfBounds {
                start,
                len,
                available,
            }),
        }
    }

    /// Check that `index` addresses an element of a run of `len` elements.
    pub fn check_index(index: usize, len: usize) -> Result<(), ViewError> {
        if index < len {
            Ok(())
        } else {
            Err(ViewError::IndexOutOfRange { index, len })
        }
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                start,
                len,
                available,
            } => write!(
                f,
                "range {start}..{start}+{len} out of bounds for length {available}"
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::DestinationTooShort {
                required,
                available,
            } => write!(
                f,
                "destination too short: need {required} elements, have {available}"
            ),
            Self::TypeMismatch { expected, found } => {
                write!(f, "element type mismatch: expected {expected}")?;
                if let Some(found) = found {
                    write!(f, ", found {found}")?;
                }
                Ok(())
            }
        }
    }
}

impl Error for ViewError {}

/// Errors raised by handle construction, projection, and pinning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandleError {
    /// A view-level contract was violated (bounds, length, type).
    View(ViewError),
    /// The backing storage has no pinning capability.
    NotPinnable {
        /// Why the pin was refused.
        reason: &'static str,
    },
    /// A view over the backing storage is already live and conflicts with
    /// the requested one.
    Borrowed {
        /// Whether the rejected request asked for exclusive (mutable) access.
        exclusive: bool,
    },
}

impl HandleError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::View(e) => e.kind(),
            Self::NotPinnable { .. } => ErrorKind::InvalidOperation,
            Self::Borrowed { .. } => ErrorKind::Borrowed,
        }
    }
}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View(e) => write!(f, "{e}"),
            Self::NotPinnable { reason } => write!(f, "backing cannot be pinned: {reason}"),
            Self::Borrowed { exclusive: true } => {
                write!(f, "backing already borrowed; mutable view unavailable")
            }
            Self::Borrowed { exclusive: false } => {
                write!(f, "backing mutably borrowed; read-only view unavailable")
            }
        }
    }
}

impl Error for HandleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::View(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ViewError> for HandleError {
    fn from(e: ViewError) -> Self {
        Self::View(e)
    }
}
