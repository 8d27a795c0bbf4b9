//! Error type and C-style status codes.

use core::fmt;

/// Integer status codes matching the classic `fdset` return conventions.
///
/// [`Error::code`] maps every error onto one of these; a successful call
/// corresponds to [`SUCCESS`](status::SUCCESS).
pub mod status {
    /// The operation completed.
    pub const SUCCESS: i32 = 0;
    /// Structural misuse or an out-of-range removal.
    pub const ERROR: i32 = -1;
    /// Memory could not be obtained.
    pub const MALLOC_ERROR: i32 = -2;
    /// `remove` targeted an in-range element that is not a member.
    pub const NOT_PRESENT: i32 = -3;
}

/// Errors reported by [`FdSet`](crate::FdSet) operations.
///
/// # Examples
///
/// ```
/// use fdset::{Error, FdSet};
///
/// let mut set = FdSet::with_capacity(64)?;
/// assert_eq!(set.remove(3), Err(Error::NotPresent { element: 3 }));
/// assert_eq!(
///     set.remove(64),
///     Err(Error::OutOfRange { element: 64, capacity: 64 })
/// );
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Error {
    /// Word storage could not be allocated.
    Alloc {
        /// Number of 64-bit words that were requested
        words: usize,
    },

    /// A set was requested with zero capacity.
    ZeroCapacity,

    /// Growth was requested to a capacity that is not larger than the
    /// current one.
    InvalidGrowth {
        /// Capacity at the time of the request
        capacity: usize,
        /// Capacity that was asked for
        requested: usize,
    },

    /// `remove` targeted an element the set cannot represent.
    OutOfRange {
        /// The element that was passed
        element: usize,
        /// Capacity of the set
        capacity: usize,
    },

    /// `remove` targeted an in-range element that is not a member.
    NotPresent {
        /// The element that was passed
        element: usize,
    },

    /// A [`Cursor`](crate::Cursor) was advanced after the set it walks was
    /// mutated.
    StaleCursor,
}

impl Error {
    /// Returns `true` for allocation failures.
    #[must_use]
    pub const fn is_alloc(&self) -> bool {
        matches!(self, Self::Alloc { .. })
    }

    /// Returns `true` for contract violations by the caller: zero capacity,
    /// non-growing growth and stale cursors.
    #[must_use]
    pub const fn is_misuse(&self) -> bool {
        matches!(
            self,
            Self::ZeroCapacity | Self::InvalidGrowth { .. } | Self::StaleCursor
        )
    }

    /// Maps the error onto the integer [`status`] codes.
    ///
    /// ```
    /// use fdset::{Error, status};
    ///
    /// assert_eq!(Error::Alloc { words: 4 }.code(), status::MALLOC_ERROR);
    /// assert_eq!(Error::NotPresent { element: 1 }.code(), status::NOT_PRESENT);
    /// assert_eq!(Error::ZeroCapacity.code(), status::ERROR);
    /// ```
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::Alloc { .. } => status::MALLOC_ERROR,
            Self::NotPresent { .. } => status::NOT_PRESENT,
            Self::ZeroCapacity
            | Self::InvalidGrowth { .. }
            | Self::OutOfRange { .. }
            | Self::StaleCursor => status::ERROR,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alloc { words } => {
                write!(f, "failed to allocate storage for {words} words")
            }
            Self::ZeroCapacity => write!(f, "set capacity must be greater than zero"),
            Self::InvalidGrowth {
                capacity,
                requested,
            } => {
                write!(
                    f,
                    "cannot grow set of capacity {capacity} to {requested} bits"
                )
            }
            Self::OutOfRange { element, capacity } => {
                write!(
                    f,
                    "element {element} is out of range for set of capacity {capacity}"
                )
            }
            Self::NotPresent { element } => write!(f, "element {element} is not in the set"),
            Self::StaleCursor => write!(f, "cursor used after the set was modified"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::OutOfRange {
                element: 2000,
                capacity: 1024
            }
            .to_string(),
            "element 2000 is out of range for set of capacity 1024"
        );
        assert_eq!(
            Error::InvalidGrowth {
                capacity: 128,
                requested: 64
            }
            .to_string(),
            "cannot grow set of capacity 128 to 64 bits"
        );
    }

    #[test]
    fn test_classification() {
        assert!(Error::Alloc { words: 1 }.is_alloc());
        assert!(!Error::Alloc { words: 1 }.is_misuse());
        assert!(Error::StaleCursor.is_misuse());
        assert!(!Error::NotPresent { element: 0 }.is_misuse());
        assert_eq!(
            Error::OutOfRange {
                element: 1,
                capacity: 1
            }
            .code(),
            status::ERROR
        );
    }
}
