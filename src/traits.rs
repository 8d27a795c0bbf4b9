//! Trait implementations for `FdSet`.

use alloc::vec;
use core::{
    fmt,
    hash::{Hash, Hasher},
};

use crate::{
    FdSet,
    fdset::DEFAULT_CAPACITY,
    storage::{rtrim0, word_count},
};

impl Default for FdSet {
    /// Creates an empty set with [`DEFAULT_CAPACITY`], aborting on
    /// allocation failure like other std collections. Use [`FdSet::new`] to
    /// observe the failure instead.
    fn default() -> Self {
        Self::from_parts(DEFAULT_CAPACITY, vec![0; word_count(DEFAULT_CAPACITY)])
    }
}

impl Clone for FdSet {
    /// Deep copy with the same capacity; the embedded cursor is reset.
    fn clone(&self) -> Self {
        Self::from_parts(self.capacity, self.words.clone())
    }
}

impl fmt::Debug for FdSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut w = f.debug_set();
        for element in self {
            w.entry(&element);
        }
        w.finish()
    }
}

/// Two sets are equal when they have the same members, regardless of
/// capacity.
impl PartialEq for FdSet {
    fn eq(&self, other: &Self) -> bool {
        rtrim0(&self.words) == rtrim0(&other.words)
    }
}

impl Eq for FdSet {}

impl Hash for FdSet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        rtrim0(&self.words).hash(state);
    }
}
