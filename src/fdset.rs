//! `FdSet` struct and core implementation.

use alloc::vec::Vec;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::{
    Error,
    iter::{Cursor, Iter},
    storage::{self, bit_mask, bitpos, low_mask, word_count},
};

/// Capacity used by [`FdSet::new`] and [`Default`].
pub const DEFAULT_CAPACITY: usize = 1024;

/// Source of generation stamps. Every instance and every mutation draws a
/// value no other set has seen.
static GENERATION: AtomicU64 = AtomicU64::new(1);

#[inline]
fn next_generation() -> u64 {
    GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Position of the embedded iteration protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    /// No iteration has started since creation or the last `clear`.
    Idle,
    /// Positioned on a member.
    At(usize),
    /// Scanned past the last member.
    Exhausted,
}

/// A growable set of small non-negative integers backed by 64-bit words.
///
/// # Overview
///
/// `FdSet` tracks membership of values in `[0, capacity)`, typically file
/// descriptors. Adding a value beyond the capacity grows the set in place by
/// doubling, so callers never have to size it up front.
///
/// # Capacity Model
///
/// The logical capacity is the exact value given at construction (or reached
/// by growth) and need not be a multiple of 64. Storage is always whole
/// words, and bits between the capacity and the end of the last word are
/// kept clear. Capacity never shrinks.
///
/// # Iteration
///
/// Three ways to walk the members, all in ascending order:
///
/// - [`iter`](Self::iter): a borrowing [`Iterator`]
/// - [`cursor`](Self::cursor): a detached [`Cursor`] that detects mutation
/// - [`iter_begin`](Self::iter_begin) / [`iter_more`](Self::iter_more) /
///   [`iter_next`](Self::iter_next): a single cursor stored in the set itself
///
/// # Examples
///
/// ```
/// use fdset::FdSet;
///
/// let mut set = FdSet::new()?;
/// set.add(3)?;
/// set.add(70)?;
/// assert!(set.contains(3));
/// assert!(!set.contains(4));
///
/// set.add(2000)?; // grows past the default 1024
/// assert!(set.capacity() > 2000);
/// assert!(set.contains(70));
/// # Ok::<(), fdset::Error>(())
/// ```
pub struct FdSet {
    pub(crate) capacity: usize,
    pub(crate) words: Vec<u64>,
    pub(crate) cursor: Position,
    pub(crate) generation: u64,
}

impl FdSet {
    /// Creates an empty set with [`DEFAULT_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if storage cannot be obtained.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::{FdSet, DEFAULT_CAPACITY};
    /// let set = FdSet::new()?;
    /// assert_eq!(set.capacity(), DEFAULT_CAPACITY);
    /// assert!(set.is_empty());
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn new() -> Result<Self, Error> {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty set able to hold values in `[0, capacity)` without
    /// growing.
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroCapacity`] if `capacity` is zero
    /// - [`Error::Alloc`] if storage cannot be obtained
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::{Error, FdSet};
    /// let set = FdSet::with_capacity(100)?;
    /// assert_eq!(set.capacity(), 100);
    /// assert_eq!(set.as_words().len(), 2);
    ///
    /// assert_eq!(FdSet::with_capacity(0).unwrap_err(), Error::ZeroCapacity);
    /// # Ok::<(), Error>(())
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        let words = storage::zeroed(word_count(capacity))?;
        Ok(Self::from_parts(capacity, words))
    }

    /// Creates a set of at least `capacity` containing every value yielded
    /// by `members`, growing as needed.
    ///
    /// # Errors
    ///
    /// Same as [`with_capacity`](Self::with_capacity) and
    /// [`add`](Self::add).
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let set = FdSet::from_members(64, [1, 3, 70])?;
    /// assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3, 70]);
    /// assert!(set.capacity() > 70);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn from_members(
        capacity: usize,
        members: impl IntoIterator<Item = usize>,
    ) -> Result<Self, Error> {
        let mut set = Self::with_capacity(capacity)?;
        for element in members {
            set.add(element)?;
        }
        Ok(set)
    }

    /// Assembles a set from storage that already satisfies the layout
    /// invariants.
    #[inline]
    pub(crate) fn from_parts(capacity: usize, words: Vec<u64>) -> Self {
        debug_assert!(capacity > 0);
        debug_assert_eq!(words.len(), word_count(capacity));
        Self {
            capacity,
            words,
            cursor: Position::Idle,
            generation: next_generation(),
        }
    }

    /// Returns a deep copy with the same capacity and members.
    ///
    /// The copy starts with a reset iteration cursor. Unlike [`Clone`], an
    /// allocation failure is reported instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if storage cannot be obtained.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let mut set = FdSet::new()?;
    /// set.add(5)?;
    ///
    /// let mut copy = set.try_clone()?;
    /// copy.add(6)?;
    /// assert!(copy.contains(5));
    /// assert!(!set.contains(6));
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn try_clone(&self) -> Result<Self, Error> {
        let words = storage::copied(&self.words)?;
        Ok(Self::from_parts(self.capacity, words))
    }

    /// Returns the number of representable values.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the underlying words. Bit `b` of word `w` is value
    /// `w * 64 + b`.
    #[must_use]
    #[inline]
    pub fn as_words(&self) -> &[u64] {
        &self.words
    }

    /// Stamp checked by detached cursors, unique across all live sets.
    #[inline]
    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    #[inline(always)]
    fn touch(&mut self) {
        self.generation = next_generation();
    }

    /// Removes every member and resets the embedded cursor. Capacity is
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let mut set = FdSet::new()?;
    /// set.add(100)?;
    /// set.add(2000)?;
    ///
    /// let cap = set.capacity();
    /// set.clear();
    /// assert!(set.is_empty());
    /// assert_eq!(set.capacity(), cap);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn clear(&mut self) {
        self.words.fill(0);
        self.cursor = Position::Idle;
        self.touch();
    }

    /// Adds `element` to the set, growing it first if `element` is beyond
    /// the current capacity.
    ///
    /// Growth doubles the capacity, or jumps straight to `element + 1` when
    /// doubling is not enough. Adding a value that is already a member is a
    /// successful no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if growth could not obtain storage. The set
    /// then keeps its previous capacity and members.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let mut set = FdSet::with_capacity(64)?;
    /// set.add(10)?;
    /// set.add(10)?;
    /// set.add(64)?;
    /// assert_eq!(set.capacity(), 128);
    /// assert!(set.contains(10) && set.contains(64));
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn add(&mut self, element: usize) -> Result<(), Error> {
        if element >= self.capacity {
            let Some(min) = element.checked_add(1) else {
                return Err(Error::Alloc {
                    words: bitpos(element).0 + 1,
                });
            };
            self.grow(min.max(self.capacity.saturating_mul(2)))?;
        }

        let (wi, _) = bitpos(element);
        self.words[wi] |= bit_mask(element);
        self.touch();
        Ok(())
    }

    /// Removes `element` from the set. Capacity never shrinks.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] if `element >= capacity`
    /// - [`Error::NotPresent`] if `element` is in range but not a member
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::{Error, FdSet};
    /// let mut set = FdSet::new()?;
    /// set.add(7)?;
    ///
    /// assert_eq!(set.remove(7), Ok(()));
    /// assert_eq!(set.remove(7), Err(Error::NotPresent { element: 7 }));
    /// assert!(matches!(set.remove(5000), Err(Error::OutOfRange { .. })));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn remove(&mut self, element: usize) -> Result<(), Error> {
        if element >= self.capacity {
            return Err(Error::OutOfRange {
                element,
                capacity: self.capacity,
            });
        }

        let (wi, _) = bitpos(element);
        let mask = bit_mask(element);
        if self.words[wi] & mask == 0 {
            return Err(Error::NotPresent { element });
        }
        self.words[wi] &= !mask;
        self.touch();
        Ok(())
    }

    /// Returns `true` if `element` is a member.
    ///
    /// Values beyond the capacity are simply absent.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let mut set = FdSet::new()?;
    /// set.add(42)?;
    ///
    /// assert!(set.contains(42));
    /// assert!(!set.contains(43));
    /// assert!(!set.contains(1 << 40));
    /// # Ok::<(), fdset::Error>(())
    /// ```
    #[must_use]
    #[inline]
    pub fn contains(&self, element: usize) -> bool {
        if element >= self.capacity {
            return false;
        }
        let (wi, _) = bitpos(element);
        self.words[wi] & bit_mask(element) != 0
    }

    /// Grows the set so it can hold values in `[0, new_capacity)`.
    ///
    /// Existing members are preserved and the new range starts empty.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidGrowth`] if `new_capacity` is not larger than the
    ///   current capacity
    /// - [`Error::Alloc`] if storage cannot be obtained; the set is left
    ///   unchanged
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::{Error, FdSet};
    /// let mut set = FdSet::with_capacity(100)?;
    /// set.add(99)?;
    /// set.grow(300)?;
    /// assert_eq!(set.capacity(), 300);
    /// assert!(set.contains(99));
    ///
    /// assert!(set.grow(300).unwrap_err().is_misuse());
    /// # Ok::<(), Error>(())
    /// ```
    pub fn grow(&mut self, new_capacity: usize) -> Result<(), Error> {
        if new_capacity <= self.capacity {
            return Err(Error::InvalidGrowth {
                capacity: self.capacity,
                requested: new_capacity,
            });
        }
        storage::extend_zeroed(&mut self.words, word_count(new_capacity))?;
        self.capacity = new_capacity;
        self.touch();
        Ok(())
    }

    /// Returns the number of members.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let set = FdSet::from_members(64, [0, 1, 500])?;
    /// assert_eq!(set.len(), 3);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns `true` if the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Returns the smallest member.
    #[must_use]
    pub fn first(&self) -> Option<usize> {
        self.next_member(0)
    }

    /// Returns the largest member.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let set = FdSet::from_members(1024, [5, 10, 20])?;
    /// assert_eq!(set.first(), Some(5));
    /// assert_eq!(set.last(), Some(20));
    /// # Ok::<(), fdset::Error>(())
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.words
            .iter()
            .enumerate()
            .rev()
            .find(|(_, w)| **w != 0)
            .map(|(wi, w)| wi * 64 + (63 - w.leading_zeros() as usize))
    }

    /// Returns the smallest member that is `>= from`.
    ///
    /// Whole zero words are skipped at once.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let set = FdSet::from_members(1024, [5, 10, 700])?;
    /// assert_eq!(set.next_member(0), Some(5));
    /// assert_eq!(set.next_member(6), Some(10));
    /// assert_eq!(set.next_member(11), Some(700));
    /// assert_eq!(set.next_member(701), None);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    #[must_use]
    pub fn next_member(&self, from: usize) -> Option<usize> {
        if from >= self.capacity {
            return None;
        }
        let (wi, bi) = bitpos(from);

        // first partial word
        let w = self.words[wi] & (u64::MAX << bi);
        if w != 0 {
            return Some(wi * 64 + w.trailing_zeros() as usize);
        }

        // remaining words
        self.words[wi + 1..]
            .iter()
            .position(|w| *w != 0)
            .map(|off| {
                let wi = wi + 1 + off;
                wi * 64 + self.words[wi].trailing_zeros() as usize
            })
    }

    /// Returns the largest member that is `<= from`.
    #[must_use]
    pub fn prev_member(&self, from: usize) -> Option<usize> {
        let idx = from.min(self.capacity - 1);
        let (wi, bi) = bitpos(idx);

        let w = self.words[wi] & low_mask(bi);
        if w != 0 {
            return Some(wi * 64 + (63 - w.leading_zeros() as usize));
        }

        self.words[..wi]
            .iter()
            .rposition(|w| *w != 0)
            .map(|wi| wi * 64 + (63 - self.words[wi].leading_zeros() as usize))
    }

    /// Returns a borrowing iterator over the members in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let set = FdSet::from_members(1024, [70, 1, 3])?;
    ///
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(1));
    /// assert_eq!(iter.next_back(), Some(70));
    /// assert_eq!(iter.len(), 1);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Returns a detached cursor positioned before the first member.
    ///
    /// See [`Cursor`].
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self)
    }

    // ========================================================================
    // Embedded iteration protocol
    // ========================================================================

    /// Starts the embedded iteration and returns the first member, or
    /// `None` if the set is empty.
    ///
    /// Only one embedded iteration can be active per set; starting again
    /// discards the previous position. Mutating the set while iterating is
    /// memory-safe, but the members yielded afterwards are unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let mut set = FdSet::from_members(1024, [1, 3, 70])?;
    ///
    /// let mut seen = Vec::new();
    /// let mut fd = set.iter_begin();
    /// while set.iter_more() {
    ///     seen.extend(fd);
    ///     fd = set.iter_next();
    /// }
    /// assert_eq!(seen, vec![1, 3, 70]);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn iter_begin(&mut self) -> Option<usize> {
        self.cursor = Position::Idle;
        self.iter_next()
    }

    /// Returns `true` while the embedded cursor is positioned on a member.
    #[must_use]
    #[inline]
    pub const fn iter_more(&self) -> bool {
        matches!(self.cursor, Position::At(_))
    }

    /// Advances the embedded cursor to the next member and returns it.
    ///
    /// Once exhausted, further calls keep returning `None`. Called before
    /// [`iter_begin`](Self::iter_begin), it behaves like `iter_begin`.
    pub fn iter_next(&mut self) -> Option<usize> {
        let from = match self.cursor {
            Position::Idle => 0,
            // k < capacity, so k + 1 cannot overflow
            Position::At(k) => k + 1,
            Position::Exhausted => return None,
        };
        let found = self.next_member(from);
        self.cursor = found.map_or(Position::Exhausted, Position::At);
        found
    }
}
