//! Implementations of set operations for `FdSet`.
//!
//! Every binary operation allocates a fresh result and leaves both operands
//! untouched. Operands may have different capacities; words past the end of
//! the smaller operand are treated as empty, since the smaller set cannot
//! hold those values.

use crate::{Error, FdSet, storage};

impl FdSet {
    /// Orders two sets as `(larger, smaller)` by capacity.
    #[inline(always)]
    fn by_capacity<'a>(a: &'a Self, b: &'a Self) -> (&'a Self, &'a Self) {
        if a.capacity >= b.capacity { (a, b) } else { (b, a) }
    }

    /// Creates a new set that is the union of this set and another set.
    ///
    /// The result has the larger of the two capacities. Overlapping words are
    /// OR-ed; the remaining words are copied from the larger operand.
    ///
    /// Time complexity: O(n) where n is the max number of words in either
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the result cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let a = FdSet::from_members(128, [1, 3, 70])?;
    /// let b = FdSet::from_members(256, [3, 65, 200])?;
    ///
    /// let u = a.union(&b)?;
    /// assert_eq!(u.capacity(), 256);
    /// assert_eq!(u.iter().collect::<Vec<_>>(), vec![1, 3, 65, 70, 200]);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn union(&self, other: &Self) -> Result<Self, Error> {
        let (larger, smaller) = Self::by_capacity(self, other);
        let mut words = storage::copied(&larger.words)?;
        for (dst, src) in words.iter_mut().zip(&smaller.words) {
            *dst |= *src;
        }
        Ok(Self::from_parts(larger.capacity, words))
    }

    /// Creates a new set that is the intersection of this set and another
    /// set.
    ///
    /// The result has the smaller of the two capacities; nothing beyond it
    /// can be in both sets.
    ///
    /// Time complexity: O(n) where n is the min number of words in either
    /// set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the result cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let a = FdSet::from_members(128, [1, 3, 70])?;
    /// let b = FdSet::from_members(256, [3, 65, 70, 200])?;
    ///
    /// let i = a.intersection(&b)?;
    /// assert_eq!(i.capacity(), 128);
    /// assert_eq!(i.iter().collect::<Vec<_>>(), vec![3, 70]);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn intersection(&self, other: &Self) -> Result<Self, Error> {
        let (larger, smaller) = Self::by_capacity(self, other);
        let mut words = storage::copied(&smaller.words)?;
        for (dst, src) in words.iter_mut().zip(&larger.words) {
            *dst &= *src;
        }
        Ok(Self::from_parts(smaller.capacity, words))
    }

    /// Creates a new set with the members of this set that are not in
    /// `other`.
    ///
    /// The result always has this set's capacity. Words beyond `other`'s
    /// storage are copied unchanged, since `other` cannot exclude values it
    /// cannot represent.
    ///
    /// Time complexity: O(n) where n is the number of words in self.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the result cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let a = FdSet::from_members(1024, [1, 3, 70, 900])?;
    /// let b = FdSet::from_members(128, [3, 65, 70])?;
    ///
    /// let d = a.difference(&b)?;
    /// assert_eq!(d.capacity(), 1024);
    /// assert_eq!(d.iter().collect::<Vec<_>>(), vec![1, 900]);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn difference(&self, other: &Self) -> Result<Self, Error> {
        let mut words = storage::copied(&self.words)?;
        for (dst, src) in words.iter_mut().zip(&other.words) {
            *dst &= !*src;
        }
        Ok(Self::from_parts(self.capacity, words))
    }

    /// Creates a new set with the members that are in exactly one of the
    /// two sets.
    ///
    /// The result has the larger of the two capacities.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Alloc`] if the result cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let a = FdSet::from_members(64, [1, 3])?;
    /// let b = FdSet::from_members(256, [3, 200])?;
    ///
    /// let x = a.symmetric_difference(&b)?;
    /// assert_eq!(x.iter().collect::<Vec<_>>(), vec![1, 200]);
    /// # Ok::<(), fdset::Error>(())
    /// ```
    pub fn symmetric_difference(&self, other: &Self) -> Result<Self, Error> {
        let (larger, smaller) = Self::by_capacity(self, other);
        let mut words = storage::copied(&larger.words)?;
        for (dst, src) in words.iter_mut().zip(&smaller.words) {
            *dst ^= *src;
        }
        Ok(Self::from_parts(larger.capacity, words))
    }

    /// Checks if every member of this set is also in `other`.
    ///
    /// Capacities are ignored; only membership matters.
    ///
    /// Time complexity: O(n) where n is the number of words in self.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.words
            .iter()
            .enumerate()
            .all(|(i, &word)| word & !other.words.get(i).copied().unwrap_or(0) == 0)
    }

    /// Checks if every member of `other` is also in this set.
    ///
    /// # Examples
    ///
    /// ```
    /// # use fdset::FdSet;
    /// let big = FdSet::from_members(1024, [1, 3, 700])?;
    /// let small = FdSet::from_members(64, [3])?;
    ///
    /// assert!(big.is_superset(&small));
    /// assert!(small.is_subset(&big));
    /// assert!(!big.is_subset(&small));
    /// # Ok::<(), fdset::Error>(())
    /// ```
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Checks if the two sets have no members in common.
    ///
    /// Time complexity: O(n) where n is the min number of words in either
    /// set.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.words
            .iter()
            .zip(&other.words)
            .all(|(a, b)| a & b == 0)
    }
}
