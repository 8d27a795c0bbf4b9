//! Iterator and cursor implementations for `FdSet`.

use core::iter::FusedIterator;

use crate::{
    Error, FdSet,
    storage::{WORD_BITS, bitpos, low_mask, rtrim0},
};

/// An iterator over the members of an [`FdSet`] in ascending order.
///
/// This struct is created by the [`iter`](FdSet::iter) method. It is
/// double-ended and skips zero words efficiently. The shared borrow it holds
/// keeps the set from being mutated while iterating.
///
/// # Examples
///
/// ```
/// use fdset::FdSet;
/// let set = FdSet::from_members(1024, [5, 10, 15])?;
///
/// let forward: Vec<_> = set.iter().collect();
/// assert_eq!(forward, vec![5, 10, 15]);
///
/// let backward: Vec<_> = set.iter().rev().collect();
/// assert_eq!(backward, vec![15, 10, 5]);
/// # Ok::<(), fdset::Error>(())
/// ```
#[derive(Clone)]
pub struct Iter<'a> {
    words: &'a [u64],
    pos: usize,  // next candidate (forward)
    rpos: usize, // one past the last candidate (reverse)
}

impl<'a> Iter<'a> {
    pub(crate) fn new(set: &'a FdSet) -> Self {
        let words = rtrim0(set.as_words());
        Self {
            words,
            pos: 0,
            rpos: words.len() * WORD_BITS,
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.rpos {
            let (wi, bi) = bitpos(self.pos);
            let word = self.words[wi] >> bi;
            if word == 0 {
                self.pos = (wi + 1) * WORD_BITS;
                continue;
            }

            let found = self.pos + word.trailing_zeros() as usize;
            if found >= self.rpos {
                self.pos = self.rpos;
                return None;
            }
            self.pos = found + 1;
            return Some(found);
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        if self.pos >= self.rpos {
            return 0;
        }

        let (wmin, bmin) = bitpos(self.pos);
        let (wmax, bmax) = bitpos(self.rpos - 1);

        self.words[wmin..=wmax]
            .iter()
            .enumerate()
            .map(|(i, &word)| {
                let mut word = word;
                if i == 0 {
                    word &= u64::MAX << bmin;
                }
                if wmin + i == wmax {
                    word &= low_mask(bmax);
                }
                word.count_ones() as usize
            })
            .sum()
    }
}

impl FusedIterator for Iter<'_> {}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while self.rpos > self.pos {
            let (wi, bi) = bitpos(self.rpos - 1);
            let word = self.words[wi] & low_mask(bi);
            if word == 0 {
                self.rpos = wi * WORD_BITS;
                continue;
            }

            let found = wi * WORD_BITS + (63 - word.leading_zeros() as usize);
            if found < self.pos {
                self.rpos = self.pos;
                return None;
            }
            self.rpos = found;
            return Some(found);
        }

        None
    }
}

impl<'a> IntoIterator for &'a FdSet {
    type IntoIter = Iter<'a>;
    type Item = usize;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A detached position in an [`FdSet`] that detects mutation.
///
/// Unlike [`Iter`], a cursor does not borrow the set; it is advanced by
/// passing the set explicitly. Any number of cursors can walk the same set,
/// so nested iteration is possible. If the set was mutated after the cursor
/// was created, [`advance`](Self::advance) fails with
/// [`Error::StaleCursor`] instead of yielding an inconsistent sequence.
///
/// Every set carries its own stamp, so advancing against a different set,
/// including one that replaced the original, also fails with
/// [`Error::StaleCursor`].
///
/// # Examples
///
/// ```
/// use fdset::{Error, FdSet};
///
/// let mut set = FdSet::from_members(1024, [1, 3])?;
///
/// let mut outer = set.cursor();
/// let mut pairs = Vec::new();
/// while let Some(a) = outer.advance(&set)? {
///     let mut inner = set.cursor();
///     while let Some(b) = inner.advance(&set)? {
///         pairs.push((a, b));
///     }
/// }
/// assert_eq!(pairs, vec![(1, 1), (1, 3), (3, 1), (3, 3)]);
///
/// let mut cursor = set.cursor();
/// set.add(2)?;
/// assert_eq!(cursor.advance(&set), Err(Error::StaleCursor));
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    next: usize,
    generation: u64,
}

impl Cursor {
    pub(crate) const fn new(set: &FdSet) -> Self {
        Self {
            next: 0,
            generation: set.generation(),
        }
    }

    /// Moves to the next member and returns it, or `None` once every member
    /// has been visited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleCursor`] if `set` was mutated since this cursor
    /// was created.
    pub fn advance(&mut self, set: &FdSet) -> Result<Option<usize>, Error> {
        if set.generation() != self.generation {
            return Err(Error::StaleCursor);
        }
        let found = set.next_member(self.next);
        // member < capacity, so +1 cannot overflow
        self.next = found.map_or(set.capacity(), |k| k + 1);
        Ok(found)
    }

    /// Returns `true` if `set` has not been mutated since this cursor was
    /// created.
    #[must_use]
    pub const fn is_valid_for(&self, set: &FdSet) -> bool {
        set.generation() == self.generation
    }
}
