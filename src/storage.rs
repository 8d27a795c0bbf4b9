//! Word storage and bit addressing for [`FdSet`](crate::FdSet).
//!
//! Element `e` lives in word `e / 64` at bit `e % 64`. Storage is a plain
//! `Vec<u64>`; every allocation goes through `try_reserve_exact` so that
//! exhaustion is reported as [`Error::Alloc`] instead of aborting.

use alloc::vec::Vec;

use crate::Error;

/// Number of bits held by one storage word.
pub const WORD_BITS: usize = u64::BITS as usize;

/// Convert element index to (word index, bit position within word)
#[inline(always)]
pub(crate) const fn bitpos(idx: usize) -> (usize, usize) {
    (idx >> 6, idx & 63)
}

/// Single-bit mask selecting `idx` inside its word.
#[inline(always)]
pub(crate) const fn bit_mask(idx: usize) -> u64 {
    1 << (idx & 63)
}

/// Number of words needed to represent `bits` elements.
#[inline(always)]
pub(crate) const fn word_count(bits: usize) -> usize {
    bits.div_ceil(WORD_BITS)
}

/// Mask keeping bits `0..=bi` of a word.
#[inline(always)]
pub(crate) const fn low_mask(bi: usize) -> u64 {
    u64::MAX >> (63 - bi)
}

/// Removes trailing zero words from a slice.
#[inline(always)]
pub(crate) const fn rtrim0(mut slice: &[u64]) -> &[u64] {
    while let [rest @ .., 0] = slice {
        slice = rest;
    }
    slice
}

/// Allocates `len` zeroed words.
pub(crate) fn zeroed(len: usize) -> Result<Vec<u64>, Error> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(len)
        .map_err(|_| Error::Alloc { words: len })?;
    words.resize(len, 0);
    Ok(words)
}

/// Copies `src` into freshly allocated storage of the same length.
pub(crate) fn copied(src: &[u64]) -> Result<Vec<u64>, Error> {
    let mut words = Vec::new();
    words
        .try_reserve_exact(src.len())
        .map_err(|_| Error::Alloc { words: src.len() })?;
    words.extend_from_slice(src);
    Ok(words)
}

/// Extends `words` to `new_len` words, zero-filling the new tail.
///
/// Existing words keep their values. On failure `words` is left untouched.
pub(crate) fn extend_zeroed(words: &mut Vec<u64>, new_len: usize) -> Result<(), Error> {
    debug_assert!(new_len >= words.len());
    let additional = new_len - words.len();
    words
        .try_reserve_exact(additional)
        .map_err(|_| Error::Alloc { words: new_len })?;
    // Reserved above, so this never reallocates.
    words.resize(new_len, 0);
    Ok(())
}
