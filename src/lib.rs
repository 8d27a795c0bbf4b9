//! A growable bit-set for tracking small non-negative integers.
//!
//! This crate provides [`FdSet`], a set of `usize` values stored as packed
//! 64-bit words. It is sized for dense domains such as file descriptors:
//! membership tests and updates are O(1), and adding a value beyond the
//! current capacity grows the set in place by doubling.
//!
//! # Features
//!
//! - **Fallible allocation**: construction, growth, cloning and set algebra
//!   report [`Error::Alloc`] instead of aborting
//! - **Set algebra** between sets of different capacities (union,
//!   intersection, difference, symmetric difference)
//! - **Three iteration styles**: a borrowing [`Iter`], a detached [`Cursor`]
//!   that detects mutation, and a classic single-cursor protocol embedded in
//!   the set
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use fdset::{Error, FdSet};
//!
//! let mut open = FdSet::new()?;
//! open.add(0)?;
//! open.add(1)?;
//! open.add(7)?;
//!
//! assert!(open.contains(7));
//! assert_eq!(open.remove(3), Err(Error::NotPresent { element: 3 }));
//!
//! let mut readable = FdSet::new()?;
//! readable.add(7)?;
//! readable.add(9)?;
//!
//! let ready = open.intersection(&readable)?;
//! assert_eq!(ready.iter().collect::<Vec<_>>(), vec![7]);
//! # Ok::<(), Error>(())
//! ```
//!
//! # Storage Layout
//!
//! Value `v` is bit `v % 64` of word `v / 64`. A set of capacity `c` owns
//! exactly `ceil(c / 64)` words and keeps the bits at or above `c` clear.
//!
//! # Thread Safety
//!
//! `FdSet` holds no internal synchronization. Share it across threads behind
//! a lock.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Module declarations
mod error;
mod fdset;
mod iter;
mod set_ops;
mod storage;
mod traits;

// Re-exports
pub use error::{Error, status};
pub use fdset::{DEFAULT_CAPACITY, FdSet};
pub use iter::{Cursor, Iter};
pub use storage::WORD_BITS;
