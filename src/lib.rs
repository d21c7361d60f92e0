//! A multiset implementation storing a sparse count per distinct element.
//!
//! ---
//!
//! [`SparseMultiset`] is a [multiset](https://en.wikipedia.org/wiki/Multiset)
//! implementation where items are stored as a hash map from each distinct
//! element to the number of times it occurs:
//!  - `a -> 2`
//!  - `b -> 1`
//!
//! Only positive counts are stored. An element whose count drops to zero is
//! removed from the map, so the set of keys is always exactly the set of
//! elements present.
//!
//! ---
//!
//! The multiset also behaves like the *flattened* sequence in which every
//! element is repeated as many times as it occurs:
//!  - `a`
//!  - `a`
//!  - `b`
//!
//! [`SparseMultiset::iter`] walks this sequence without building it, and a
//! [`Position`] addresses a single slot of it. The order of distinct elements
//! in the flattened sequence is arbitrary.
//!
//! ---
//!
//! Multiplicities supplied by callers are signed, and a negative one is
//! rejected with [`Error::InvalidArgument`] before anything is modified.
//!
//! ```
//! use sparse_multiset::SparseMultiset;
//!
//! let a = SparseMultiset::from_counts([("hi", 2), ("bye", 8), ("hehe", 4)])?;
//! let b = SparseMultiset::from_counts([("hi", 7), ("bye", 2), ("bleh", 6)])?;
//!
//! assert_eq!(&a - &b, SparseMultiset::from_counts([("bye", 6), ("hehe", 4)])?);
//! assert_eq!(a.intersect(&b), SparseMultiset::from_counts([("hi", 2), ("bye", 2)])?);
//!
//! let mut c = a.clone();
//! assert!(c.insert_count("hi", -1).is_err());
//! assert_eq!(c, a);
//! # Ok::<(), sparse_multiset::Error>(())
//! ```

mod algebra;
mod counts;
mod error;

/// Iterators over the flattened view and the distinct elements of a multiset.
pub mod iter;

mod multiset;

/// Positions in the flattened view of a multiset.
pub mod position;

#[cfg(feature = "serde")]
mod serde;

pub use error::{Error, Result};
pub use hashbrown::TryReserveError;
pub use multiset::SparseMultiset;
pub use position::Position;
