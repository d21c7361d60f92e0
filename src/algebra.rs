//! Multiset union, difference and intersection, and the subset relations
//! derived from them.

use crate::SparseMultiset;
use std::hash::{BuildHasher, Hash};
use std::ops::{Add, AddAssign, Sub, SubAssign};

impl<T, S> SparseMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Adds every copy of every element of `other` to `self`.
    pub fn union_with(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.counts.reserve(other.distinct_len());
        for (value, count) in other.counts() {
            self.counts.add(value.clone(), count);
        }
    }

    /// Removes as many copies of each element as `other` holds, stopping at zero.
    pub fn subtract_with(&mut self, other: &Self) {
        if self.distinct_len() <= other.distinct_len() {
            self.counts
                .update(|value, count| count.saturating_sub(other.get(value)));
        } else {
            for (value, count) in other.counts() {
                self.counts.sub(value, count);
            }
        }
    }

    /// Lowers each multiplicity to the one `other` holds, if that is smaller.
    pub fn intersect_with(&mut self, other: &Self) {
        log::trace!(
            "intersecting {} distinct elements with {}",
            self.distinct_len(),
            other.distinct_len()
        );
        self.counts
            .update(|value, count| count.min(other.get(value)));
    }

    /// Returns the multiset holding the copies of both `self` and `other`:
    /// each multiplicity is the sum of the two.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let a: SparseMultiset<_> = ["x", "x", "y"].into();
    /// let b: SparseMultiset<_> = ["x", "z"].into();
    ///
    /// let union = a.union(&b);
    /// assert_eq!(union.get("x"), 3);
    /// assert_eq!(union, &a + &b);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone,
        S: Clone,
    {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    /// Returns `self` without the copies held by `other`: each multiplicity is
    /// the difference of the two, floored at zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let a: SparseMultiset<_> = ["x", "x", "y"].into();
    /// let b: SparseMultiset<_> = ["x", "y", "y"].into();
    ///
    /// let difference = a.subtract(&b);
    /// assert_eq!(difference.get("x"), 1);
    /// assert_eq!(difference.get("y"), 0);
    /// assert_eq!(difference, &a - &b);
    /// ```
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self
    where
        T: Clone,
        S: Clone,
    {
        let mut result = self.clone();
        result.subtract_with(other);
        result
    }

    /// Returns the copies common to `self` and `other`: each multiplicity is
    /// the smaller of the two.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self
    where
        T: Clone,
        S: Clone,
    {
        let (small, large) = if self.distinct_len() <= other.distinct_len() {
            (self, other)
        } else {
            (other, self)
        };

        let mut result = Self::with_hasher(self.hasher().clone());
        for (value, count) in small.counts() {
            result.counts.add(value.clone(), count.min(large.get(value)));
        }
        result
    }

    /// Returns `true` if every element occurs in `other` at least as often as in `self`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.distinct_len() <= other.distinct_len()
            && self.counts().all(|(value, count)| count <= other.get(value))
    }

    /// Returns `true` if `self` is a subset of `other` and the two differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let a: SparseMultiset<_> = ["hi", "hi", "bye"].into();
    /// let hi: SparseMultiset<_> = ["hi"].into();
    /// let aa = &a + &hi;
    ///
    /// assert!(a.is_strict_subset(&aa));
    /// assert!(!aa.is_strict_subset(&a));
    /// assert!(!a.is_strict_subset(&a));
    /// ```
    pub fn is_strict_subset(&self, other: &Self) -> bool {
        self.is_subset(other) && self != other
    }

    /// Returns `true` if every element occurs in `self` at least as often as in `other`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if `self` is a superset of `other` and the two differ.
    pub fn is_strict_superset(&self, other: &Self) -> bool {
        other.is_strict_subset(self)
    }

    /// Returns `true` if no element occurs in both `self` and `other`.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let (small, large) = if self.distinct_len() <= other.distinct_len() {
            (self, other)
        } else {
            (other, self)
        };
        small.distinct().all(|value| !large.contains(value))
    }
}

impl<T, S> Add<&SparseMultiset<T, S>> for &SparseMultiset<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    type Output = SparseMultiset<T, S>;

    fn add(self, rhs: &SparseMultiset<T, S>) -> SparseMultiset<T, S> {
        self.union(rhs)
    }
}

impl<T, S> Add<&SparseMultiset<T, S>> for SparseMultiset<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    type Output = SparseMultiset<T, S>;

    fn add(mut self, rhs: &SparseMultiset<T, S>) -> SparseMultiset<T, S> {
        self.union_with(rhs);
        self
    }
}

impl<T, S> AddAssign<&SparseMultiset<T, S>> for SparseMultiset<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
{
    fn add_assign(&mut self, rhs: &SparseMultiset<T, S>) {
        self.union_with(rhs);
    }
}

impl<T, S> Sub<&SparseMultiset<T, S>> for &SparseMultiset<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher + Clone,
{
    type Output = SparseMultiset<T, S>;

    fn sub(self, rhs: &SparseMultiset<T, S>) -> SparseMultiset<T, S> {
        self.subtract(rhs)
    }
}

impl<T, S> Sub<&SparseMultiset<T, S>> for SparseMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    type Output = SparseMultiset<T, S>;

    fn sub(mut self, rhs: &SparseMultiset<T, S>) -> SparseMultiset<T, S> {
        self.subtract_with(rhs);
        self
    }
}

impl<T, S> SubAssign<&SparseMultiset<T, S>> for SparseMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn sub_assign(&mut self, rhs: &SparseMultiset<T, S>) {
        self.subtract_with(rhs);
    }
}


#[cfg(test)]
mod proptests {
    use crate::SparseMultiset;
    use proptest::prelude::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn multiset() -> impl Strategy<Value = SparseMultiset<u8>> {
        proptest::collection::vec((0u8..8, 0isize..6), 0..16)
            .prop_map(|counts| SparseMultiset::from_counts(counts).unwrap())
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    proptest! {
        /// Union is commutative.
        #[test]
        fn union_commutes(a in multiset(), b in multiset()) {
            prop_assert_eq!(a.union(&b), b.union(&a));
        }

        /// Union is associative.
        #[test]
        fn union_associates(a in multiset(), b in multiset(), c in multiset()) {
            prop_assert_eq!(a.union(&b).union(&c), a.union(&b.union(&c)));
        }

        /// Each multiplicity of the union is the sum of the operands'.
        #[test]
        fn union_adds_multiplicities(a in multiset(), b in multiset(), value in 0u8..8) {
            prop_assert_eq!(a.union(&b).get(&value), a.get(&value) + b.get(&value));
            prop_assert_eq!(a.union(&b).len(), a.len() + b.len());
        }

        /// Subtraction floors at zero and intersection takes the minimum.
        #[test]
        fn difference_and_intersection_per_element(a in multiset(), b in multiset(), value in 0u8..8) {
            prop_assert_eq!(a.subtract(&b).get(&value), a.get(&value).saturating_sub(b.get(&value)));
            prop_assert_eq!(a.intersect(&b).get(&value), a.get(&value).min(b.get(&value)));
        }

        /// What subtraction takes away, intersection gives back.
        #[test]
        fn difference_plus_intersection_restores(a in multiset(), b in multiset()) {
            prop_assert_eq!(a.subtract(&b).union(&a.intersect(&b)), a);
        }

        /// Mutual subsets are equal.
        #[test]
        fn subset_is_antisymmetric(a in multiset(), b in multiset()) {
            prop_assert_eq!(a.is_subset(&b) && b.is_subset(&a), a == b);
        }

        /// The subset relation agrees with an empty difference.
        #[test]
        fn subset_means_empty_difference(a in multiset(), b in multiset()) {
            prop_assert_eq!(a.is_subset(&b), a.subtract(&b).is_empty());
            prop_assert!(a.is_subset(&a.union(&b)));
        }

        /// Disjoint sets have an empty intersection.
        #[test]
        fn disjoint_means_empty_intersection(a in multiset(), b in multiset()) {
            prop_assert_eq!(a.is_disjoint(&b), a.intersect(&b).is_empty());
        }

        /// Rebuilding from the same counts in another order gives an equal set with an equal hash.
        #[test]
        fn equal_sets_hash_equal(counts in proptest::collection::vec((0u8..8, 0isize..6), 0..16)) {
            let forward = SparseMultiset::from_counts(counts.iter().copied()).unwrap();
            let backward = SparseMultiset::from_counts(counts.iter().rev().copied()).unwrap();
            prop_assert_eq!(&forward, &backward);
            prop_assert_eq!(hash_of(&forward), hash_of(&backward));
        }

        /// The flattened view yields exactly `len` elements.
        #[test]
        fn flattened_view_has_len_elements(a in multiset()) {
            let sum: usize = a.counts().map(|(_, count)| count).sum();
            prop_assert_eq!(a.len(), sum);
            prop_assert_eq!(a.iter().count(), a.len());
            prop_assert_eq!(a.positions().count(), a.len());
        }

        /// Removal never drives a multiplicity below zero.
        #[test]
        fn removal_clamps(mut a in multiset(), value in 0u8..8, count in 0isize..10) {
            let before = a.get(&value);
            let removed = a.remove_count(&value, count).unwrap();
            prop_assert_eq!(removed, before.min(count as usize));
            prop_assert_eq!(a.get(&value), before.saturating_sub(count as usize));
        }
    }
}
