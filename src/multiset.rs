use crate::counts::CountMap;
use crate::error::{check_count, Result};
use crate::iter::{Counts, Distinct, Drain, IntoCounts, IntoIter, Iter};
use crate::position::{Position, Positions};
use hashbrown::{HashSet, TryReserveError};
use std::borrow::Borrow;
use std::collections::hash_map::{DefaultHasher, RandomState};
use std::fmt::{self, Debug, Display};
use std::hash::{BuildHasher, Hash, Hasher};
use std::ops::Index;

/// Multiset implementation storing a count per distinct element.
///
/// Only elements with a positive multiplicity are stored; inserting zero
/// copies, or removing the last copy, leaves no trace of the element.
///
/// # Examples
///
/// ```
/// use sparse_multiset::SparseMultiset;
///
/// let mut set = SparseMultiset::new();
/// set.insert(1);
/// set.insert(1);
/// set.insert(2);
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.distinct_len(), 2);
/// assert_eq!(set.get(&1), 2);
/// ```
#[derive(Clone)]
pub struct SparseMultiset<T, S = RandomState> {
    pub(crate) counts: CountMap<T, S>,
}

impl<T> SparseMultiset<T, RandomState> {
    /// Creates an empty `SparseMultiset` with a capacity of 0,
    /// so it will not allocate until it is first inserted into.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let set: SparseMultiset<i32> = SparseMultiset::new();
    ///
    /// assert_eq!(set.capacity(), 0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty `SparseMultiset` with room for at least `capacity` distinct elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<T, S> SparseMultiset<T, S> {
    /// Creates an empty `SparseMultiset` which will use the given hash builder to hash elements.
    pub const fn with_hasher(hash_builder: S) -> Self {
        Self {
            counts: CountMap::with_hasher(hash_builder),
        }
    }

    /// Creates an empty `SparseMultiset` with room for at least `capacity` distinct elements,
    /// using the given hash builder to hash elements.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            counts: CountMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Returns the number of distinct elements the set can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.counts.capacity()
    }

    /// Returns a reference to the set's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        self.counts.hasher()
    }

    /// Returns the number of elements in the set, counting every copy.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns the number of distinct elements in the set.
    pub fn distinct_len(&self) -> usize {
        self.counts.distinct_len()
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Clears the set, removing all elements. Keeps the allocated memory for reuse.
    pub fn clear(&mut self) {
        log::trace!("clearing {} elements", self.counts.len());
        self.counts.clear();
    }

    /// Clears the set, returning every distinct element with its multiplicity.
    pub fn drain(&mut self) -> Drain<'_, T> {
        log::trace!("draining {} distinct elements", self.counts.distinct_len());
        Drain::new(self.counts.drain())
    }

    /// Retains only the elements specified by the predicate, which sees each
    /// distinct element together with its multiplicity.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let mut set: SparseMultiset<_> = ["a", "a", "b", "c", "c", "c"].into();
    /// set.retain(|_, count| count >= 2);
    ///
    /// assert_eq!(set.len(), 5);
    /// assert!(!set.contains("b"));
    /// ```
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T, usize) -> bool,
    {
        self.counts
            .update(|value, count| if f(value, count) { count } else { 0 });
    }

    /// An iterator over the flattened view, visiting every copy of every element.
    ///
    /// Distinct elements are visited in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let set = SparseMultiset::from_counts([('a', 2), ('b', 1)]).unwrap();
    ///
    /// let mut items: Vec<_> = set.iter().collect();
    /// items.sort_unstable(); // Sort since the elements are visited in arbitrary order.
    ///
    /// assert_eq!(items, [&'a', &'a', &'b']);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.counts.iter(), self.counts.len())
    }

    /// An iterator visiting each distinct element once, in arbitrary order.
    pub fn distinct(&self) -> Distinct<'_, T> {
        Distinct::new(self.counts.keys())
    }

    /// An iterator visiting each distinct element with its multiplicity, in arbitrary order.
    pub fn counts(&self) -> Counts<'_, T> {
        Counts::new(self.counts.iter())
    }

    /// Consumes the set, yielding each distinct element with its multiplicity.
    pub fn into_counts(self) -> IntoCounts<T> {
        IntoCounts::new(self.counts.into_table().into_iter())
    }

    /// The position of the first element of the flattened view.
    pub fn first_position(&self) -> Position {
        Position::new(0)
    }

    /// The position one past the last element of the flattened view.
    ///
    /// This position does not resolve to an element.
    pub fn past_last_position(&self) -> Position {
        Position::new(self.len())
    }

    /// Every position that resolves to an element, in ascending order.
    pub fn positions(&self) -> Positions {
        Positions::new(self.len())
    }

    /// Returns the element at `position` in the flattened view, or `None` if
    /// the position is out of bounds.
    ///
    /// Resolution walks the entries from the start, skipping whole
    /// multiplicities, so it is linear in the number of distinct elements.
    pub fn get_at(&self, position: Position) -> Option<&T> {
        self.iter().nth(position.offset())
    }
}

impl<T, S> SparseMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Reserves capacity for at least `additional` more distinct elements.
    pub fn reserve(&mut self, additional: usize) {
        self.counts.reserve(additional);
    }

    /// Tries to reserve capacity for at least `additional` more distinct elements.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.counts.try_reserve(additional)
    }

    /// Shrinks the capacity of the set as much as possible.
    pub fn shrink_to_fit(&mut self) {
        self.counts.shrink_to_fit();
    }

    /// Shrinks the capacity of the set with a lower limit.
    pub fn shrink_to(&mut self, min_capacity: usize) {
        self.counts.shrink_to(min_capacity);
    }

    /// Returns the multiplicity of `value`, which is 0 if it is absent.
    pub fn get<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.counts.get(value)
    }

    /// Returns `true` if the set contains at least one copy of `value`.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.counts.get(value) > 0
    }

    /// Sets the multiplicity of `value` to `count`. A count of zero removes
    /// the element entirely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// `count` is negative, leaving the set unmodified.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let mut set = SparseMultiset::new();
    /// set.set("a", 4)?;
    /// assert_eq!(set.get("a"), 4);
    ///
    /// set.set("a", 0)?;
    /// assert!(set.is_empty());
    ///
    /// assert!(set.set("a", -1).is_err());
    /// # Ok::<(), sparse_multiset::Error>(())
    /// ```
    pub fn set(&mut self, value: T, count: isize) -> Result<()> {
        let count = check_count("set", count)?;
        self.counts.set(value, count);
        Ok(())
    }

    /// Adds a single copy of `value` to the set.
    pub fn insert(&mut self, value: T) {
        self.counts.add(value, 1);
    }

    /// Adds `count` copies of `value` to the set. Multiplicities saturate at
    /// `usize::MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// `count` is negative, leaving the set unmodified.
    pub fn insert_count(&mut self, value: T, count: isize) -> Result<()> {
        let count = check_count("insert", count)?;
        self.counts.add(value, count);
        Ok(())
    }

    /// Removes a single copy of `value`. Returns whether a copy was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let mut set = SparseMultiset::new();
    /// set.insert(1);
    /// set.insert(1);
    ///
    /// assert!(set.remove(&1));
    /// assert!(set.remove(&1));
    /// assert!(!set.remove(&1));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.counts.sub(value, 1) > 0
    }

    /// Removes up to `count` copies of `value`, returning how many were
    /// actually removed. Removing more copies than present leaves none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// `count` is negative, leaving the set unmodified.
    pub fn remove_count<Q>(&mut self, value: &Q, count: isize) -> Result<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let count = check_count("remove", count)?;
        Ok(self.counts.sub(value, count))
    }

    /// Removes every copy of `value`, returning its multiplicity prior to removal.
    pub fn remove_all<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.counts.remove_entry(value)
    }

    /// Inserts one copy of every element yielded by `iter`.
    pub fn insert_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value);
        }
    }

    /// Removes one copy of every element yielded by `iter`, ignoring elements
    /// that are no longer present.
    pub fn remove_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.remove(&value);
        }
    }
}

impl<T> SparseMultiset<T, RandomState>
where
    T: Eq + Hash,
{
    /// Creates a set from `(element, count)` pairs. Counts of repeated
    /// elements are summed, and zero counts leave no entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if any
    /// count is negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use sparse_multiset::SparseMultiset;
    ///
    /// let set = SparseMultiset::from_counts([("hi", 2), ("bye", 3), ("ha", 0)])?;
    ///
    /// assert_eq!(set.get("hi"), 2);
    /// assert_eq!(set.get("bye"), 3);
    /// assert_eq!(set.distinct_len(), 2);
    /// # Ok::<(), sparse_multiset::Error>(())
    /// ```
    pub fn from_counts<I>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, isize)>,
    {
        let iter = iter.into_iter();
        let mut set = Self::with_capacity(iter.size_hint().0);
        for (value, count) in iter {
            set.insert_count(value, count)?;
        }
        Ok(set)
    }
}

impl<T, S> FromIterator<T> for SparseMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_hasher(Default::default());
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for SparseMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_iter(iter);
    }
}

impl<'a, T, S> Extend<&'a T> for SparseMultiset<T, S>
where
    T: 'a + Eq + Hash + Copy,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, T, S> IntoIterator for &'a SparseMultiset<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, S> IntoIterator for SparseMultiset<T, S>
where
    T: Clone,
{
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let len = self.len();
        IntoIter::new(self.counts.into_table().into_iter(), len)
    }
}

impl<T, S> Default for SparseMultiset<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self {
            counts: CountMap::default(),
        }
    }
}

impl<T, S> PartialEq for SparseMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl<T, S> Eq for SparseMultiset<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

/// Entry hashes use a fixed-key hasher and are combined with XOR, so the
/// result is independent of both storage order and the set's own hasher.
/// Only the entries and their number are hashed, which keeps `Hash` in step
/// with `Eq`.
impl<T, S> Hash for SparseMultiset<T, S>
where
    T: Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let folded = self.counts.iter().fold(0u64, |acc, (value, count)| {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            count.hash(&mut hasher);
            acc ^ hasher.finish()
        });
        state.write_usize(self.distinct_len());
        state.write_u64(folded);
    }
}

impl<T, S> Debug for SparseMultiset<T, S>
where
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.counts()).finish()
    }
}

impl<T, S> Display for SparseMultiset<T, S>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (value, count)) in self.counts().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}: {count}")?;
        }
        f.write_str("}")
    }
}

impl<T, S> Index<Position> for SparseMultiset<T, S> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `position` is not before [`past_last_position`](SparseMultiset::past_last_position).
    fn index(&self, position: Position) -> &T {
        match self.get_at(position) {
            Some(value) => value,
            None => panic!(
                "position {} out of bounds for multiset of length {}",
                position.offset(),
                self.len()
            ),
        }
    }
}

impl<T, const N: usize> From<[T; N]> for SparseMultiset<T, RandomState>
where
    T: Eq + Hash,
{
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

/// Collapses duplicates, keeping each distinct element once.
impl<T, S> From<SparseMultiset<T, S>> for HashSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Clone,
{
    fn from(set: SparseMultiset<T, S>) -> Self {
        let table = set.counts.into_table();
        let mut distinct = HashSet::with_capacity_and_hasher(table.len(), table.hasher().clone());
        distinct.extend(table.into_iter().map(|(value, _)| value));
        distinct
    }
}
