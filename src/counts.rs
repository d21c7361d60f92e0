use hashbrown::hash_map::{self, Entry, HashMap};
use hashbrown::TryReserveError;
use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::num::NonZeroUsize;

/// Sparse element-to-multiplicity table.
///
/// Absent keys have multiplicity zero, and a zero multiplicity is never stored:
/// every mutation that brings an entry down to zero deletes it. The sum of all
/// multiplicities is cached in `total`, which is wide enough to stay exact even
/// when several entries hold saturated counts.
#[derive(Clone)]
pub(crate) struct CountMap<T, S = RandomState> {
    table: HashMap<T, NonZeroUsize, S>,
    total: u128,
}

impl<T, S> CountMap<T, S> {
    pub(crate) const fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashMap::with_hasher(hash_builder),
            total: 0,
        }
    }

    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashMap::with_capacity_and_hasher(capacity, hash_builder),
            total: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub(crate) fn hasher(&self) -> &S {
        self.table.hasher()
    }

    /// Sum of all multiplicities, saturating at `usize::MAX`.
    pub(crate) fn len(&self) -> usize {
        usize::try_from(self.total).unwrap_or(usize::MAX)
    }

    /// Number of keys.
    pub(crate) fn distinct_len(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Removes every entry. Keeps the allocated memory for reuse.
    pub(crate) fn clear(&mut self) {
        self.table.clear();
        self.total = 0;
    }

    pub(crate) fn drain(&mut self) -> hash_map::Drain<'_, T, NonZeroUsize> {
        self.total = 0;
        self.table.drain()
    }

    pub(crate) fn iter(&self) -> hash_map::Iter<'_, T, NonZeroUsize> {
        self.table.iter()
    }

    pub(crate) fn keys(&self) -> hash_map::Keys<'_, T, NonZeroUsize> {
        self.table.keys()
    }

    pub(crate) fn into_table(self) -> HashMap<T, NonZeroUsize, S> {
        self.table
    }

    /// Replaces every multiplicity with `f(value, count)`, deleting entries
    /// mapped to zero.
    pub(crate) fn update<F>(&mut self, mut f: F)
    where
        F: FnMut(&T, usize) -> usize,
    {
        let mut total = 0u128;
        self.table
            .retain(|value, count| match NonZeroUsize::new(f(value, count.get())) {
                Some(updated) => {
                    *count = updated;
                    total += updated.get() as u128;
                    true
                }
                None => false,
            });
        self.total = total;
    }
}

impl<T, S> CountMap<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    pub(crate) fn reserve(&mut self, additional: usize) {
        self.table.reserve(additional);
    }

    pub(crate) fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.table.try_reserve(additional)
    }

    pub(crate) fn shrink_to_fit(&mut self) {
        self.table.shrink_to_fit();
    }

    pub(crate) fn shrink_to(&mut self, min_capacity: usize) {
        self.table.shrink_to(min_capacity);
    }

    /// Multiplicity of `value`, zero if absent.
    pub(crate) fn get<Q>(&self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table.get(value).map_or(0, |count| count.get())
    }

    /// Stores `count` for `value`, deleting the entry when `count` is zero.
    /// Returns the previous multiplicity.
    pub(crate) fn set(&mut self, value: T, count: usize) -> usize {
        match NonZeroUsize::new(count) {
            Some(count) => {
                let previous = self.table.insert(value, count).map_or(0, NonZeroUsize::get);
                self.total = self.total - previous as u128 + count.get() as u128;
                previous
            }
            None => self.remove_entry(&value),
        }
    }

    /// Adds `count` copies of `value`. Multiplicities saturate at `usize::MAX`.
    pub(crate) fn add(&mut self, value: T, count: usize) {
        let count = match NonZeroUsize::new(count) {
            Some(count) => count,
            None => return,
        };

        match self.table.entry(value) {
            Entry::Occupied(mut entry) => {
                let slot = entry.get_mut();
                let current = *slot;
                *slot = current.saturating_add(count.get());
                self.total += (slot.get() - current.get()) as u128;
            }
            Entry::Vacant(entry) => {
                entry.insert(count);
                self.total += count.get() as u128;
            }
        }
    }

    /// Removes up to `count` copies of `value`, returning how many were removed.
    pub(crate) fn sub<Q>(&mut self, value: &Q, count: usize) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = match self.table.get_mut(value) {
            Some(slot) => slot,
            None => return 0,
        };

        match NonZeroUsize::new(slot.get().saturating_sub(count)) {
            Some(rest) => {
                *slot = rest;
                self.total -= count as u128;
                count
            }
            None => self.remove_entry(value),
        }
    }

    /// Deletes the entry for `value`, returning its multiplicity.
    pub(crate) fn remove_entry<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let removed = self.table.remove(value).map_or(0, NonZeroUsize::get);
        self.total -= removed as u128;
        removed
    }
}

impl<T, S> Default for CountMap<T, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<T, S> PartialEq for CountMap<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<T, S> Eq for CountMap<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}
