use hashbrown::hash_map;
use std::fmt::{self, Debug};
use std::iter::FusedIterator;
use std::num::NonZeroUsize;

/// An iterator over the flattened view of a `SparseMultiset`.
///
/// Each distinct element is yielded once per unit of its multiplicity, so a
/// full traversal yields [`len`](crate::SparseMultiset::len) items. Distinct
/// elements are visited in arbitrary order, with all copies of one element
/// yielded back to back.
pub struct Iter<'a, T> {
    entries: hash_map::Iter<'a, T, NonZeroUsize>,
    current: Option<&'a T>,
    repeats: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(entries: hash_map::Iter<'a, T, NonZeroUsize>, len: usize) -> Self {
        Self {
            entries,
            current: None,
            repeats: 0,
            remaining: len,
        }
    }

    fn advance_entry(&mut self) -> Option<()> {
        let (value, count) = self.entries.next()?;
        self.current = Some(value);
        self.repeats = count.get();
        Some(())
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            current: self.current,
            repeats: self.repeats,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        while self.repeats == 0 {
            self.advance_entry()?;
        }
        self.repeats -= 1;
        self.remaining = self.remaining.saturating_sub(1);
        self.current
    }

    /// Skips whole entries at a time, so this is linear in the number of
    /// distinct elements passed over rather than in `n`.
    fn nth(&mut self, mut n: usize) -> Option<&'a T> {
        while n >= self.repeats {
            n -= self.repeats;
            self.remaining = self.remaining.saturating_sub(self.repeats);
            self.repeats = 0;
            self.advance_entry()?;
        }
        self.repeats -= n;
        self.remaining = self.remaining.saturating_sub(n);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: Debug> Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An owning iterator over the flattened view of a `SparseMultiset`.
///
/// All but the last copy of each element are clones.
pub struct IntoIter<T> {
    entries: hash_map::IntoIter<T, NonZeroUsize>,
    current: Option<(T, usize)>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    pub(crate) fn new(entries: hash_map::IntoIter<T, NonZeroUsize>, len: usize) -> Self {
        Self {
            entries,
            current: None,
            remaining: len,
        }
    }
}

impl<T: Clone> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let (value, repeats) = match self.current.take() {
            Some(current) => current,
            None => {
                let (value, count) = self.entries.next()?;
                (value, count.get())
            }
        };
        self.remaining = self.remaining.saturating_sub(1);
        if repeats > 1 {
            self.current = Some((value.clone(), repeats - 1));
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T: Clone> FusedIterator for IntoIter<T> {}

impl<T: Debug> Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

/// An iterator over the distinct elements of a `SparseMultiset`.
pub struct Distinct<'a, T> {
    iter: hash_map::Keys<'a, T, NonZeroUsize>,
}

impl<'a, T> Distinct<'a, T> {
    pub(crate) fn new(iter: hash_map::Keys<'a, T, NonZeroUsize>) -> Self {
        Self { iter }
    }
}

impl<T> Clone for Distinct<'_, T> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T> Iterator for Distinct<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.iter.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for Distinct<'_, T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for Distinct<'_, T> {}

impl<T: Debug> Debug for Distinct<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over the `(element, multiplicity)` pairs of a `SparseMultiset`.
pub struct Counts<'a, T> {
    iter: hash_map::Iter<'a, T, NonZeroUsize>,
}

impl<'a, T> Counts<'a, T> {
    pub(crate) fn new(iter: hash_map::Iter<'a, T, NonZeroUsize>) -> Self {
        Self { iter }
    }
}

impl<T> Clone for Counts<'_, T> {
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
        }
    }
}

impl<'a, T> Iterator for Counts<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<(&'a T, usize)> {
        self.iter.next().map(|(value, count)| (value, count.get()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for Counts<'_, T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for Counts<'_, T> {}

impl<T: Debug> Debug for Counts<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.clone()).finish()
    }
}

/// An owning iterator over the `(element, multiplicity)` pairs of a `SparseMultiset`.
pub struct IntoCounts<T> {
    iter: hash_map::IntoIter<T, NonZeroUsize>,
}

impl<T> IntoCounts<T> {
    pub(crate) fn new(iter: hash_map::IntoIter<T, NonZeroUsize>) -> Self {
        Self { iter }
    }
}

impl<T> Iterator for IntoCounts<T> {
    type Item = (T, usize);

    fn next(&mut self) -> Option<(T, usize)> {
        self.iter.next().map(|(value, count)| (value, count.get()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for IntoCounts<T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for IntoCounts<T> {}

impl<T: Debug> Debug for IntoCounts<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoCounts")
            .field("distinct", &self.iter.len())
            .finish_non_exhaustive()
    }
}

/// A draining iterator over the `(element, multiplicity)` pairs of a `SparseMultiset`.
pub struct Drain<'a, T> {
    iter: hash_map::Drain<'a, T, NonZeroUsize>,
}

impl<'a, T> Drain<'a, T> {
    pub(crate) fn new(iter: hash_map::Drain<'a, T, NonZeroUsize>) -> Self {
        Self { iter }
    }
}

impl<T> Iterator for Drain<'_, T> {
    type Item = (T, usize);

    fn next(&mut self) -> Option<(T, usize)> {
        self.iter.next().map(|(value, count)| (value, count.get()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T> ExactSizeIterator for Drain<'_, T> {
    fn len(&self) -> usize {
        self.iter.len()
    }
}

impl<T> FusedIterator for Drain<'_, T> {}

impl<T: Debug> Debug for Drain<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drain")
            .field("distinct", &self.iter.len())
            .finish_non_exhaustive()
    }
}
