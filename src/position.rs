use std::iter::FusedIterator;

/// A position in the flattened view of a `SparseMultiset`.
///
/// A position is an offset in `0..=len`, where `len` is the number of
/// elements (including duplicates) in the multiset it came from. Positions are
/// ordered by offset and carry no reference into the multiset, so resolving
/// one walks the flattened view from the start. Positions only stay meaningful
/// while the multiset they came from is unchanged.
///
/// # Examples
///
/// ```
/// use sparse_multiset::SparseMultiset;
///
/// let set: SparseMultiset<_> = ["a", "a", "b"].into();
///
/// let mut position = set.first_position();
/// let mut seen = Vec::new();
/// while position < set.past_last_position() {
///     seen.push(set[position]);
///     position = position.successor();
/// }
///
/// assert_eq!(seen.len(), 3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    offset: usize,
}

impl Position {
    pub(crate) const fn new(offset: usize) -> Self {
        Self { offset }
    }

    /// Offset into the flattened view.
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// The next position.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self::new(self.offset + 1)
    }

    /// The previous position.
    ///
    /// # Panics
    ///
    /// Panics if called on the first position.
    #[must_use]
    pub fn predecessor(self) -> Self {
        match self.offset.checked_sub(1) {
            Some(offset) => Self::new(offset),
            None => panic!("the first position has no predecessor"),
        }
    }
}

/// An iterator over every dereferenceable `Position` of a `SparseMultiset`,
/// from the first position up to but excluding the past-the-last one.
#[derive(Clone, Debug)]
pub struct Positions {
    front: usize,
    back: usize,
}

impl Positions {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            front: 0,
            back: len,
        }
    }
}

impl Iterator for Positions {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.front < self.back {
            let position = Position::new(self.front);
            self.front += 1;
            Some(position)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Positions {
    fn next_back(&mut self) -> Option<Position> {
        if self.front < self.back {
            self.back -= 1;
            Some(Position::new(self.back))
        } else {
            None
        }
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}
