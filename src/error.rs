use thiserror::Error;

/// Errors returned by fallible [`SparseMultiset`](crate::SparseMultiset) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A negative number was supplied where a multiplicity was expected.
    ///
    /// The multiset is left unmodified when this is returned.
    #[error("multiplicity must be non-negative, got {count}")]
    InvalidArgument {
        /// The rejected count.
        count: isize,
    },
}

/// Result type with [`Error`] as the default error.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Converts a caller-supplied count into a multiplicity.
pub(crate) fn check_count(operation: &'static str, count: isize) -> Result<usize> {
    usize::try_from(count).map_err(|_| {
        log::debug!("{operation}: rejected negative count {count}");
        Error::InvalidArgument { count }
    })
}
