use thiserror::Error;

/// Errors returned by [`OrderedTree::try_insert`][crate::OrderedTree::try_insert].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TryInsertError<K, I> {
    /// The allocator could not provide memory for a new node. The tree is unchanged and the
    /// rejected key and item are handed back.
    #[error("failed to allocate a new tree node")]
    AllocationFailed {
        /// The key that could not be inserted.
        key: K,
        /// The item that could not be inserted.
        item: I,
    },
}

impl<K, I> TryInsertError<K, I> {
    /// Recovers the key and item that were passed to `try_insert`.
    pub fn into_inner(self) -> (K, I) {
        match self {
            Self::AllocationFailed { key, item } => (key, item),
        }
    }
}
