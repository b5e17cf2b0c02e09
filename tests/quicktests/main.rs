//! Property tests driving an `OrderedTree` through the public API only.

use quickcheck::{Arbitrary, Gen};

mod ordered;

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<K, V> {
    /// Insert the K, V into the data structure
    Insert(K, V),
    /// Remove the K from the data structure
    Remove(K),
    /// Copy the data structure and check the copy matches
    Clone,
    /// Move the data structure out and back again
    Take,
}

impl<K, V> Arbitrary for Op<K, V>
where
    K: Arbitrary,
    V: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(K::arbitrary(g), V::arbitrary(g)),
            1 => Op::Remove(K::arbitrary(g)),
            2 => Op::Clone,
            3 => Op::Take,
            _ => unreachable!(),
        }
    }
}

/// Routes the tree's `log` output through the test harness. `RUST_LOG=trace` shows every
/// structural change.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
