use ordered_tree::OrderedTree;

use std::collections::{BTreeMap, HashSet};

use crate::{init_logging, Op};

/// Checks the ordering invariant through the public shape accessors: every key must sit strictly
/// between the bounds inherited from its ancestors.
fn is_ordered(tree: &OrderedTree<i8, i8>) -> bool {
    let mut stack: Vec<_> = tree.root().map(|n| (n, None, None)).into_iter().collect();
    while let Some((node, low, high)) = stack.pop() {
        let key = *node.key();
        if low.map_or(false, |low: i8| key <= low) || high.map_or(false, |high: i8| key >= high) {
            return false;
        }
        stack.extend(node.left().map(|n| (n, low, Some(key))));
        stack.extend(node.right().map(|n| (n, Some(key), high)));
    }
    true
}

/// Applies a set of operations to a tree and a `BTreeMap`, checking after each one that the tree
/// is still ordered and holds exactly the map's entries.
fn do_ops(ops: &[Op<i8, i8>], bst: &mut OrderedTree<i8, i8>, map: &mut BTreeMap<i8, i8>) -> bool {
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                if bst.insert(*k, *v) != map.insert(*k, *v) {
                    return false;
                }
            }
            Op::Remove(k) => {
                if bst.remove(k) != map.remove(k) {
                    return false;
                }
            }
            Op::Clone => {
                let copy = bst.clone();
                if !copy.iter().eq(bst.iter()) {
                    return false;
                }
            }
            Op::Take => {
                let moved = bst.take();
                if !bst.is_empty() || map.keys().any(|k| bst.lookup(k).is_some()) {
                    return false;
                }
                *bst = moved;
            }
        }

        if !is_ordered(bst) || bst.len() != map.len() || !bst.iter().eq(map.iter()) {
            return false;
        }
    }

    true
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
        init_logging();
        let mut tree = OrderedTree::new();
        let mut map = BTreeMap::new();

        do_ops(&ops, &mut tree, &mut map)
            && map.keys().all(|key| tree.lookup(key) == map.get(key))
    }

    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            tree.insert(*x, *x);
        }

        xs.iter().all(|x| tree.lookup(x) == Some(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            tree.insert(*x, *x);
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.lookup(x).is_none())
    }

    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree = OrderedTree::new();
        for x in &xs {
            tree.insert(*x, *x);
        }
        for delete in &deletes {
            tree.remove(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| tree.lookup(x).is_none())
            && still_present.iter().all(|x| tree.lookup(x).is_some())
    }

    fn copies_are_independent(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let original: OrderedTree<_, _> = xs.iter().map(|x| (*x, *x)).collect();
        let before: Vec<_> = original.iter().map(|(k, v)| (*k, *v)).collect();

        let mut copy = original.clone();
        for delete in &deletes {
            copy.remove(delete);
            copy.insert(delete.wrapping_add(1), 0);
        }

        original.iter().map(|(k, v)| (*k, *v)).eq(before)
    }

    fn overwrite_keeps_one_node(xs: Vec<(i8, i8)>) -> bool {
        let tree: OrderedTree<_, _> = xs.iter().copied().collect();
        let distinct: HashSet<_> = xs.iter().map(|(k, _)| *k).collect();

        tree.len() == distinct.len()
            && tree.iter().count() == distinct.len()
            && xs.iter().rev().all(|(k, _)| {
                // The last write for each key wins.
                let last = xs.iter().rev().find(|(other, _)| other == k).map(|(_, v)| v);
                tree.lookup(k) == last
            })
    }
}
