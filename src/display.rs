//! Text renderers for an [`OrderedTree`]. They only consume the tree's traversals.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::display::{Entries, Indented};
//! use ordered_tree::OrderedTree;
//!
//! let tree: OrderedTree<_, _> = [(2, "two"), (1, "one"), (3, "three")].into_iter().collect();
//!
//! assert_eq!(Entries::new(&tree).to_string(), "1 one\n2 two\n3 three\n");
//! assert_eq!(Indented::new(&tree).to_string(), "|--1 one\n2 two\n|--3 three\n");
//! ```

use std::fmt;

use crate::OrderedTree;

/// Renders one `key item` line per entry, in ascending key order.
pub struct Entries<'a, K, I>(&'a OrderedTree<K, I>);

impl<'a, K, I> Entries<'a, K, I> {
    /// Wraps `tree` for display.
    pub fn new(tree: &'a OrderedTree<K, I>) -> Self {
        Self(tree)
    }
}

impl<'a, K, I> fmt::Display for Entries<'a, K, I>
where
    K: fmt::Display,
    I: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, item) in self.0 {
            writeln!(f, "{} {}", key, item)?;
        }
        Ok(())
    }
}

/// Renders the tree sideways: entries in ascending key order, each prefixed by `|` and two
/// dashes per level below the root. Reading the output top to bottom walks the left subtree,
/// then the node, then the right subtree.
pub struct Indented<'a, K, I>(&'a OrderedTree<K, I>);

impl<'a, K, I> Indented<'a, K, I> {
    /// Wraps `tree` for display.
    pub fn new(tree: &'a OrderedTree<K, I>) -> Self {
        Self(tree)
    }
}

impl<'a, K, I> fmt::Display for Indented<'a, K, I>
where
    K: fmt::Display,
    I: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (depth, key, item) in self.0.iter_with_depth() {
            if depth > 0 {
                f.write_str("|")?;
            }
            for _ in 0..depth {
                f.write_str("--")?;
            }
            writeln!(f, "{} {}", key, item)?;
        }
        Ok(())
    }
}
