//! In-order iterators over an [`OrderedTree`][crate::OrderedTree]. Each keeps the path of
//! ancestors still to be visited on an explicit stack, so walking a degenerate tree doesn't
//! recurse.

use std::iter::FusedIterator;

use crate::ordered::Node;

/// Iterator over `(&key, &item)` in ascending key order. Created by
/// [`OrderedTree::iter`][crate::OrderedTree::iter].
pub struct Iter<'a, K, I> {
    /// Nodes whose left subtree is being (or has been) visited but which haven't been yielded.
    stack: Vec<&'a Node<K, I>>,
    len: usize,
}

impl<'a, K, I> Clone for Iter<'a, K, I> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            len: self.len,
        }
    }
}

impl<'a, K, I> Iter<'a, K, I> {
    pub(crate) fn new(root: Option<&'a Node<K, I>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, I>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K, I> Iterator for Iter<'a, K, I> {
    type Item = (&'a K, &'a I);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        self.len -= 1;
        Some((&node.key, &node.item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, I> ExactSizeIterator for Iter<'a, K, I> {}
impl<'a, K, I> FusedIterator for Iter<'a, K, I> {}

/// Iterator over `(depth, &key, &item)` in ascending key order, i.e. left subtree, then node,
/// then right subtree. The root has a depth of 0. Created by
/// [`OrderedTree::iter_with_depth`][crate::OrderedTree::iter_with_depth].
pub struct IterWithDepth<'a, K, I> {
    stack: Vec<(usize, &'a Node<K, I>)>,
    len: usize,
}

impl<'a, K, I> IterWithDepth<'a, K, I> {
    pub(crate) fn new(root: Option<&'a Node<K, I>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            len,
        };
        iter.push_left_spine(root, 0);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, I>>, mut depth: usize) {
        while let Some(n) = node {
            self.stack.push((depth, n));
            node = n.left();
            depth += 1;
        }
    }
}

impl<'a, K, I> Iterator for IterWithDepth<'a, K, I> {
    type Item = (usize, &'a K, &'a I);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.push_left_spine(node.right(), depth + 1);
        self.len -= 1;
        Some((depth, &node.key, &node.item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, K, I> ExactSizeIterator for IterWithDepth<'a, K, I> {}
impl<'a, K, I> FusedIterator for IterWithDepth<'a, K, I> {}

/// Owning iterator over `(key, item)` in ascending key order. Nodes are freed as they are
/// yielded.
pub struct IntoIter<K, I> {
    stack: Vec<Box<Node<K, I>>>,
    len: usize,
}

impl<K, I> IntoIter<K, I> {
    pub(crate) fn new(root: Option<Box<Node<K, I>>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            len,
        };
        iter.push_left_spine(root);
        iter
    }

    /// Unlinks the left spine so every node on the stack only still owns its right subtree.
    fn push_left_spine(&mut self, mut node: Option<Box<Node<K, I>>>) {
        while let Some(mut n) = node {
            node = n.left.0.take();
            self.stack.push(n);
        }
    }
}

impl<K, I> Iterator for IntoIter<K, I> {
    type Item = (K, I);

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.0.take());
        self.len -= 1;
        let Node { key, item, .. } = *node;
        Some((key, item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<K, I> ExactSizeIterator for IntoIter<K, I> {}
impl<K, I> FusedIterator for IntoIter<K, I> {}
