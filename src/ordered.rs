//! An unbalanced, owning BST. Every node is exclusively owned by its parent's link so the tree
//! can be mutated in place by rewriting links as the search descends.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.lookup(&1), None);
//!
//! tree.insert(1, "one");
//! assert_eq!(tree.lookup(&1), Some(&"one"));
//!
//! // Inserting a new item for the same key overwrites the item.
//! tree.insert(1, "uno");
//! assert_eq!(tree.lookup(&1), Some(&"uno"));
//! assert_eq!(tree.len(), 1);
//!
//! // Removing a node returns its item.
//! assert_eq!(tree.remove(&1), Some("uno"));
//! assert_eq!(tree.lookup(&1), None);
//! ```

use std::alloc::{self, Layout};
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ptr::NonNull;

use log::{trace, warn};

use crate::error::TryInsertError;
use crate::iter::{IntoIter, Iter, IterWithDepth};

/// A map from an ordered key to an item, backed by a plain (not self-balancing) Binary Search
/// Tree.
///
/// Rotations are available through [`LinkMut`] handles so a balancing policy can be layered on
/// top, but `insert` and `remove` never rotate on their own.
pub struct OrderedTree<K, I> {
    root: Link<K, I>,
    len: usize,
}

impl<K, I> Default for OrderedTree<K, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, I> Clone for OrderedTree<K, I>
where
    K: Clone,
    I: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.deep_clone(),
            len: self.len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        // Assigning drops the previous nodes once the copy is complete.
        self.root = source.root.deep_clone();
        self.len = source.len;
    }
}

impl<K, I> fmt::Debug for OrderedTree<K, I>
where
    K: fmt::Debug,
    I: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, I> OrderedTree<K, I> {
    /// Generate a new, empty `OrderedTree`.
    pub const fn new() -> Self {
        Self {
            root: Link(None),
            len: 0,
        }
    }

    /// The number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node, leaving an empty tree.
    pub fn clear(&mut self) {
        self.root = Link(None);
        self.len = 0;
    }

    /// Moves the whole tree out in `O(1)`, leaving `self` empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut source: OrderedTree<_, _> = [(1, 'a'), (2, 'b')].into_iter().collect();
    /// let destination = source.take();
    ///
    /// assert!(source.is_empty());
    /// assert_eq!(source.lookup(&1), None);
    /// assert_eq!(destination.lookup(&1), Some(&'a'));
    /// ```
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a tree with only a
    /// root has a height of 1.
    pub fn height(&self) -> usize {
        self.iter_with_depth()
            .map(|(depth, _, _)| depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// The root node, if any. Nodes expose their children so the tree's shape can be walked.
    pub fn root(&self) -> Option<&Node<K, I>> {
        self.root.node()
    }

    /// A handle on the link owning the root, used to rotate the tree or to walk down to a
    /// subtree to rotate.
    pub fn root_link(&mut self) -> LinkMut<'_, K, I> {
        LinkMut {
            link: &mut self.root,
        }
    }

    /// Iterates over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_, _> = [(2, 'b'), (3, 'c'), (1, 'a')].into_iter().collect();
    /// let entries: Vec<_> = tree.iter().collect();
    ///
    /// assert_eq!(entries, [(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, I> {
        Iter::new(self.root.node(), self.len)
    }

    /// Iterates over the entries in ascending key order along with how deep each node sits in
    /// the tree. The root has a depth of 0.
    pub fn iter_with_depth(&self) -> IterWithDepth<'_, K, I> {
        IterWithDepth::new(self.root.node(), self.len)
    }

    /// Potentially finds the item associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.lookup(&1), Some(&2));
    /// assert_eq!(tree.lookup(&42), None);
    /// ```
    pub fn lookup(&self, key: &K) -> Option<&I>
    where
        K: Ord,
    {
        let mut current = self.root.node();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.node(),
                Ordering::Equal => return Some(&node.item),
                Ordering::Greater => current = node.right.node(),
            }
        }
        None
    }

    /// Like [`lookup`][Self::lookup] but the item may be modified in place.
    pub fn lookup_mut(&mut self, key: &K) -> Option<&mut I>
    where
        K: Ord,
    {
        let mut current = self.root.node_mut();
        while let Some(node) = current {
            match key.cmp(&node.key) {
                Ordering::Less => current = node.left.node_mut(),
                Ordering::Equal => return Some(&mut node.item),
                Ordering::Greater => current = node.right.node_mut(),
            }
        }
        None
    }

    /// Whether a node with the given key is in the tree.
    pub fn contains_key(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.lookup(key).is_some()
    }

    /// Inserts the given item into the tree stored at the given key. Inserting a new item for an
    /// existing key overwrites its item in place and returns the previous one.
    ///
    /// # Panics
    ///
    /// Aborts through [`std::alloc::handle_alloc_error`] when a node can't be allocated. Use
    /// [`try_insert`][Self::try_insert] to handle that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    ///
    /// assert_eq!(tree.insert(1, 2), None);
    /// assert_eq!(tree.lookup(&1), Some(&2));
    ///
    /// assert_eq!(tree.insert(1, 3), Some(2));
    /// assert_eq!(tree.lookup(&1), Some(&3));
    /// ```
    pub fn insert(&mut self, key: K, item: I) -> Option<I>
    where
        K: Ord,
    {
        match self.try_insert(key, item) {
            Ok(replaced) => replaced,
            Err(TryInsertError::AllocationFailed { .. }) => {
                alloc::handle_alloc_error(Layout::new::<Node<K, I>>())
            }
        }
    }

    /// Like [`insert`][Self::insert] but reports allocation failure instead of aborting. On
    /// failure the tree is left exactly as it was and the key and item are handed back inside
    /// the error.
    pub fn try_insert(&mut self, key: K, item: I) -> Result<Option<I>, TryInsertError<K, I>>
    where
        K: Ord,
    {
        let replaced = self.root.insert(key, item)?;
        if replaced.is_none() {
            self.len += 1;
        }
        Ok(replaced)
    }

    /// Removes the node containing the given key from the tree and returns its item. If the
    /// tree does not contain a node with the key, nothing happens.
    ///
    /// A node with two children keeps its place in the tree: it takes over the key and item of
    /// its in-order successor (the leftmost node of its right subtree) and the successor is
    /// removed instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.remove(&1), Some(2));
    /// assert_eq!(tree.lookup(&1), None);
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<I>
    where
        K: Ord,
    {
        let removed = self.root.remove(key)?;
        self.len -= 1;
        Some(removed)
    }

    /// A handle on the link owning the node with the given key, or `None` if the key isn't in
    /// the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_, _> = [2, 1, 5, 4, 3, 6].into_iter().map(|k| (k, ())).collect();
    /// tree.link_mut(&5).unwrap().rotate_right();
    ///
    /// let keys: Vec<_> = tree.iter().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [1, 2, 3, 4, 5, 6]);
    /// assert_eq!(tree.root().unwrap().right().unwrap().key(), &4);
    /// ```
    pub fn link_mut(&mut self, key: &K) -> Option<LinkMut<'_, K, I>>
    where
        K: Ord,
    {
        self.root.find_mut(key).map(|link| LinkMut { link })
    }
}

impl<K, I> FromIterator<(K, I)> for OrderedTree<K, I>
where
    K: Ord,
{
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K, I> Extend<(K, I)> for OrderedTree<K, I>
where
    K: Ord,
{
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, iter: T) {
        for (key, item) in iter {
            self.insert(key, item);
        }
    }
}

impl<'a, K, I> IntoIterator for &'a OrderedTree<K, I> {
    type Item = (&'a K, &'a I);
    type IntoIter = Iter<'a, K, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, I> IntoIterator for OrderedTree<K, I> {
    type Item = (K, I);
    type IntoIter = IntoIter<K, I>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter::new(self.root.0.take(), self.len)
    }
}

/// A node of an [`OrderedTree`]. Every key in its left subtree is smaller than its key and every
/// key in its right subtree is larger.
pub struct Node<K, I> {
    pub(crate) key: K,
    pub(crate) item: I,
    pub(crate) left: Link<K, I>,
    pub(crate) right: Link<K, I>,
}

impl<K, I> fmt::Debug for Node<K, I>
where
    K: fmt::Debug,
    I: fmt::Debug,
{
    // TODO stack based Debug
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("item", &self.item)
            .field("left", &self.left())
            .field("right", &self.right())
            .finish()
    }
}

impl<K, I> Node<K, I> {
    /// Allocates a childless node without aborting when the allocator is out of memory.
    fn try_new_boxed(key: K, item: I) -> Result<Box<Self>, TryInsertError<K, I>> {
        let layout = Layout::new::<Self>();
        // SAFETY: `Node` always holds two links so its layout is never zero-sized.
        let ptr = unsafe { alloc::alloc(layout) }.cast::<Self>();
        let Some(ptr) = NonNull::new(ptr) else {
            warn!("out of memory allocating a {} byte tree node", layout.size());
            return Err(TryInsertError::AllocationFailed { key, item });
        };

        // SAFETY: `ptr` was just allocated by the global allocator with the layout of `Self`,
        // which is what `Box::from_raw` expects, and it's initialized before the `Box` exists.
        unsafe {
            ptr.as_ptr().write(Node {
                key,
                item,
                left: Link(None),
                right: Link(None),
            });
            Ok(Box::from_raw(ptr.as_ptr()))
        }
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The item stored in this node.
    pub fn item(&self) -> &I {
        &self.item
    }

    /// The root of the left subtree.
    pub fn left(&self) -> Option<&Self> {
        self.left.node()
    }

    /// The root of the right subtree.
    pub fn right(&self) -> Option<&Self> {
        self.right.node()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.0.is_none() && self.right.0.is_none()
    }

    /// Checks the ordering invariant between this node and its direct children.
    fn debug_check_children(&self)
    where
        K: Ord,
    {
        if cfg!(debug_assertions) {
            if let Some(left) = self.left() {
                assert!(self.key > left.key, "Left child key is smaller");
            }
            if let Some(right) = self.right() {
                assert!(self.key < right.key, "Right child key is larger");
            }
        }
    }
}

/// An ownership slot that is either empty or exclusively owns one subtree.
pub(crate) struct Link<K, I>(pub(crate) Option<Box<Node<K, I>>>);

impl<K, I> Drop for Link<K, I> {
    fn drop(&mut self) {
        let Some(root) = self.0.take() else {
            return;
        };
        // Detach children before each node is dropped so a degenerate (list shaped) tree doesn't
        // recurse once per level.
        let mut stack = vec![root];
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.0.take());
            stack.extend(node.right.0.take());
        }
    }
}

impl<K, I> Link<K, I> {
    pub(crate) fn node(&self) -> Option<&Node<K, I>> {
        self.0.as_deref()
    }

    fn node_mut(&mut self) -> Option<&mut Node<K, I>> {
        self.0.as_deref_mut()
    }

    /// Duplicates every node of this subtree. Uses an explicit stack so the copy of a degenerate
    /// tree doesn't overflow the call stack.
    fn deep_clone(&self) -> Self
    where
        K: Clone,
        I: Clone,
    {
        enum Step<'a, K, I> {
            /// Copy this subtree and push the copy onto `built`.
            Visit(&'a Link<K, I>),
            /// Both children have been copied: pop them and build this node.
            Build(&'a Node<K, I>),
        }

        let mut steps = vec![Step::Visit(self)];
        let mut built: Vec<Link<K, I>> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Visit(link) => match link.node() {
                    None => built.push(Link(None)),
                    Some(node) => {
                        steps.push(Step::Build(node));
                        steps.push(Step::Visit(&node.right));
                        steps.push(Step::Visit(&node.left));
                    }
                },
                Step::Build(node) => {
                    let right = built.pop().expect("Right child copied before its parent");
                    let left = built.pop().expect("Left child copied before its parent");
                    built.push(Link(Some(Box::new(Node {
                        key: node.key.clone(),
                        item: node.item.clone(),
                        left,
                        right,
                    }))));
                }
            }
        }

        built.pop().unwrap_or(Link(None))
    }

    /// Descends to the empty link where `key` belongs and allocates a node there, or overwrites
    /// the item of the node already holding `key`.
    fn insert(&mut self, key: K, item: I) -> Result<Option<I>, TryInsertError<K, I>>
    where
        K: Ord,
    {
        let mut link = self;
        while let Some(ref mut node) = link.0 {
            match key.cmp(&node.key) {
                Ordering::Less if node.left.0.is_none() => {
                    node.left.0 = Some(Node::try_new_boxed(key, item)?);
                    node.debug_check_children();
                    trace!("inserted new leaf node");
                    return Ok(None);
                }
                Ordering::Less => link = &mut node.left,
                Ordering::Equal => return Ok(Some(mem::replace(&mut node.item, item))),
                Ordering::Greater if node.right.0.is_none() => {
                    node.right.0 = Some(Node::try_new_boxed(key, item)?);
                    node.debug_check_children();
                    trace!("inserted new leaf node");
                    return Ok(None);
                }
                Ordering::Greater => link = &mut node.right,
            }
        }

        link.0 = Some(Node::try_new_boxed(key, item)?);
        trace!("inserted new root node");
        Ok(None)
    }

    /// The link owning the node with the given key.
    fn find_mut(&mut self, key: &K) -> Option<&mut Self>
    where
        K: Ord,
    {
        let mut link = self;
        loop {
            match key.cmp(&link.node()?.key) {
                Ordering::Less => link = &mut link.node_mut()?.left,
                Ordering::Equal => return Some(link),
                Ordering::Greater => link = &mut link.node_mut()?.right,
            }
        }
    }

    fn remove(&mut self, key: &K) -> Option<I>
    where
        K: Ord,
    {
        self.find_mut(key)?.unlink()
    }

    /// Removes the node owned by this link, rewriting the link to whatever takes the node's
    /// place, and returns the removed item.
    fn unlink(&mut self) -> Option<I> {
        let mut node = self.0.take()?;
        let removed = match (node.left.0.take(), node.right.0.take()) {
            (None, None) => {
                trace!("removing leaf node");
                let Node { item, .. } = *node;
                item
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("removing node with one child");
                self.0 = Some(child);
                let Node { item, .. } = *node;
                item
            }
            (Some(left), Some(right)) => {
                trace!("removing node with two children, promoting its in-order successor");
                node.left = Link(Some(left));
                node.right = Link(Some(right));
                let successor = node
                    .right
                    .take_min()
                    .expect("Two children => right subtree has a minimum");
                let Node { key, item, .. } = *successor;
                node.key = key;
                let removed = mem::replace(&mut node.item, item);
                self.0 = Some(node);
                removed
            }
        };
        Some(removed)
    }

    /// Detaches the leftmost node of this subtree, splicing its right child into its place. The
    /// returned node has no children.
    fn take_min(&mut self) -> Option<Box<Node<K, I>>> {
        let mut link = self;
        while link.node()?.left.0.is_some() {
            link = &mut link.node_mut()?.left;
        }
        let mut min = link.0.take()?;
        link.0 = min.right.0.take();
        Some(min)
    }

    /// Rotate self to the left. This moves the right child up vertically and self down
    /// vertically.
    ///
    /// ## Panics
    ///
    /// When self is empty or a leaf, or when the right child is missing or a leaf. Nothing is
    /// modified in that case.
    ///
    /// # Diagram
    ///
    /// ```text
    ///    old_root (i.e. "self")           new_root
    ///     /     \                          /     \
    ///    x    new_root    rotate ->   old_root    z
    ///          /  \                     /  \
    ///         y    z                   x    y
    /// ```
    fn rotate_left(&mut self)
    where
        K: Ord,
    {
        let old_root = self.node().expect("Cannot rotate an empty subtree.");
        assert!(!old_root.is_leaf(), "Cannot rotate a leaf node.");
        let pivot = old_root.right().expect("Rotate left => right child");
        assert!(!pivot.is_leaf(), "Rotate left => right child is not a leaf");

        let mut old_root = self.0.take().expect("Checked above");
        let mut new_root = old_root.right.0.take().expect("Checked above");
        old_root.right = Link(new_root.left.0.take());
        old_root.debug_check_children();
        new_root.left = Link(Some(old_root));
        new_root.debug_check_children();
        self.0 = Some(new_root);
        trace!("rotated subtree left");
    }

    /// Rotate self to the right. This moves the left child up vertically and self down
    /// vertically.
    ///
    /// ## Panics
    ///
    /// When self is empty or a leaf, or when the left child is missing or a leaf. Nothing is
    /// modified in that case.
    ///
    /// # Diagram
    ///
    /// ```text
    ///       old_root (i.e. "self")      new_root
    ///        /     \                     /     \
    ///    new_root   z     rotate ->     x    old_root
    ///     / \                                 /  \
    ///    x   y                               y    z
    /// ```
    fn rotate_right(&mut self)
    where
        K: Ord,
    {
        let old_root = self.node().expect("Cannot rotate an empty subtree.");
        assert!(!old_root.is_leaf(), "Cannot rotate a leaf node.");
        let pivot = old_root.left().expect("Rotate right => left child");
        assert!(!pivot.is_leaf(), "Rotate right => left child is not a leaf");

        let mut old_root = self.0.take().expect("Checked above");
        let mut new_root = old_root.left.0.take().expect("Checked above");
        old_root.left = Link(new_root.right.0.take());
        old_root.debug_check_children();
        new_root.right = Link(Some(old_root));
        new_root.debug_check_children();
        self.0 = Some(new_root);
        trace!("rotated subtree right");
    }
}

/// A mutable handle on one link of an [`OrderedTree`]. The handle can walk down the tree and
/// rotate the subtree it owns, but can't otherwise replace what the link holds, so the tree's
/// invariants survive anything done through it.
pub struct LinkMut<'a, K, I> {
    link: &'a mut Link<K, I>,
}

impl<'a, K, I> LinkMut<'a, K, I> {
    /// The node this link owns, if any.
    pub fn node(&self) -> Option<&Node<K, I>> {
        self.link.node()
    }

    /// The key of the node this link owns, if any.
    pub fn key(&self) -> Option<&K> {
        self.node().map(Node::key)
    }

    /// Whether this link owns no subtree.
    pub fn is_empty(&self) -> bool {
        self.link.0.is_none()
    }

    /// Moves the handle to the left child's link. Returns `None` if this link is empty.
    pub fn left(self) -> Option<LinkMut<'a, K, I>> {
        self.link
            .node_mut()
            .map(|node| LinkMut { link: &mut node.left })
    }

    /// Moves the handle to the right child's link. Returns `None` if this link is empty.
    pub fn right(self) -> Option<LinkMut<'a, K, I>> {
        self.link
            .node_mut()
            .map(|node| LinkMut { link: &mut node.right })
    }

    /// Rotates the subtree owned by this link to the left: the right child becomes the subtree
    /// root and the old root becomes its left child. The in-order sequence is unchanged.
    ///
    /// ## Panics
    ///
    /// When the subtree root or its right child is missing or is a leaf. The tree is left
    /// untouched.
    pub fn rotate_left(&mut self)
    where
        K: Ord,
    {
        self.link.rotate_left();
    }

    /// Rotates the subtree owned by this link to the right: the left child becomes the subtree
    /// root and the old root becomes its right child. The in-order sequence is unchanged.
    ///
    /// ## Panics
    ///
    /// When the subtree root or its left child is missing or is a leaf. The tree is left
    /// untouched.
    pub fn rotate_right(&mut self)
    where
        K: Ord,
    {
        self.link.rotate_right();
    }
}
