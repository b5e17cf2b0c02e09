//! This crate exposes an ordered map, [`OrderedTree`], built on a plain Binary Search Tree
//! together with the rotation primitives a self-balancing variant would be built from.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and the
//! item associated with it and will sometimes have child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! The benefits of these invariants are many. For instance, searching for
//! keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). Without rebalancing the height
//! depends on insertion order: ascending inserts build a tree with `height == N`.
//! [Rotations][LinkMut::rotate_left] reshape a subtree without changing its
//! contents, which is how balanced variants keep the height at `O(lg N)`. BSTs
//! also naturally support sorted iteration by visiting the left subtree, then
//! the subtree root, then the right subtree.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod display;
mod error;
pub mod iter;
pub mod ordered;


pub use error::TryInsertError;
pub use ordered::{LinkMut, Node, OrderedTree};
