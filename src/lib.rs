//! This crate exposes an unbalanced Binary Search Tree along with a couple
//! of simpler tree utilities, mostly for educational purposes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is
//! defined as the longest path from the root `Node` to a leaf `Node`). The tree
//! in [`ordered`] does nothing to keep that height down: inserting sorted values
//! gives a tree that is really a linked list. [`ordered::Tree::is_balanced`] can
//! tell you whether that has happened.
//!
//! ## Other trees
//!
//! [`binary_tree`] is a plain binary tree with no ordering between nodes and
//! [`nary`] is a tree whose nodes have any number of children. Neither shares
//! anything with the BST.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod binary_tree;
pub mod error;
pub mod nary;
pub mod ordered;
