//! Property tests against the public API of each tree.

mod binary_tree;
mod ordered;
