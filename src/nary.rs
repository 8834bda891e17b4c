//! An n-ary tree where every node keeps a list of children instead of left and right edges. The
//! queries aggregate over every node, walking the tree with an explicit stack.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::nary::{NaryNode, NaryTree};
//!
//! let tree = NaryTree::new(Some(NaryNode::with_children(
//!     1,
//!     vec![NaryNode::new(2), NaryNode::new(3), NaryNode::new(4)],
//! )));
//!
//! assert_eq!(tree.sum_values(), 10);
//! assert_eq!(tree.count_evens(), 2);
//! assert_eq!(tree.num_greater(2), 2);
//! ```

/// A node of an [`NaryTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NaryNode {
    /// The value stored in this node.
    pub val: i64,
    /// Child nodes, in order.
    pub children: Vec<NaryNode>,
}

impl NaryNode {
    /// A node without children.
    pub fn new(val: i64) -> Self {
        Self {
            val,
            children: Vec::new(),
        }
    }

    /// A node with the given children.
    pub fn with_children(val: i64, children: Vec<NaryNode>) -> Self {
        Self { val, children }
    }
}

/// An n-ary tree of `i64`s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NaryTree {
    /// The root node, `None` for an empty tree.
    pub root: Option<NaryNode>,
}

impl NaryTree {
    /// Wraps the given root.
    pub fn new(root: Option<NaryNode>) -> Self {
        Self { root }
    }

    /// Sum of every value in the tree. An empty tree sums to 0.
    ///
    /// The sum is accumulated as an `i128` so it is exact for any tree that fits in memory.
    pub fn sum_values(&self) -> i128 {
        self.nodes().map(|node| i128::from(node.val)).sum()
    }

    /// How many values in the tree are even.
    pub fn count_evens(&self) -> usize {
        self.nodes().filter(|node| node.val % 2 == 0).count()
    }

    /// How many values in the tree are strictly greater than `x`.
    pub fn num_greater(&self, x: i64) -> usize {
        self.nodes().filter(|node| node.val > x).count()
    }

    fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.root.iter().collect(),
        }
    }
}

/// Depth first walk over every node. The visiting order isn't part of any contract since every
/// query here is an aggregate.
struct Nodes<'a> {
    stack: Vec<&'a NaryNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a NaryNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(&node.children);
        Some(node)
    }
}
