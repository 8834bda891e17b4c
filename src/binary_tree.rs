//! A plain binary tree. Unlike [`ordered::Tree`](crate::ordered::Tree) nothing relates a node's
//! value to its children's, so every query here has to look at the whole tree. Nodes are public so
//! callers can build any shape they like, and several queries identify nodes by address rather
//! than by value.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::binary_tree::BinaryTree;
//!
//! let tree: BinaryTree = "1,2,#,#,3,#,#".parse().unwrap();
//!
//! assert_eq!(tree.max_depth(), 2);
//! assert_eq!(tree.max_sum(), 6);
//! assert_eq!(tree.next_larger(1), Some(2));
//! assert_eq!(tree.to_string(), "1,2,#,#,3,#,#");
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::ptr;
use std::str::FromStr;

use tracing::debug;

use crate::error::ParseError;

/// Marker for an absent child in the serialized form.
const ABSENT: &str = "#";

/// A node of a [`BinaryTree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryTreeNode {
    /// The value stored in this node.
    pub val: i64,
    /// The root of the left subtree.
    pub left: Option<Box<BinaryTreeNode>>,
    /// The root of the right subtree.
    pub right: Option<Box<BinaryTreeNode>>,
}

impl BinaryTreeNode {
    /// A node without children.
    pub fn new(val: i64) -> Self {
        Self {
            val,
            left: None,
            right: None,
        }
    }

    /// A node with the given children.
    pub fn with_children(
        val: i64,
        left: Option<BinaryTreeNode>,
        right: Option<BinaryTreeNode>,
    ) -> Self {
        Self {
            val,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A binary tree of `i64`s with no ordering invariant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BinaryTree {
    /// The root node, `None` for an empty tree.
    pub root: Option<Box<BinaryTreeNode>>,
}

impl BinaryTree {
    /// Wraps the given root.
    pub fn new(root: Option<BinaryTreeNode>) -> Self {
        Self {
            root: root.map(Box::new),
        }
    }

    fn root(&self) -> Option<&BinaryTreeNode> {
        self.root.as_deref()
    }

    /// Number of nodes on the shortest path from the root down to a leaf. An empty tree has depth
    /// 0.
    ///
    /// This is breadth first so it stops at the first leaf it sees instead of visiting the whole
    /// tree.
    pub fn min_depth(&self) -> usize {
        let mut queue: VecDeque<(&BinaryTreeNode, usize)> =
            self.root().map(|root| (root, 1)).into_iter().collect();

        while let Some((node, depth)) = queue.pop_front() {
            if node.is_leaf() {
                return depth;
            }
            queue.extend(node.left().map(|left| (left, depth + 1)));
            queue.extend(node.right().map(|right| (right, depth + 1)));
        }

        0
    }

    /// Number of nodes on the longest path from the root down to a leaf. An empty tree has depth
    /// 0.
    pub fn max_depth(&self) -> usize {
        let mut stack: Vec<(&BinaryTreeNode, usize)> =
            self.root().map(|root| (root, 1)).into_iter().collect();
        let mut deepest = 0;

        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.left().map(|left| (left, depth + 1)));
            stack.extend(node.right().map(|right| (right, depth + 1)));
        }

        deepest
    }

    /// The largest sum of values along any path in the tree. A path can start and end at any
    /// node but can't use a node twice, so it goes up from one node and then down at most once.
    /// An empty tree sums to 0.
    ///
    /// Sums are accumulated as `i128`s so a path of large values can't overflow.
    pub fn max_sum(&self) -> i128 {
        /// Returns the best sum of a path that starts at `node` and goes down one side, recording
        /// the best path that bends through `node` in `best` along the way.
        fn gain(node: Option<&BinaryTreeNode>, best: &mut Option<i128>) -> i128 {
            let node = match node {
                Some(node) => node,
                None => return 0,
            };

            // A side that would lower the sum is left out.
            let left = gain(node.left(), best).max(0);
            let right = gain(node.right(), best).max(0);

            let val = i128::from(node.val);
            let through = val + left + right;
            *best = Some(best.map_or(through, |best| best.max(through)));

            val + left.max(right)
        }

        let mut best = None;
        gain(self.root(), &mut best);
        best.unwrap_or(0)
    }

    /// The smallest value in the tree strictly greater than `x`, if any.
    pub fn next_larger(&self, x: i64) -> Option<i64> {
        let mut queue: VecDeque<&BinaryTreeNode> = self.root().into_iter().collect();
        let mut answer: Option<i64> = None;

        while let Some(node) = queue.pop_front() {
            if node.val > x && answer.map_or(true, |answer| node.val < answer) {
                answer = Some(node.val);
            }
            queue.extend(node.left());
            queue.extend(node.right());
        }

        answer
    }

    /// Whether `a` and `b` are cousins: at the same depth but with different parents. Nodes are
    /// compared by identity so both must be nodes of this tree, otherwise this is `false`. The
    /// root has no parent and is nobody's cousin.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::binary_tree::BinaryTree;
    ///
    /// let tree: BinaryTree = "1,2,4,#,#,#,3,#,5,#,#".parse().unwrap();
    /// let root = tree.root.as_deref().unwrap();
    /// let four = root.left.as_ref().and_then(|two| two.left.as_deref()).unwrap();
    /// let five = root.right.as_ref().and_then(|three| three.right.as_deref()).unwrap();
    ///
    /// assert!(tree.are_cousins(four, five));
    /// assert!(!tree.are_cousins(root, five));
    /// ```
    pub fn are_cousins(&self, a: &BinaryTreeNode, b: &BinaryTreeNode) -> bool {
        match (self.locate(a), self.locate(b)) {
            (Some((Some(parent_a), depth_a)), Some((Some(parent_b), depth_b))) => {
                depth_a == depth_b && !ptr::eq(parent_a, parent_b)
            }
            _ => false,
        }
    }

    /// Breadth first search for `target` by identity, returning its parent and depth.
    fn locate(&self, target: &BinaryTreeNode) -> Option<(Option<&BinaryTreeNode>, usize)> {
        let mut queue: VecDeque<(&BinaryTreeNode, Option<&BinaryTreeNode>, usize)> =
            self.root().map(|root| (root, None, 0)).into_iter().collect();

        while let Some((node, parent, depth)) = queue.pop_front() {
            if ptr::eq(node, target) {
                return Some((parent, depth));
            }
            for child in node.left().into_iter().chain(node.right()) {
                queue.push_back((child, Some(node), depth + 1));
            }
        }

        None
    }

    /// The deepest node that has both `p` and `q` in its subtree (a node counts as being in its
    /// own subtree). Nodes are compared by identity. If only one of them is in the tree, that one
    /// is returned. If neither is, `None` is returned.
    pub fn lowest_common_ancestor(
        &self,
        p: &BinaryTreeNode,
        q: &BinaryTreeNode,
    ) -> Option<&BinaryTreeNode> {
        fn search<'a>(
            node: Option<&'a BinaryTreeNode>,
            p: &BinaryTreeNode,
            q: &BinaryTreeNode,
        ) -> Option<&'a BinaryTreeNode> {
            let node = node?;
            if ptr::eq(node, p) || ptr::eq(node, q) {
                return Some(node);
            }

            match (search(node.left(), p, q), search(node.right(), p, q)) {
                (Some(_), Some(_)) => Some(node),
                (left, right) => left.or(right),
            }
        }

        search(self.root(), p, q)
    }

    /// Serializes the tree in pre-order, writing `#` for every absent child and separating
    /// tokens with commas. An empty tree is `"#"`.
    pub fn serialize(&self) -> String {
        let mut out = Vec::new();
        let mut stack = vec![self.root()];

        while let Some(node) = stack.pop() {
            match node {
                None => out.push(ABSENT.to_string()),
                Some(node) => {
                    out.push(node.val.to_string());
                    stack.push(node.right());
                    stack.push(node.left());
                }
            }
        }

        out.join(",")
    }

    /// Reads a tree written by [`BinaryTree::serialize`]. An empty string is an empty tree and
    /// running out of tokens early leaves the remaining children absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::binary_tree::BinaryTree;
    /// use ordered_tree::error::ParseError;
    ///
    /// let tree = BinaryTree::deserialize("1,#,2,#,#").unwrap();
    /// assert_eq!(tree.max_depth(), 2);
    ///
    /// assert_eq!(
    ///     BinaryTree::deserialize("1,two,#"),
    ///     Err(ParseError::InvalidValue { token: "two".to_string(), position: 1 })
    /// );
    /// ```
    pub fn deserialize(data: &str) -> Result<Self, ParseError> {
        if data.is_empty() {
            return Ok(Self::default());
        }

        let tokens: Vec<&str> = data.split(',').map(str::trim).collect();
        let (root, next) = build(&tokens)?;
        if next < tokens.len() {
            debug!(position = next, "trailing input after serialized tree");
            return Err(ParseError::TrailingInput { position: next });
        }

        Ok(Self { root })
    }
}

/// Rebuilds the tree from its pre-order tokens, returning it along with the number of tokens used.
///
/// Nodes whose children are still being read wait on an explicit stack, so a tall tree can't
/// exhaust the call stack.
fn build(tokens: &[&str]) -> Result<(Option<Box<BinaryTreeNode>>, usize), ParseError> {
    // Each pending node is paired with whether its left child has been filled in yet.
    let mut pending: Vec<(Box<BinaryTreeNode>, bool)> = Vec::new();
    let mut next = 0;

    'tokens: loop {
        let mut finished = match read(tokens, &mut next)? {
            Some(val) => {
                pending.push((Box::new(BinaryTreeNode::new(val)), false));
                continue;
            }
            None => None,
        };

        // A subtree is complete. Hang it on the nearest pending node, and keep going up for as
        // long as that completes the parent too.
        while let Some((node, left_done)) = pending.last_mut() {
            if !*left_done {
                node.left = finished.take();
                *left_done = true;
                continue 'tokens;
            }
            node.right = finished.take();
            finished = pending.pop().map(|(node, _)| node);
        }

        return Ok((finished, next));
    }
}

/// Reads the token at `*next`. Returns `None` for an absent child, including when the tokens have
/// run out.
fn read(tokens: &[&str], next: &mut usize) -> Result<Option<i64>, ParseError> {
    let position = *next;
    let token = match tokens.get(position) {
        Some(token) => *token,
        None => return Ok(None),
    };
    *next += 1;

    if token == ABSENT {
        return Ok(None);
    }

    token.parse::<i64>().map(Some).map_err(|err| {
        debug!(position, %err, "invalid value in serialized tree");
        ParseError::InvalidValue {
            token: token.to_string(),
            position,
        }
    })
}

impl Drop for BinaryTree {
    /// A tree parsed from a long chain is as tall as it is big. Dropping that recursively through
    /// `Box` would overflow the stack, so nodes are torn down one at a time.
    fn drop(&mut self) {
        let mut stack: Vec<Box<BinaryTreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl fmt::Display for BinaryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for BinaryTree {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}
