//! An unbalanced BST that owns its nodes outright. Each node exclusively owns its children through
//! a `Box` so there are no parent pointers and no `unsafe`. Operations that need a node's parent
//! (like [`Tree::remove`]) find it again by walking down from the root.
//!
//! The tree never rebalances itself. [`Tree::is_balanced`] only reports on the current shape.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::ordered::{Removed, Tree};
//!
//! let mut tree = Tree::new();
//! tree.insert(5).insert(3).insert(8);
//!
//! assert_eq!(tree.find(&3).map(|n| *n.value()), Some(3));
//! assert!(tree.find(&4).is_none());
//!
//! // Inserting a value that's already present does nothing.
//! tree.insert(3);
//! assert_eq!(tree.in_order(), vec![&3, &5, &8]);
//!
//! // Removing a leaf detaches it from the tree.
//! let removed = tree.remove(&8).map(Removed::into_value);
//! assert_eq!(removed, Some(8));
//! assert_eq!(tree.in_order(), vec![&3, &5]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use tracing::{debug, trace};

type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree without duplicates. Values in a node's left subtree are smaller than the
/// node's value and values in its right subtree are larger.
// TODO `Clone` is still recursive so cloning a long chain can overflow the stack like `Drop` used
// to.
#[derive(Clone)]
pub struct Tree<T> {
    root: Link<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    /// Sorted insertions build a chain as tall as the tree is big. Dropping that recursively
    /// through `Box` would overflow the stack, so nodes are torn down one at a time.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    /// Formats the values in order, like a set. Walking with [`Iter`] keeps this from recursing
    /// down long chains.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// The root node, if there is one.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Counts the nodes in the tree. This walks the whole tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Inserts the value by walking down from the root until an empty slot is found. Inserting a
    /// value that is already in the tree leaves the tree unchanged.
    ///
    /// Returns the tree so inserts can be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::ordered::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(2).insert(1).insert(3).insert(1);
    ///
    /// assert_eq!(tree.pre_order(), vec![&2, &1, &3]);
    /// ```
    pub fn insert(&mut self, value: T) -> &mut Self
    where
        T: Ord,
    {
        Node::insert(&mut self.root, value);
        self
    }

    /// Same contract as [`Tree::insert`] but implemented recursively. Each level hands back the
    /// (possibly new) root of its subtree and the caller re-links it.
    pub fn insert_recursive(&mut self, value: T) -> &mut Self
    where
        T: Ord,
    {
        let root = self.root.take();
        self.root = Some(Node::insert_recursive(root, value));
        self
    }

    /// Finds the node holding `value` by iterative descent. If no node has an equal value, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::ordered::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1).map(|n| n.value()), Some(&1));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return Some(node),
                Ordering::Greater => node.right.as_deref(),
            };
        }

        None
    }

    /// Recursive version of [`Tree::find`]. Always agrees with it.
    pub fn find_recursive(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        self.root().and_then(|root| root.find(value))
    }

    /// Whether a node holds `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find(value).is_some()
    }

    /// Removes `value` from the tree. If the tree does not contain it, nothing happens and `None`
    /// is returned.
    ///
    /// A node with at most one child is unlinked and its child (if any) takes its place. A node
    /// with two children stays where it is: its value is overwritten with its in-order successor's
    /// value and the successor node is unlinked instead. In that case the returned
    /// [`Removed::Replaced`] still points at the node in the tree, now holding the successor's
    /// value. See [`Removed`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::ordered::{Removed, Tree};
    ///
    /// let mut tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// match tree.remove(&5) {
    ///     Some(Removed::Replaced { value, node }) => {
    ///         assert_eq!(value, 5);
    ///         // The same node now holds the successor.
    ///         assert_eq!(node.value(), &7);
    ///     }
    ///     other => panic!("expected the root to be replaced, got {:?}", other),
    /// }
    ///
    /// assert_eq!(tree.in_order(), vec![&1, &3, &4, &7, &8, &9]);
    /// assert!(tree.remove(&5).is_none());
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<Removed<'_, T>>
    where
        T: Ord,
    {
        // `link` is the parent's edge to the node being looked at (or the root slot), which is
        // all the parent bookkeeping removal needs.
        let mut link = &mut self.root;
        loop {
            let ordering = match link.as_deref() {
                Some(node) => value.cmp(&node.value),
                None => {
                    debug!("value to remove not found");
                    return None;
                }
            };
            link = match ordering {
                Ordering::Less => &mut link.as_mut().expect("Compared against a node").left,
                Ordering::Equal => break,
                Ordering::Greater => &mut link.as_mut().expect("Compared against a node").right,
            };
        }

        let has_two_children = link
            .as_deref()
            .map_or(false, |node| node.left.is_some() && node.right.is_some());
        if has_two_children {
            let node = link.as_mut().expect("Two children implies a node");
            let successor = Node::take_leftmost(&mut node.right)
                .expect("Two children implies a right subtree");
            let value = mem::replace(&mut node.value, successor.value);
            debug!("removed value from node with two children by copying in its successor");
            return Some(Removed::Replaced { value, node: &**node });
        }

        let mut detached = link.take().expect("Found value implies a node");
        let was_leaf = detached.is_leaf();
        *link = detached.left.take().or_else(|| detached.right.take());
        debug!(was_leaf, "detached node");
        Some(Removed::Detached(detached))
    }

    /// Whether, at every node, the heights of the left and right subtrees differ by at most one.
    /// An empty tree is balanced.
    ///
    /// This is a single pass that stops as soon as any subtree is out of balance.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::ordered::Tree;
    ///
    /// let chain: Tree<_> = (1..=5).collect();
    /// assert!(!chain.is_balanced());
    ///
    /// let full: Tree<_> = vec![3, 1, 5, 0, 2, 4, 6].into_iter().collect();
    /// assert!(full.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        balanced_height(self.root()).is_ok()
    }

    /// Returns the second largest value in the tree, or `None` if there are fewer than two nodes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::ordered::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// assert_eq!(tree.find_second_highest(), Some(&8));
    ///
    /// let single: Tree<_> = Some(1).into_iter().collect();
    /// assert_eq!(single.find_second_highest(), None);
    /// ```
    pub fn find_second_highest(&self) -> Option<&T> {
        let mut parent = None;
        let mut max = self.root()?;
        while let Some(right) = max.right() {
            parent = Some(max);
            max = right;
        }

        match max.left() {
            Some(left) => Some(&left.rightmost().value),
            None => parent.map(|parent| &parent.value),
        }
    }

    /// Values in pre-order: node, left subtree, right subtree.
    pub fn pre_order(&self) -> Vec<&T> {
        self.depth_first(DepthFirst::Pre)
    }

    /// Values in in-order: left subtree, node, right subtree. This is sorted.
    pub fn in_order(&self) -> Vec<&T> {
        self.depth_first(DepthFirst::In)
    }

    /// Values in post-order: left subtree, right subtree, node.
    pub fn post_order(&self) -> Vec<&T> {
        self.depth_first(DepthFirst::Post)
    }

    /// Values level by level from the root, left to right within a level.
    pub fn level_order(&self) -> Vec<&T> {
        // The queue is never popped from the front. A cursor walks it instead and, once it
        // catches up, the queue holds every node in visiting order.
        let mut queue: Vec<&Node<T>> = self.root().into_iter().collect();
        let mut next = 0;
        while let Some(node) = queue.get(next).copied() {
            next += 1;
            queue.extend(node.left());
            queue.extend(node.right());
        }

        queue.into_iter().map(|node| &node.value).collect()
    }

    /// Same output as [`Tree::in_order`] but uses an explicit stack instead of recursion.
    pub fn in_order_iterative(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Lazily iterates the values in sorted order using an explicit stack.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::ordered::Tree;
    ///
    /// let tree: Tree<_> = vec![2, 3, 1].into_iter().collect();
    /// let doubled: Vec<_> = tree.iter().map(|x| x * 2).collect();
    ///
    /// assert_eq!(doubled, vec![2, 4, 6]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            stack: Vec::new(),
            current: self.root(),
        }
    }

    fn depth_first(&self, order: DepthFirst) -> Vec<&T> {
        let mut out = Vec::new();
        depth_first(self.root(), order, &mut out);
        out
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// What [`Tree::remove`] took out of the tree.
#[derive(Debug)]
pub enum Removed<'a, T> {
    /// The node had at most one child and was unlinked. Its child, if any, was moved into its old
    /// place, so the returned node has no children.
    Detached(Box<Node<T>>),
    /// The node had two children. It is still in the tree and now holds the value of its former
    /// in-order successor, whose node was unlinked instead.
    ///
    /// **Note** `node` is not a detached node. Its children are live tree state.
    Replaced {
        /// The value that was removed.
        value: T,
        /// The node that used to hold `value`.
        node: &'a Node<T>,
    },
}

impl<'a, T> Removed<'a, T> {
    /// The node that held the removed value. For [`Removed::Replaced`] this is the node still in
    /// the tree, so its value is no longer the removed one.
    pub fn node(&self) -> &Node<T> {
        match self {
            Self::Detached(node) => &**node,
            Self::Replaced { node, .. } => *node,
        }
    }

    /// The value that was removed.
    pub fn value(&self) -> &T {
        match self {
            Self::Detached(node) => &node.value,
            Self::Replaced { value, .. } => value,
        }
    }

    /// Takes the removed value.
    pub fn into_value(self) -> T {
        match self {
            Self::Detached(node) => node.value,
            Self::Replaced { value, .. } => value,
        }
    }
}

/// A node of a [`Tree`]. Nodes can only be inspected from outside the tree.
#[derive(Clone)]
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    /// Shows the children by value only so formatting a node never walks its subtrees.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left().map(Node::value))
            .field("right", &self.right().map(Node::value))
            .finish()
    }
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of the left subtree.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn insert(mut link: &mut Link<T>, value: T)
    where
        T: Ord,
    {
        let mut depth = 0usize;
        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Equal => {
                    trace!(depth, "ignoring duplicate value");
                    return;
                }
                Ordering::Greater => &mut node.right,
            };
            depth += 1;
        }

        trace!(depth, "inserting new node");
        *link = Some(Box::new(Self::new(value)));
    }

    fn insert_recursive(link: Link<T>, value: T) -> Box<Self>
    where
        T: Ord,
    {
        match link {
            None => Box::new(Self::new(value)),
            Some(mut node) => {
                match value.cmp(&node.value) {
                    Ordering::Less => {
                        node.left = Some(Self::insert_recursive(node.left.take(), value));
                    }
                    Ordering::Equal => trace!("ignoring duplicate value"),
                    Ordering::Greater => {
                        node.right = Some(Self::insert_recursive(node.right.take(), value));
                    }
                }
                node
            }
        }
    }

    fn find(&self, value: &T) -> Option<&Self>
    where
        T: Ord,
    {
        match value.cmp(&self.value) {
            Ordering::Less => self.left()?.find(value),
            Ordering::Equal => Some(self),
            Ordering::Greater => self.right()?.find(value),
        }
    }

    fn rightmost(&self) -> &Self {
        let mut node = self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }

    /// Unlinks the leftmost node of the subtree in `link`, putting its right subtree in its place.
    /// The leftmost node never has a left child.
    fn take_leftmost(mut link: &mut Link<T>) -> Option<Box<Self>> {
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut().expect("Checked for a left child").left;
        }

        let mut leftmost = link.take()?;
        *link = leftmost.right.take();
        Some(leftmost)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum DepthFirst {
    Pre,
    In,
    Post,
}

fn depth_first<'a, T>(node: Option<&'a Node<T>>, order: DepthFirst, out: &mut Vec<&'a T>) {
    let node = match node {
        Some(node) => node,
        None => return,
    };

    if order == DepthFirst::Pre {
        out.push(&node.value);
    }
    depth_first(node.left(), order, out);
    if order == DepthFirst::In {
        out.push(&node.value);
    }
    depth_first(node.right(), order, out);
    if order == DepthFirst::Post {
        out.push(&node.value);
    }
}

/// Marker for a subtree whose children's heights differ by more than one somewhere.
struct Unbalanced;

/// Height of the subtree (an absent node has height 0) or `Unbalanced` as soon as any node in it
/// is out of balance.
fn balanced_height<T>(node: Option<&Node<T>>) -> Result<usize, Unbalanced> {
    let node = match node {
        Some(node) => node,
        None => return Ok(0),
    };

    let left = balanced_height(node.left())?;
    let right = balanced_height(node.right())?;
    if left.abs_diff(right) > 1 {
        trace!(left, right, "found unbalanced subtree");
        return Err(Unbalanced);
    }

    Ok(left.max(right) + 1)
}

/// In-order iterator over a [`Tree`]. See [`Tree::iter`].
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    current: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left();
        }

        let node = self.stack.pop()?;
        self.current = node.right();
        Some(&node.value)
    }
}
