use ordered_tree::binary_tree::{BinaryTree, BinaryTreeNode};

use quickcheck::{Arbitrary, Gen};

/// A randomly shaped binary tree.
#[derive(Clone, Debug)]
struct Shape(BinaryTree);

impl Arbitrary for Shape {
    fn arbitrary(g: &mut Gen) -> Self {
        fn node(g: &mut Gen, depth: usize) -> Option<BinaryTreeNode> {
            if depth == 0 || bool::arbitrary(g) && depth < 6 {
                return None;
            }
            Some(BinaryTreeNode::with_children(
                i64::from(i16::arbitrary(g)),
                node(g, depth - 1),
                node(g, depth - 1),
            ))
        }

        Shape(BinaryTree::new(node(g, 6)))
    }
}

quickcheck::quickcheck! {
    fn serialize_round_trips(shape: Shape) -> bool {
        let Shape(tree) = shape;

        BinaryTree::deserialize(&tree.serialize()) == Ok(tree)
    }

    fn min_depth_at_most_max_depth(shape: Shape) -> bool {
        let Shape(tree) = shape;

        tree.min_depth() <= tree.max_depth()
    }

    fn next_larger_is_strictly_larger(shape: Shape, x: i64) -> bool {
        let Shape(tree) = shape;

        tree.next_larger(x).map_or(true, |larger| larger > x)
    }
}
