//! Insertion into the interval tree.

use std::cmp::Ordering;

use crate::node::Node;

/// Outcome of inserting one prefix into a subtree, threaded back up the recursion.
pub(crate) enum Inserted {
    /// A new node was created; the path back up must rebalance.
    NewNode,
    /// An existing node with the same base absorbed the length; the shape is
    /// unchanged but ranges on the path may have widened.
    Merged,
    /// The exact prefix was already present; the tree is untouched.
    Duplicate,
}

/// Insert the prefix `(base, len)` below `root` and return the new subtree root.
/// `base` must already be truncated to its own `len` boundary, and `len` must be in
/// `1..=32`.
pub(crate) fn insert(root: Option<Box<Node>>, base: u32, len: u8) -> (Box<Node>, Inserted) {
    let mut node = match root {
        None => return (Box::new(Node::new(base, len)), Inserted::NewNode),
        Some(node) => node,
    };
    let outcome = match base.cmp(&node.base) {
        Ordering::Equal => {
            if !node.lens.insert(len) {
                return (node, Inserted::Duplicate);
            }
            node.update_top();
            node.update_max();
            return (node, Inserted::Merged);
        }
        Ordering::Less => {
            let (child, outcome) = insert(node.left.take(), base, len);
            node.left = Some(child);
            outcome
        }
        Ordering::Greater => {
            let (child, outcome) = insert(node.right.take(), base, len);
            node.right = Some(child);
            outcome
        }
    };
    match outcome {
        Inserted::NewNode => {
            node.update_height();
            node = rebalance(node, base);
            node.update_max();
            (node, Inserted::NewNode)
        }
        Inserted::Merged => {
            node.update_max();
            (node, Inserted::Merged)
        }
        Inserted::Duplicate => (node, Inserted::Duplicate),
    }
}

/// Apply the four AVL insertion cases. `inserted` is the base of the freshly created
/// node; comparing it against the taller child's base picks between the single and
/// the double rotation.
fn rebalance(mut node: Box<Node>, inserted: u32) -> Box<Node> {
    let balance = node.balance();
    if balance > 1 {
        let left_base = node
            .left
            .as_deref()
            .expect("left-heavy node has a left child")
            .base;
        if inserted < left_base {
            // left-left
            node.rotate_right()
        } else {
            // left-right
            let left = node.left.take().expect("left child checked above");
            node.left = Some(left.rotate_left());
            node.rotate_right()
        }
    } else if balance < -1 {
        let right_base = node
            .right
            .as_deref()
            .expect("right-heavy node has a right child")
            .base;
        if inserted > right_base {
            // right-right
            node.rotate_left()
        } else {
            // right-left
            let right = node.right.take().expect("right child checked above");
            node.right = Some(right.rotate_right());
            node.rotate_left()
        }
    } else {
        node
    }
}
