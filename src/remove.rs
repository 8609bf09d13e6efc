//! Removal from the interval tree.

use std::cmp::Ordering;

use crate::node::Node;

/// Outcome of removing one prefix from a subtree, threaded back up the recursion.
pub(crate) enum Removed {
    /// The prefix was found and removed; aggregates on the path need updating.
    Removed,
    /// The prefix was not present; the tree is untouched.
    NotFound,
}

/// Remove the prefix `(base, len)` below `root` and return the new subtree root.
/// `base` must already be truncated to its own `len` boundary, and `len` must be in
/// `1..=32`.
pub(crate) fn remove(root: Option<Box<Node>>, base: u32, len: u8) -> (Option<Box<Node>>, Removed) {
    let mut node = match root {
        None => return (None, Removed::NotFound),
        Some(node) => node,
    };
    match base.cmp(&node.base) {
        Ordering::Less => {
            let (child, outcome) = remove(node.left.take(), base, len);
            node.left = child;
            if let Removed::NotFound = outcome {
                return (Some(node), Removed::NotFound);
            }
        }
        Ordering::Greater => {
            let (child, outcome) = remove(node.right.take(), base, len);
            node.right = child;
            if let Removed::NotFound = outcome {
                return (Some(node), Removed::NotFound);
            }
        }
        Ordering::Equal => {
            if !node.lens.remove(len) {
                return (Some(node), Removed::NotFound);
            }
            if node.lens.is_empty() {
                node = match unlink(node) {
                    Some(node) => node,
                    None => return (None, Removed::Removed),
                };
            } else {
                // other lengths remain at this base, only the range may shrink
                node.update_top();
                node.update_max();
                return (Some(node), Removed::Removed);
            }
        }
    }
    (Some(rebalance(node)), Removed::Removed)
}

/// Detach a node whose length set became empty and return the subtree that takes its
/// place. The one-child case splices the child into the parent slot; the two-children
/// case moves the in-order successor (which has at most one child) into the slot,
/// adopting both subtrees.
fn unlink(mut node: Box<Node>) -> Option<Box<Node>> {
    match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            let (right, mut successor) = detach_min(right);
            successor.left = Some(left);
            successor.right = right;
            successor.update_max();
            Some(successor)
        }
    }
}

/// Remove the leftmost node of the subtree, rebalancing the path to it, and return
/// the remaining subtree together with the detached node.
fn detach_min(mut node: Box<Node>) -> (Option<Box<Node>>, Box<Node>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = detach_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

/// Restore the AVL invariant after a removal below `node`. The four cases pick the
/// rotation by the taller child's own balance sign.
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    node.update_height();
    let balance = node.balance();
    if balance > 1 {
        let left_balance = node
            .left
            .as_deref()
            .expect("left-heavy node has a left child")
            .balance();
        if left_balance >= 0 {
            // left-left
            node.rotate_right()
        } else {
            // left-right
            let left = node.left.take().expect("left child checked above");
            node.left = Some(left.rotate_left());
            node.rotate_right()
        }
    } else if balance < -1 {
        let right_balance = node
            .right
            .as_deref()
            .expect("right-heavy node has a right child")
            .balance();
        if right_balance <= 0 {
            // right-right
            node.rotate_left()
        } else {
            // right-left
            let right = node.right.take().expect("right child checked above");
            node.right = Some(right.rotate_right());
            node.rotate_left()
        }
    } else {
        node.update_max();
        node
    }
}
