//! Longest-prefix search over the interval tree.

use crate::node::Node;

impl Node {
    /// Search the subtree for the most specific node whose range contains `addr`,
    /// accumulating the winner in `best`.
    ///
    /// A node is a candidate when `base <= addr <= top`. Candidates compete with
    /// their *shortest* stored length: the node whose shortest length is largest
    /// wins, and the match reported for it is that shortest length. A child is only
    /// visited when its subtree can still contain the address, that is when its
    /// `max` is at least `addr`.
    pub(crate) fn search<'a>(&'a self, addr: u32, best: &mut Option<&'a Node>) {
        if self.base <= addr && addr <= self.top {
            match best {
                Some(found) if found.shortest_len() >= self.shortest_len() => {}
                _ => *best = Some(self),
            }
        }
        if let Some(left) = self.left.as_deref() {
            if left.max >= addr {
                left.search(addr, best);
            }
        }
        if let Some(right) = self.right.as_deref() {
            if right.max >= addr {
                right.search(addr, best);
            }
        }
    }
}
