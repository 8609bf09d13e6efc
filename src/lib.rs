//! This crate provides a longest-prefix-match table for IPv4 prefixes in CIDR form
//! (`address/length` with lengths 0 to 32). Given a 32-bit address, [`PrefixTable`]
//! answers with the most specific stored prefix containing it — the lookup behind
//! routing tables, firewall rule matching, and ACL checks.
//!
//! # Description of the tree
//!
//! Prefixes are stored in an AVL tree keyed by the prefix base address (the address
//! truncated to the prefix-length boundary). Each node additionally behaves as an
//! interval: it knows the upper bound `top` of its own address range and the
//! maximum upper bound `max` anywhere in its subtree. A lookup walks the tree like
//! an interval stabbing query and skips every branch whose `max` lies below the
//! queried address, so only branches that can still contain the address are
//! visited.
//!
//! Prefixes of different lengths that share the same base are multiplexed into one
//! node as a 32-bit length set, and the node's interval is the range of its
//! *shortest* (least specific) stored length. The default route (`/0`) has no base
//! bits at all and lives outside the tree as a flag that matches any address for
//! which no tree node matches.
//!
//! # Complexity
//!
//! The tree is height-balanced, so with `n` stored bases:
//!
//! | Operation                      | Complexity |
//! |--------------------------------|------------|
//! | `insert`, `remove`             | `O(log n)` |
//! | `lookup`                       | `O(log n)` expected, pruned by `max` |
//! | `contains`                     | `O(log n)` |
//! | `iter`                         | `O(n)`     |
//! | `len`, `is_empty`              | `O(1)`     |
//!
//! # Match ranking
//!
//! Candidate nodes compete in a lookup with their shortest stored length, and the
//! winning node reports that shortest length. As a consequence, a long prefix that
//! shares its base with a shorter one (say `10.0.0.0/24` next to `10.0.0.0/8`) is
//! shadowed by the shorter length, while the same long prefix at a base of its own
//! wins as usual. Callers that need the narrow prefix to win should keep it at a
//! distinct base.
//!
//! # Example
//!
//! ```
//! # use prefix_table::PrefixTable;
//! # fn main() -> Result<(), prefix_table::Error> {
//! let mut table = PrefixTable::new();
//! table.insert_cidr("0.0.0.0/0")?;
//! table.insert_cidr("10.0.0.0/8")?;
//! table.insert_cidr("10.1.2.0/24")?;
//! assert_eq!(table.lookup_str("10.1.2.5")?, Some(24));
//! assert_eq!(table.lookup_str("10.9.9.9")?, Some(8));
//! assert_eq!(table.lookup_str("192.0.2.1")?, Some(0));
//! table.remove_cidr("0.0.0.0/0")?;
//! assert_eq!(table.lookup_str("192.0.2.1")?, None);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

mod error;
mod fmt;
mod insert;
mod iter;
mod lookup;
mod node;
mod parse;
mod remove;
mod table;

#[cfg(feature = "serde")]
mod serde;

#[cfg(test)]
mod fuzzing;

pub use error::Error;
pub use iter::Iter;
pub use parse::{parse_addr, parse_cidr};
pub use table::PrefixTable;
