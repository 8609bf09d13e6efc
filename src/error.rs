//! Error types reported by table operations and parsing.

use std::net::Ipv4Addr;

use thiserror::Error;

/// Errors reported by [`PrefixTable`](crate::PrefixTable) operations and by the CIDR
/// parser. A failed operation never modifies the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The prefix length lies outside `0..=32`.
    #[error("invalid prefix length /{0}, expected 0..=32")]
    InvalidLength(u8),

    /// The exact prefix is already present in the table.
    #[error("prefix {addr}/{len} is already in the table")]
    DuplicatePrefix {
        /// Base address of the prefix, truncated to its length boundary.
        addr: Ipv4Addr,
        /// Prefix length.
        len: u8,
    },

    /// The prefix to remove is not present in the table.
    #[error("prefix {addr}/{len} is not in the table")]
    NotFound {
        /// Base address of the prefix, truncated to its length boundary.
        addr: Ipv4Addr,
        /// Prefix length.
        len: u8,
    },

    /// The input is not a valid dotted-quad address or CIDR string.
    #[error("malformed address or prefix {0:?}")]
    ParseError(String),
}
