//! Parsing of dotted-quad addresses and CIDR notation.

use std::net::Ipv4Addr;

use crate::error::Error;

/// Parse `"a.b.c.d/len"` into an address and a prefix length.
///
/// The address part must be a well-formed dotted quad (octets in `0..=255`). The
/// length may be any `u8`: lengths above 32 are rejected by
/// [`insert`](crate::PrefixTable::insert) and friends rather than by the parser, so
/// that a malformed string and an out-of-range length remain distinguishable.
///
/// ```
/// # use prefix_table::parse_cidr;
/// assert_eq!(parse_cidr("10.1.0.0/16"), Ok((0x0a01_0000, 16)));
/// assert!(parse_cidr("10.1.0.0").is_err());
/// assert!(parse_cidr("10.1.0/16").is_err());
/// assert!(parse_cidr("10.1.0.0/sixteen").is_err());
/// ```
pub fn parse_cidr(s: &str) -> Result<(u32, u8), Error> {
    let (addr, len) = s
        .split_once('/')
        .ok_or_else(|| Error::ParseError(s.to_string()))?;
    let addr = parse_addr(addr).map_err(|_| Error::ParseError(s.to_string()))?;
    let len = len.parse().map_err(|_| Error::ParseError(s.to_string()))?;
    Ok((addr, len))
}

/// Parse a plain dotted-quad address without a length component.
///
/// ```
/// # use prefix_table::parse_addr;
/// assert_eq!(parse_addr("192.0.2.1"), Ok(0xc000_0201));
/// assert!(parse_addr("192.0.2.1/24").is_err());
/// assert!(parse_addr("192.0.2.256").is_err());
/// ```
pub fn parse_addr(s: &str) -> Result<u32, Error> {
    s.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| Error::ParseError(s.to_string()))
}
