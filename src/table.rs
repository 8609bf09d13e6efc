//! Implementation of the prefix table.

use std::cmp::Ordering;
use std::net::Ipv4Addr;

#[cfg(feature = "ipnet")]
use ipnet::Ipv4Net;

use crate::error::Error;
use crate::insert::Inserted;
use crate::iter::Iter;
use crate::node::{prefix_mask, Node};
use crate::parse::{parse_addr, parse_cidr};
use crate::remove::Removed;

/// Longest-prefix-match table for IPv4 prefixes.
///
/// Prefixes are stored in an AVL tree keyed by their base address and augmented with
/// the maximum range bound per subtree, so a lookup only descends into branches that
/// can still contain the queried address. Prefixes of different lengths sharing the
/// same base are multiplexed into a single node.
///
/// The default route (`/0`) has no base bits and is kept outside the tree as a flag;
/// it matches any address for which no tree node matches.
///
/// ```
/// # use prefix_table::PrefixTable;
/// # fn main() -> Result<(), prefix_table::Error> {
/// let mut table = PrefixTable::new();
/// table.insert_cidr("10.0.0.0/8")?;
/// table.insert_cidr("10.1.2.0/24")?;
/// assert_eq!(table.lookup_str("10.1.2.5")?, Some(24));
/// assert_eq!(table.lookup_str("10.5.5.5")?, Some(8));
/// assert_eq!(table.lookup_str("192.0.2.1")?, None);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct PrefixTable {
    pub(crate) root: Option<Box<Node>>,
    pub(crate) default_route: bool,
    pub(crate) count: usize,
}

impl PrefixTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored prefixes, the default route included.
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), prefix_table::Error> {
    /// let mut table = PrefixTable::new();
    /// table.insert_cidr("0.0.0.0/0")?;
    /// table.insert_cidr("192.168.0.0/16")?;
    /// table.insert_cidr("192.168.0.0/24")?;
    /// assert_eq!(table.len(), 3);
    /// # Ok(())
    /// # }
    /// ```
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the table contains no prefixes.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Insert the prefix `addr/len`.
    ///
    /// The address is truncated to the length boundary before it is stored, so any
    /// address inside the range names the same prefix. Fails with
    /// [`Error::DuplicatePrefix`] when the exact prefix is already present, and with
    /// [`Error::InvalidLength`] when `len > 32`.
    ///
    /// ```
    /// # use prefix_table::{Error, PrefixTable};
    /// let mut table = PrefixTable::new();
    /// assert_eq!(table.insert(0xc0a8_0a0b, 16), Ok(())); // 192.168.10.11/16
    /// assert_eq!(table.lookup(0xc0a8_ffff), Some(16));
    /// assert!(matches!(
    ///     table.insert(0xc0a8_0000, 16),
    ///     Err(Error::DuplicatePrefix { .. })
    /// ));
    /// assert_eq!(table.insert(0, 33), Err(Error::InvalidLength(33)));
    /// ```
    pub fn insert(&mut self, addr: u32, len: u8) -> Result<(), Error> {
        if len == 0 {
            if self.default_route {
                return Err(Error::DuplicatePrefix {
                    addr: Ipv4Addr::from(0u32),
                    len: 0,
                });
            }
            self.default_route = true;
            self.count += 1;
            return Ok(());
        }
        if len > 32 {
            return Err(Error::InvalidLength(len));
        }
        let base = addr & prefix_mask(len);
        let (root, outcome) = crate::insert::insert(self.root.take(), base, len);
        self.root = Some(root);
        match outcome {
            Inserted::Duplicate => Err(Error::DuplicatePrefix {
                addr: Ipv4Addr::from(base),
                len,
            }),
            Inserted::NewNode | Inserted::Merged => {
                self.count += 1;
                Ok(())
            }
        }
    }

    /// Remove the prefix `addr/len`.
    ///
    /// The address is truncated exactly as in [`insert`](Self::insert). Fails with
    /// [`Error::NotFound`] when the prefix is not present, and with
    /// [`Error::InvalidLength`] when `len > 32`.
    ///
    /// ```
    /// # use prefix_table::{Error, PrefixTable};
    /// # fn main() -> Result<(), prefix_table::Error> {
    /// let mut table = PrefixTable::new();
    /// table.insert_cidr("192.168.0.0/16")?;
    /// assert_eq!(table.remove(0xc0a8_1234, 16), Ok(()));
    /// assert!(matches!(
    ///     table.remove(0xc0a8_1234, 16),
    ///     Err(Error::NotFound { .. })
    /// ));
    /// # Ok(())
    /// # }
    /// ```
    pub fn remove(&mut self, addr: u32, len: u8) -> Result<(), Error> {
        if len == 0 {
            if !self.default_route {
                return Err(Error::NotFound {
                    addr: Ipv4Addr::from(0u32),
                    len: 0,
                });
            }
            self.default_route = false;
            self.count -= 1;
            return Ok(());
        }
        if len > 32 {
            return Err(Error::InvalidLength(len));
        }
        let base = addr & prefix_mask(len);
        let (root, outcome) = crate::remove::remove(self.root.take(), base, len);
        self.root = root;
        match outcome {
            Removed::NotFound => Err(Error::NotFound {
                addr: Ipv4Addr::from(base),
                len,
            }),
            Removed::Removed => {
                self.count -= 1;
                Ok(())
            }
        }
    }

    /// Return the length of the most specific stored prefix containing `addr`, or
    /// `None` when nothing matches. The default route answers `Some(0)` whenever no
    /// tree node matches.
    ///
    /// A node storing several lengths at one base competes with its shortest length;
    /// see the crate documentation for the exact ranking.
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), prefix_table::Error> {
    /// let mut table = PrefixTable::new();
    /// table.insert_cidr("10.0.0.0/8")?;
    /// assert_eq!(table.lookup(0x0a01_0203), Some(8)); // 10.1.2.3
    /// assert_eq!(table.lookup(0x0b00_0000), None); // 11.0.0.0
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup(&self, addr: u32) -> Option<u8> {
        let mut best = None;
        if let Some(root) = self.root.as_deref() {
            root.search(addr, &mut best);
        }
        match best {
            Some(node) => Some(node.shortest_len()),
            None if self.default_route => Some(0),
            None => None,
        }
    }

    /// Check whether the exact prefix `addr/len` is stored, without any prefix
    /// matching. The address is truncated to the length boundary first.
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), prefix_table::Error> {
    /// let mut table = PrefixTable::new();
    /// table.insert_cidr("192.168.1.0/24")?;
    /// assert!(table.contains(0xc0a8_01ff, 24));
    /// assert!(!table.contains(0xc0a8_01ff, 23));
    /// assert!(!table.contains(0xc0a8_01ff, 32));
    /// # Ok(())
    /// # }
    /// ```
    pub fn contains(&self, addr: u32, len: u8) -> bool {
        if len == 0 {
            return self.default_route;
        }
        if len > 32 {
            return false;
        }
        let base = addr & prefix_mask(len);
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            match base.cmp(&n.base) {
                Ordering::Equal => return n.lens.contains(len),
                Ordering::Less => node = n.left.as_deref(),
                Ordering::Greater => node = n.right.as_deref(),
            }
        }
        false
    }

    /// Insert a prefix given in CIDR notation.
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// let mut table = PrefixTable::new();
    /// assert!(table.insert_cidr("10.0.0.0/8").is_ok());
    /// assert!(table.insert_cidr("10.0.0.0").is_err());
    /// ```
    pub fn insert_cidr(&mut self, cidr: &str) -> Result<(), Error> {
        let (addr, len) = parse_cidr(cidr)?;
        self.insert(addr, len)
    }

    /// Remove a prefix given in CIDR notation.
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), prefix_table::Error> {
    /// let mut table = PrefixTable::new();
    /// table.insert_cidr("10.0.0.0/8")?;
    /// assert!(table.remove_cidr("10.0.0.0/8").is_ok());
    /// assert!(table.remove_cidr("10.0.0.0/8").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn remove_cidr(&mut self, cidr: &str) -> Result<(), Error> {
        let (addr, len) = parse_cidr(cidr)?;
        self.remove(addr, len)
    }

    /// Look up an address given in dotted-quad notation. The outer `Result` reports
    /// parse failures, the inner `Option` the match.
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), prefix_table::Error> {
    /// let mut table = PrefixTable::new();
    /// table.insert_cidr("192.168.0.0/23")?;
    /// assert_eq!(table.lookup_str("192.168.0.5")?, Some(23));
    /// assert_eq!(table.lookup_str("192.168.2.5")?, None);
    /// assert!(table.lookup_str("192.168.2").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup_str(&self, addr: &str) -> Result<Option<u8>, Error> {
        Ok(self.lookup(parse_addr(addr)?))
    }

    /// Iterate over all stored prefixes as `(base, prefix_len)` pairs, ordered by
    /// base address, the default route first.
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), prefix_table::Error> {
    /// let mut table = PrefixTable::new();
    /// table.insert_cidr("10.0.0.0/8")?;
    /// table.insert_cidr("10.0.0.0/16")?;
    /// table.insert_cidr("0.0.0.0/0")?;
    /// let got: Vec<_> = table.iter().collect();
    /// assert_eq!(got, vec![(0, 0), (0x0a00_0000, 8), (0x0a00_0000, 16)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }
}

#[cfg(feature = "ipnet")]
impl PrefixTable {
    /// Insert a prefix given as an [`Ipv4Net`].
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table = PrefixTable::new();
    /// table.insert_net("10.0.0.0/8".parse()?)?;
    /// assert_eq!(table.lookup_str("10.1.2.3")?, Some(8));
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert_net(&mut self, net: Ipv4Net) -> Result<(), Error> {
        self.insert(net.addr().into(), net.prefix_len())
    }

    /// Remove a prefix given as an [`Ipv4Net`].
    pub fn remove_net(&mut self, net: Ipv4Net) -> Result<(), Error> {
        self.remove(net.addr().into(), net.prefix_len())
    }

    /// Look up the most specific match for an [`Ipv4Addr`].
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table = PrefixTable::new();
    /// table.insert_net("192.0.2.0/24".parse()?)?;
    /// assert_eq!(table.lookup_addr("192.0.2.7".parse()?), Some(24));
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup_addr(&self, addr: Ipv4Addr) -> Option<u8> {
        self.lookup(addr.into())
    }

    /// Return the most specific matching prefix as an [`Ipv4Net`]. The default route
    /// answers `0.0.0.0/0` whenever no tree node matches.
    ///
    /// ```
    /// # use prefix_table::PrefixTable;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table = PrefixTable::new();
    /// table.insert_net("192.0.2.0/24".parse()?)?;
    /// assert_eq!(table.lookup_net("192.0.2.7".parse()?), Some("192.0.2.0/24".parse()?));
    /// assert_eq!(table.lookup_net("198.51.100.1".parse()?), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn lookup_net(&self, addr: Ipv4Addr) -> Option<Ipv4Net> {
        let mut best = None;
        if let Some(root) = self.root.as_deref() {
            root.search(addr.into(), &mut best);
        }
        match best {
            Some(node) => Ipv4Net::new(node.base.into(), node.shortest_len()).ok(),
            None if self.default_route => Ipv4Net::new(Ipv4Addr::UNSPECIFIED, 0).ok(),
            None => None,
        }
    }

    /// Iterate over all stored prefixes as [`Ipv4Net`]s, ordered by base address.
    pub fn nets(&self) -> impl Iterator<Item = Ipv4Net> + '_ {
        self.iter()
            .map(|(base, len)| Ipv4Net::new(base.into(), len).expect("lengths are at most 32"))
    }
}

impl PartialEq for PrefixTable {
    fn eq(&self, other: &Self) -> bool {
        self.count == other.count && self.iter().eq(other.iter())
    }
}

impl Eq for PrefixTable {}

impl Extend<(u32, u8)> for PrefixTable {
    fn extend<I: IntoIterator<Item = (u32, u8)>>(&mut self, iter: I) {
        for (addr, len) in iter {
            let _ = self.insert(addr, len);
        }
    }
}

impl FromIterator<(u32, u8)> for PrefixTable {
    fn from_iter<I: IntoIterator<Item = (u32, u8)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}
