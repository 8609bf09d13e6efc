//! Formatting implementation for the PrefixTable

use std::fmt::{Debug, Formatter, Result};
use std::net::Ipv4Addr;

use crate::PrefixTable;

impl Debug for PrefixTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_set()
            .entries(self.iter().map(|(base, len)| DebugPrefix(base, len)))
            .finish()
    }
}

struct DebugPrefix(u32, u8);

impl Debug for DebugPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}/{}", Ipv4Addr::from(self.0), self.1)
    }
}
