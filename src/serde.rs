//! Serialization and Deserialization implementation

use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, PrefixTable};

impl Serialize for PrefixTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let prefixes: Vec<(u32, u8)> = self.iter().collect();
        prefixes.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrefixTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let prefixes: Vec<(u32, u8)> = Vec::deserialize(deserializer)?;
        let mut table = PrefixTable::new();
        for (addr, len) in prefixes {
            match table.insert(addr, len) {
                Ok(()) | Err(Error::DuplicatePrefix { .. }) => {}
                Err(e) => return Err(::serde::de::Error::custom(e)),
            }
        }
        Ok(table)
    }
}
