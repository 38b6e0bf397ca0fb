//! Atom: a short string token packed into a `u64`
//!
//! Atoms name systems, entity types and schemas. An atom holds up to 8 ASCII
//! characters from `[A-Za-z0-9_-]`, packed little-endian so the first
//! character lives in the lowest byte. The all-zero atom is the empty atom.
//!
//! ```
//! use gdid_core::Atom;
//!
//! let dealer = Atom::encode("dealer").unwrap();
//! assert_eq!(dealer.to_string(), "dealer");
//! assert!(Atom::try_encode("too-long-name").is_none());
//! ```

use crate::error::{Error, Result};
use crate::hash::DistributedStableHash;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum number of characters in an atom
pub const MAX_ATOM_LEN: usize = 8;

/// Up to 8 ASCII characters encoded as a `u64`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Atom(u64);

impl Atom {
    /// The empty atom
    pub const ZERO: Atom = Atom(0);

    /// Wrap a raw packed value without validation
    #[inline]
    pub const fn from_id(id: u64) -> Self {
        Atom(id)
    }

    /// Raw packed value
    #[inline]
    pub const fn id(&self) -> u64 {
        self.0
    }

    /// True for the empty atom
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Encode `value`, returning `None` when it is too long or has a disallowed character
    ///
    /// The empty string encodes to [`Atom::ZERO`].
    pub fn try_encode(value: &str) -> Option<Self> {
        let bytes = value.as_bytes();
        if bytes.len() > MAX_ATOM_LEN {
            return None;
        }
        let mut id = 0u64;
        for (i, &b) in bytes.iter().enumerate() {
            if !is_atom_byte(b) {
                return None;
            }
            id |= u64::from(b) << (i * 8);
        }
        Some(Atom(id))
    }

    /// Encode `value`, failing with a descriptive error
    pub fn encode(value: &str) -> Result<Self> {
        if value.len() > MAX_ATOM_LEN {
            return Err(Error::OutOfRange {
                what: "atom length",
                value: value.len() as u64,
                max: MAX_ATOM_LEN as u64,
            });
        }
        Self::try_encode(value).ok_or_else(|| Error::format("Atom", value))
    }

    /// Check that the packed bytes form a valid atom
    ///
    /// Valid means a run of allowed characters followed only by zero bytes.
    pub fn is_valid(&self) -> bool {
        let mut seen_end = false;
        for b in self.0.to_le_bytes() {
            if b == 0 {
                seen_end = true;
            } else if seen_end || !is_atom_byte(b) {
                return false;
            }
        }
        true
    }

    /// Decode the packed characters
    pub fn value(&self) -> String {
        self.0
            .to_le_bytes()
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect()
    }
}

#[inline]
fn is_atom_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

impl DistributedStableHash for Atom {
    fn distributed_stable_hash(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

impl FromStr for Atom {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Atom::encode(s)
    }
}

impl Serialize for Atom {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.value())
    }
}

impl<'de> Deserialize<'de> for Atom {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Atom::encode(&s).map_err(de::Error::custom)
    }
}
