//! Routed GDID
//!
//! An `Rgdid` prefixes a [`Gdid`] with a 32-bit route so the owning shard can
//! be found without a lookup.
//!
//! ## Encodings
//!
//! - Bytes: big-endian `route(4) ++ gdid(12)`, 16 bytes
//! - Text: `route:era:authority:counter`
//! - Hex: 32 digits, route (8) followed by the GDID hex (24), optional `0x`

use crate::error::{Error, Result};
use crate::gdid::{
    gdid_from_hex_digits, hex_digits, parse_decimal, window, Gdid, GDID_BYTE_LEN, GDID_HEX_LEN,
};
use crate::hash::DistributedStableHash;
use byteorder::{BigEndian, ByteOrder};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Size of the binary encoding in bytes
pub const RGDID_BYTE_LEN: usize = 4 + GDID_BYTE_LEN;

/// Number of digits in the hex encoding
pub const RGDID_HEX_LEN: usize = 8 + GDID_HEX_LEN;

/// GDID carrying a routing hint
///
/// Ordered by route, then GDID. Zero-ness ignores the route: only the
/// embedded GDID decides whether a value is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgdid {
    route: u32,
    gdid: Gdid,
}

impl Rgdid {
    /// The "no value" sentinel
    pub const ZERO: Rgdid = Rgdid {
        route: 0,
        gdid: Gdid::ZERO,
    };

    /// Create from a route and a GDID
    #[inline]
    pub const fn new(route: u32, gdid: Gdid) -> Self {
        Rgdid { route, gdid }
    }

    /// Decode from the first 16 bytes of `buf`
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        Self::from_bytes_at(buf, 0)
    }

    /// Decode 16 bytes starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if fewer than 16 bytes remain.
    pub fn from_bytes_at(buf: &[u8], offset: usize) -> Result<Self> {
        let bytes = window(buf, offset, RGDID_BYTE_LEN)?;
        Ok(Rgdid {
            route: BigEndian::read_u32(&bytes[0..4]),
            gdid: Gdid::from_bytes(&bytes[4..])?,
        })
    }

    /// Routing hint
    #[inline]
    pub const fn route(&self) -> u32 {
        self.route
    }

    /// Embedded GDID
    #[inline]
    pub const fn gdid(&self) -> Gdid {
        self.gdid
    }

    /// True when the embedded GDID is zero, whatever the route
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.gdid.is_zero()
    }

    /// Big-endian 16-byte encoding
    pub fn to_bytes(&self) -> [u8; RGDID_BYTE_LEN] {
        let mut bytes = [0u8; RGDID_BYTE_LEN];
        BigEndian::write_u32(&mut bytes[0..4], self.route);
        bytes[4..].copy_from_slice(&self.gdid.to_bytes());
        bytes
    }

    /// Write the 16-byte encoding into `buf` at `offset`
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if fewer than 16 bytes remain.
    pub fn write_into(&self, buf: &mut [u8], offset: usize) -> Result<()> {
        let available = buf.len();
        match offset.checked_add(RGDID_BYTE_LEN) {
            Some(end) if end <= available => {
                buf[offset..end].copy_from_slice(&self.to_bytes());
                Ok(())
            }
            _ => Err(Error::BufferTooSmall {
                needed: RGDID_BYTE_LEN,
                offset,
                available,
            }),
        }
    }

    /// 32 upper-case hex digits: route then the GDID hex
    pub fn to_hex_string(&self) -> String {
        format!("{:08X}{}", self.route, self.gdid.to_hex_string())
    }

    /// Parse `route:era:authority:counter` or the 32-digit hex form
    ///
    /// Empty input yields `Some(Rgdid::ZERO)`.
    pub fn try_parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return Some(Rgdid::ZERO);
        }
        match s.split_once(':') {
            Some((route, rest)) => {
                let route: u32 = parse_decimal(route)?;
                // An empty remainder would otherwise parse as GDID zero
                if rest.is_empty() {
                    return None;
                }
                Some(Rgdid::new(route, Gdid::try_parse(rest)?))
            }
            None => {
                let digits = hex_digits(s, RGDID_HEX_LEN)?;
                let route = u32::from_str_radix(&digits[0..8], 16).ok()?;
                let gdid = gdid_from_hex_digits(&digits[8..])?;
                Some(Rgdid::new(route, gdid))
            }
        }
    }
}

impl DistributedStableHash for Rgdid {
    fn distributed_stable_hash(&self) -> u64 {
        (u64::from(self.route) << 32) ^ self.gdid.distributed_stable_hash()
    }
}

impl fmt::Display for Rgdid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.route, self.gdid)
    }
}

impl FromStr for Rgdid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rgdid::try_parse(s).ok_or_else(|| {
            let err = Error::format("RGDID", s);
            tracing::debug!(error = %err, "rejected RGDID text");
            err
        })
    }
}

impl Serialize for Rgdid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgdid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
