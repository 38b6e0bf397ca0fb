//! Global Distributed ID
//!
//! A `Gdid` is a 96-bit identifier made of a 32-bit era and a 64-bit id. The
//! id is further split into a 4-bit authority (top bits) and a 60-bit counter.
//!
//! ```text
//! ┌────────────┬───────────┬──────────────────────┐
//! │ Era        │ Authority │ Counter              │
//! │ 32 bits    │ 4 bits    │ 60 bits              │
//! └────────────┴───────────┴──────────────────────┘
//! ```
//!
//! ## Encodings
//!
//! These formats are part of the storage contract and MUST NOT change:
//! - Bytes: big-endian `era(4) ++ id(8)`, 12 bytes. Byte order matches the
//!   numeric order so index trees stay balanced.
//! - Text: `era:authority:counter` in decimal.
//! - Hex: 24 digits, era (8) followed by id (16), optional `0x` prefix.
//!
//! ```
//! use gdid_core::Gdid;
//!
//! let id = Gdid::from_parts(3, 5, 12345).unwrap();
//! assert_eq!(id.to_string(), "3:5:12345");
//! assert_eq!("3:5:12345".parse::<Gdid>().unwrap(), id);
//! ```

use crate::error::{Error, Result};
use crate::hash::DistributedStableHash;
use byteorder::{BigEndian, ByteOrder};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Mask selecting the authority bits of the id
pub const AUTHORITY_MASK: u64 = 0xF000_0000_0000_0000;

/// Mask selecting the counter bits of the id
pub const COUNTER_MASK: u64 = 0x0FFF_FFFF_FFFF_FFFF;

/// Largest authority value
pub const AUTHORITY_MAX: u8 = 0x0F;

/// Largest counter value
pub const COUNTER_MAX: u64 = COUNTER_MASK;

/// Size of the binary encoding in bytes
pub const GDID_BYTE_LEN: usize = 12;

/// Number of digits in the hex encoding
pub const GDID_HEX_LEN: usize = 2 * GDID_BYTE_LEN;

const AUTHORITY_SHIFT: u32 = 60;

/// Global distributed identifier
///
/// ## Invariants
///
/// - Ordering is by era, then id, both unsigned ascending
/// - `Gdid::ZERO` means "no value" and is never issued by a generator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gdid {
    // Field order drives the derived Ord: era first, then id
    era: u32,
    id: u64,
}

impl Gdid {
    /// The "no value" sentinel
    pub const ZERO: Gdid = Gdid { era: 0, id: 0 };

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create from a raw era and id; every pair is representable
    #[inline]
    pub const fn new(era: u32, id: u64) -> Self {
        Gdid { era, id }
    }

    /// Create from era, authority and counter
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` if `authority > 15` or
    /// `counter > COUNTER_MAX`.
    pub fn from_parts(era: u32, authority: u8, counter: u64) -> Result<Self> {
        if authority > AUTHORITY_MAX {
            return Err(Error::OutOfRange {
                what: "authority",
                value: u64::from(authority),
                max: u64::from(AUTHORITY_MAX),
            });
        }
        if counter > COUNTER_MAX {
            return Err(Error::OutOfRange {
                what: "counter",
                value: counter,
                max: COUNTER_MAX,
            });
        }
        Ok(Gdid {
            era,
            id: (u64::from(authority) << AUTHORITY_SHIFT) | (counter & COUNTER_MASK),
        })
    }

    /// Decode from the first 12 bytes of `buf`
    pub fn from_bytes(buf: &[u8]) -> Result<Self> {
        Self::from_bytes_at(buf, 0)
    }

    /// Decode 12 bytes starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if fewer than 12 bytes remain.
    pub fn from_bytes_at(buf: &[u8], offset: usize) -> Result<Self> {
        let bytes = window(buf, offset, GDID_BYTE_LEN)?;
        Ok(Gdid {
            era: BigEndian::read_u32(&bytes[0..4]),
            id: BigEndian::read_u64(&bytes[4..12]),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Era segment
    #[inline]
    pub const fn era(&self) -> u32 {
        self.era
    }

    /// Full 64-bit id (authority and counter)
    #[inline]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Issuing authority, 0..=15
    #[inline]
    pub const fn authority(&self) -> u8 {
        ((self.id & AUTHORITY_MASK) >> AUTHORITY_SHIFT) as u8
    }

    /// Counter within the era and authority
    #[inline]
    pub const fn counter(&self) -> u64 {
        self.id & COUNTER_MASK
    }

    /// True only for `Gdid::ZERO`
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.era == 0 && self.id == 0
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Big-endian 12-byte encoding
    pub fn to_bytes(&self) -> [u8; GDID_BYTE_LEN] {
        let mut bytes = [0u8; GDID_BYTE_LEN];
        self.encode_into(&mut bytes);
        bytes
    }

    /// Write the 12-byte encoding into `buf` at `offset`
    ///
    /// # Errors
    ///
    /// Returns `Error::BufferTooSmall` if fewer than 12 bytes remain.
    pub fn write_into(&self, buf: &mut [u8], offset: usize) -> Result<()> {
        let available = buf.len();
        match offset.checked_add(GDID_BYTE_LEN) {
            Some(end) if end <= available => {
                self.encode_into(&mut buf[offset..end]);
                Ok(())
            }
            _ => Err(Error::BufferTooSmall {
                needed: GDID_BYTE_LEN,
                offset,
                available,
            }),
        }
    }

    fn encode_into(&self, dst: &mut [u8]) {
        BigEndian::write_u32(&mut dst[0..4], self.era);
        BigEndian::write_u64(&mut dst[4..12], self.id);
    }

    /// 24 upper-case hex digits: era then id
    pub fn to_hex_string(&self) -> String {
        format!("{:08X}{:016X}", self.era, self.id)
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    /// Parse either `era:authority:counter` or the 24-digit hex form
    ///
    /// Empty input yields `Some(Gdid::ZERO)`. Returns `None` on any malformed
    /// input; never a partially filled value.
    pub fn try_parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return Some(Gdid::ZERO);
        }
        if s.contains(':') {
            parse_decimal_triple(s)
        } else {
            parse_hex(s)
        }
    }

    // =========================================================================
    // Range ordering
    // =========================================================================

    /// Compare by era then counter, ignoring authority
    ///
    /// Use only for ordering; two different ids can compare `Equal` here.
    pub fn cmp_by_range(&self, other: &Gdid) -> Ordering {
        self.era
            .cmp(&other.era)
            .then_with(|| self.counter().cmp(&other.counter()))
    }
}

/// Bounds-checked slice of `len` bytes at `offset`
pub(crate) fn window(buf: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| buf.get(offset..end))
        .ok_or(Error::BufferTooSmall {
            needed: len,
            offset,
            available: buf.len(),
        })
}

/// Parse an unsigned decimal made only of ASCII digits
pub(crate) fn parse_decimal<T: FromStr>(segment: &str) -> Option<T> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Strip an optional `0x`/`0X` prefix and require exactly `len` hex digits
pub(crate) fn hex_digits(s: &str, len: usize) -> Option<&str> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.len() != len || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    Some(digits)
}

/// Decode 24 validated hex digits
pub(crate) fn gdid_from_hex_digits(digits: &str) -> Option<Gdid> {
    let era = u32::from_str_radix(&digits[0..8], 16).ok()?;
    let id = u64::from_str_radix(&digits[8..GDID_HEX_LEN], 16).ok()?;
    Some(Gdid::new(era, id))
}

fn parse_decimal_triple(s: &str) -> Option<Gdid> {
    let mut segments = s.split(':');
    let era: u32 = parse_decimal(segments.next()?)?;
    let authority: u32 = parse_decimal(segments.next()?)?;
    let counter: u64 = parse_decimal(segments.next()?)?;
    if segments.next().is_some() {
        return None;
    }
    let authority = u8::try_from(authority).ok()?;
    Gdid::from_parts(era, authority, counter).ok()
}

fn parse_hex(s: &str) -> Option<Gdid> {
    hex_digits(s, GDID_HEX_LEN).and_then(gdid_from_hex_digits)
}

impl DistributedStableHash for Gdid {
    fn distributed_stable_hash(&self) -> u64 {
        (u64::from(self.era) << 32) ^ self.id
    }
}

impl fmt::Display for Gdid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.era, self.authority(), self.counter())
    }
}

impl FromStr for Gdid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Gdid::try_parse(s).ok_or_else(|| {
            let err = Error::format("GDID", s);
            tracing::debug!(error = %err, "rejected GDID text");
            err
        })
    }
}

impl Serialize for Gdid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Gdid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Orders ids by era then counter, ignoring authority
///
/// Ranges issued by different authorities are interchangeable under this
/// comparer. Equality here is NOT identity; never use it for `==` tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GdidRangeComparer;

impl GdidRangeComparer {
    /// Compare two ids by range
    pub fn compare(&self, a: &Gdid, b: &Gdid) -> Ordering {
        a.cmp_by_range(b)
    }
}
