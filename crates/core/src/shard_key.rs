//! Shard routing keys
//!
//! A `ShardKey` wraps any supported key domain and reduces it to a 64-bit
//! stable hash used to pick a shard or bucket.
//!
//! ## Hash by domain
//!
//! | Domain | Hash |
//! |--------|------|
//! | Gdid | `Gdid::distributed_stable_hash` |
//! | Atom | packed atom value |
//! | Ulong / Uint | the value itself |
//! | DateTime | milliseconds since Unix epoch (UTC) |
//! | Provider | the provider's own stable hash, 0 when absent |
//! | Guid | `for_bytes` of the RFC 4122 (network order) bytes |
//! | String | `for_string` (case-sensitive) |
//! | ByteArray | `for_bytes` |
//!
//! ## Equality
//!
//! Keys are equal when the domain and the value match, except that
//! object-backed domains (Provider, Guid, String, ByteArray) compare by
//! reference: two keys built from separately allocated equal strings are
//! NOT equal. Clones share the allocation and do compare equal. Use
//! [`ShardKey::same_value`] for a structural comparison.

use crate::atom::Atom;
use crate::error::{Error, Result};
use crate::gdid::Gdid;
use crate::hash::{stable_hash_bytes, DistributedStableHash};
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to a user-supplied stable hash provider
pub type StableHashProvider = Arc<dyn DistributedStableHash + Send + Sync>;

/// Discriminates the key domain held by a [`ShardKey`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShardKeyType {
    /// No key assigned
    Uninitialized,
    /// Global distributed id
    Gdid,
    /// Atom token
    Atom,
    /// Unsigned 64-bit integer
    Ulong,
    /// Unsigned 32-bit integer
    Uint,
    /// UTC timestamp
    DateTime,
    /// Opaque value hashing itself
    Provider,
    /// UUID
    Guid,
    /// UTF-8 string
    String,
    /// Raw bytes
    ByteArray,
}

impl fmt::Display for ShardKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Type-erased shard routing key
#[derive(Clone, Default)]
pub enum ShardKey {
    /// No key assigned; hashing it is an error
    #[default]
    Uninitialized,
    /// Global distributed id
    Gdid(Gdid),
    /// Atom token
    Atom(Atom),
    /// Unsigned 64-bit integer
    Ulong(u64),
    /// Unsigned 32-bit integer
    Uint(u32),
    /// Milliseconds since the Unix epoch, UTC
    DateTime(u64),
    /// Opaque value hashing itself; `None` hashes to 0
    Provider(Option<StableHashProvider>),
    /// UUID bytes in network order
    Guid(Arc<[u8; 16]>),
    /// String key; `None` hashes to 0
    String(Option<Arc<str>>),
    /// Byte key; `None` hashes to 0
    ByteArray(Option<Arc<[u8]>>),
}

impl ShardKey {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Key from a user-supplied stable hash provider
    pub fn provider(value: StableHashProvider) -> Self {
        ShardKey::Provider(Some(value))
    }

    /// Key from a timestamp carrying an explicit offset
    ///
    /// # Errors
    ///
    /// Returns `Error::Contract` unless the offset is zero (UTC).
    pub fn from_fixed_offset(value: DateTime<FixedOffset>) -> Result<Self> {
        if value.offset().local_minus_utc() != 0 {
            return Err(Error::contract(format!(
                "ShardKey DateTime must be UTC, got offset {}",
                value.offset()
            )));
        }
        Ok(ShardKey::from(value.with_timezone(&Utc)))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Domain of the held key
    pub fn data_type(&self) -> ShardKeyType {
        match self {
            ShardKey::Uninitialized => ShardKeyType::Uninitialized,
            ShardKey::Gdid(_) => ShardKeyType::Gdid,
            ShardKey::Atom(_) => ShardKeyType::Atom,
            ShardKey::Ulong(_) => ShardKeyType::Ulong,
            ShardKey::Uint(_) => ShardKeyType::Uint,
            ShardKey::DateTime(_) => ShardKeyType::DateTime,
            ShardKey::Provider(_) => ShardKeyType::Provider,
            ShardKey::Guid(_) => ShardKeyType::Guid,
            ShardKey::String(_) => ShardKeyType::String,
            ShardKey::ByteArray(_) => ShardKeyType::ByteArray,
        }
    }

    /// True for the default, unassigned key
    pub fn is_uninitialized(&self) -> bool {
        matches!(self, ShardKey::Uninitialized)
    }

    // =========================================================================
    // Hashing
    // =========================================================================

    /// Stable 64-bit hash used for shard selection
    ///
    /// # Errors
    ///
    /// Returns `Error::Contract` for an uninitialized key.
    pub fn distributed_stable_hash(&self) -> Result<u64> {
        Ok(match self {
            ShardKey::Uninitialized => {
                return Err(Error::contract("ShardKey is uninitialized"));
            }
            ShardKey::Gdid(gdid) => gdid.distributed_stable_hash(),
            ShardKey::Atom(atom) => atom.id(),
            ShardKey::Ulong(value) => *value,
            ShardKey::Uint(value) => u64::from(*value),
            ShardKey::DateTime(millis) => *millis,
            ShardKey::Provider(provider) => provider
                .as_ref()
                .map_or(0, |p| p.distributed_stable_hash()),
            ShardKey::Guid(bytes) => Self::for_bytes(&bytes[..]),
            ShardKey::String(s) => s.as_deref().map_or(0, Self::for_string),
            ShardKey::ByteArray(b) => b.as_deref().map_or(0, Self::for_bytes),
        })
    }

    /// Case-sensitive stable hash of a string
    ///
    /// The checksum covers the UTF-8 bytes; the length nibble uses the
    /// UTF-16 code-unit count. The empty string hashes to 0.
    pub fn for_string(s: &str) -> u64 {
        stable_hash_bytes(s.as_bytes(), s.encode_utf16().count())
    }

    /// Stable hash of a byte slice; the empty slice hashes to 0
    pub fn for_bytes(bytes: &[u8]) -> u64 {
        stable_hash_bytes(bytes, bytes.len())
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Compare by domain and value, ignoring allocation identity
    pub fn same_value(&self, other: &ShardKey) -> bool {
        match (self, other) {
            (ShardKey::Provider(a), ShardKey::Provider(b)) => match (a, b) {
                (Some(a), Some(b)) => a.distributed_stable_hash() == b.distributed_stable_hash(),
                (None, None) => true,
                _ => false,
            },
            (ShardKey::Guid(a), ShardKey::Guid(b)) => a == b,
            (ShardKey::String(a), ShardKey::String(b)) => a.as_deref() == b.as_deref(),
            (ShardKey::ByteArray(a), ShardKey::ByteArray(b)) => a.as_deref() == b.as_deref(),
            _ => self == other,
        }
    }

    /// Address of the shared allocation behind object-backed domains
    fn object_ptr(&self) -> Option<*const ()> {
        match self {
            ShardKey::Provider(p) => p.as_ref().map(|p| Arc::as_ptr(p) as *const ()),
            ShardKey::Guid(g) => Some(Arc::as_ptr(g) as *const ()),
            ShardKey::String(s) => s.as_ref().map(|s| Arc::as_ptr(s) as *const ()),
            ShardKey::ByteArray(b) => b.as_ref().map(|b| Arc::as_ptr(b) as *const ()),
            _ => None,
        }
    }
}

impl PartialEq for ShardKey {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ShardKey::Uninitialized, ShardKey::Uninitialized) => true,
            (ShardKey::Gdid(a), ShardKey::Gdid(b)) => a == b,
            (ShardKey::Atom(a), ShardKey::Atom(b)) => a == b,
            (ShardKey::Ulong(a), ShardKey::Ulong(b)) => a == b,
            (ShardKey::Uint(a), ShardKey::Uint(b)) => a == b,
            (ShardKey::DateTime(a), ShardKey::DateTime(b)) => a == b,
            _ => self.data_type() == other.data_type() && self.object_ptr() == other.object_ptr(),
        }
    }
}

impl Eq for ShardKey {}

impl Hash for ShardKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.data_type().hash(state);
        match self {
            ShardKey::Uninitialized => {}
            ShardKey::Gdid(gdid) => gdid.hash(state),
            ShardKey::Atom(atom) => atom.hash(state),
            ShardKey::Ulong(value) => value.hash(state),
            ShardKey::Uint(value) => value.hash(state),
            ShardKey::DateTime(millis) => millis.hash(state),
            _ => self.object_ptr().hash(state),
        }
    }
}

impl fmt::Debug for ShardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShardKey::{}", self)
    }
}

impl fmt::Display for ShardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = self.data_type();
        match self {
            ShardKey::Uninitialized => write!(f, "{}", kind),
            ShardKey::Gdid(gdid) => write!(f, "{}({})", kind, gdid),
            ShardKey::Atom(atom) => write!(f, "{}({})", kind, atom),
            ShardKey::Ulong(value) => write!(f, "{}({})", kind, value),
            ShardKey::Uint(value) => write!(f, "{}({})", kind, value),
            ShardKey::DateTime(millis) => write!(f, "{}({}ms)", kind, millis),
            ShardKey::Provider(p) => match p {
                Some(p) => write!(f, "{}(#{:016X})", kind, p.distributed_stable_hash()),
                None => write!(f, "{}(null)", kind),
            },
            ShardKey::Guid(bytes) => write!(f, "{}({})", kind, Uuid::from_bytes(**bytes)),
            ShardKey::String(s) => match s {
                Some(s) => write!(f, "{}({:?})", kind, s),
                None => write!(f, "{}(null)", kind),
            },
            ShardKey::ByteArray(b) => match b {
                Some(b) => write!(f, "{}({} bytes)", kind, b.len()),
                None => write!(f, "{}(null)", kind),
            },
        }
    }
}

impl From<Gdid> for ShardKey {
    fn from(value: Gdid) -> Self {
        ShardKey::Gdid(value)
    }
}

impl From<Atom> for ShardKey {
    fn from(value: Atom) -> Self {
        ShardKey::Atom(value)
    }
}

impl From<u64> for ShardKey {
    fn from(value: u64) -> Self {
        ShardKey::Ulong(value)
    }
}

impl From<u32> for ShardKey {
    fn from(value: u32) -> Self {
        ShardKey::Uint(value)
    }
}

impl From<DateTime<Utc>> for ShardKey {
    fn from(value: DateTime<Utc>) -> Self {
        // Pre-epoch instants wrap like an unsigned cast of the signed millis
        ShardKey::DateTime(value.timestamp_millis() as u64)
    }
}

impl From<Uuid> for ShardKey {
    fn from(value: Uuid) -> Self {
        ShardKey::Guid(Arc::new(*value.as_bytes()))
    }
}

impl From<&str> for ShardKey {
    fn from(value: &str) -> Self {
        ShardKey::String(Some(Arc::from(value)))
    }
}

impl From<String> for ShardKey {
    fn from(value: String) -> Self {
        ShardKey::String(Some(Arc::from(value)))
    }
}

impl From<Arc<str>> for ShardKey {
    fn from(value: Arc<str>) -> Self {
        ShardKey::String(Some(value))
    }
}

impl From<&[u8]> for ShardKey {
    fn from(value: &[u8]) -> Self {
        ShardKey::ByteArray(Some(Arc::from(value)))
    }
}

impl From<Vec<u8>> for ShardKey {
    fn from(value: Vec<u8>) -> Self {
        ShardKey::ByteArray(Some(Arc::from(value)))
    }
}

impl From<Arc<[u8]>> for ShardKey {
    fn from(value: Arc<[u8]>) -> Self {
        ShardKey::ByteArray(Some(value))
    }
}
