//! Stable hashing for shard routing
//!
//! Hashes produced here are persisted implicitly through shard placement, so
//! they must be identical across processes, platforms and releases. Nothing in
//! this module touches `std::hash::Hash` or any randomly seeded hasher.
//!
//! The byte/string hash is:
//!
//! ```text
//! ((len & 0x0F) << 60) ^ (1566083941 * adler32(bytes))
//! ```
//!
//! and the empty input hashes to 0.

use std::sync::Arc;

/// Multiplier spreading the 32-bit checksum over the 64-bit hash space
pub const STABLE_HASH_MULTIPLIER: u64 = 1_566_083_941;

/// Largest prime below 2^16
const ADLER_MOD: u32 = 65_521;

/// Largest n such that 255n(n+1)/2 + (n+1)(ADLER_MOD-1) fits in a u32
const ADLER_NMAX: usize = 5_552;

/// A value that can reduce itself to a 64-bit hash which never changes
/// between processes, machines or builds.
///
/// Implement this for any type used as an opaque shard key.
pub trait DistributedStableHash {
    /// Return the stable 64-bit hash of this value
    fn distributed_stable_hash(&self) -> u64;
}

impl<T: DistributedStableHash + ?Sized> DistributedStableHash for &T {
    fn distributed_stable_hash(&self) -> u64 {
        (**self).distributed_stable_hash()
    }
}

impl<T: DistributedStableHash + ?Sized> DistributedStableHash for Box<T> {
    fn distributed_stable_hash(&self) -> u64 {
        (**self).distributed_stable_hash()
    }
}

impl<T: DistributedStableHash + ?Sized> DistributedStableHash for Arc<T> {
    fn distributed_stable_hash(&self) -> u64 {
        (**self).distributed_stable_hash()
    }
}

/// Standard Adler-32 checksum (RFC 1950)
pub fn adler32(bytes: &[u8]) -> u32 {
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for chunk in bytes.chunks(ADLER_NMAX) {
        for &byte in chunk {
            a += u32::from(byte);
            b += a;
        }
        a %= ADLER_MOD;
        b %= ADLER_MOD;
    }
    (b << 16) | a
}

/// Hash `bytes`, mixing `len` into the top nibble
///
/// `len` is passed separately because strings report their length in UTF-16
/// code units while the checksum runs over their UTF-8 bytes.
pub fn stable_hash_bytes(bytes: &[u8], len: usize) -> u64 {
    if bytes.is_empty() {
        return 0;
    }
    let nibble = ((len & 0x0F) as u64) << 60;
    nibble ^ STABLE_HASH_MULTIPLIER.wrapping_mul(u64::from(adler32(bytes)))
}
