//! Identity and shard-routing value types
//!
//! This crate defines the identifiers used to name, order and route entities
//! across a partitioned store:
//! - Gdid: 96-bit global distributed id (era, authority, counter)
//! - Rgdid: Gdid prefixed with a 32-bit route
//! - EntityId: `[type[.schema]@]system::address` cross-system address
//! - ShardKey: tagged routing key reducible to a 64-bit stable hash
//! - Atom: up to 8 ASCII characters packed into a u64
//! - DistributedStableHash: process- and platform-independent hashing
//! - Error: Error type hierarchy
//! - Limits: Validation limits
//!
//! All types are immutable values, safe to share between threads.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod atom;
pub mod entity_id;
pub mod error;
pub mod gdid;
pub mod hash;
pub mod limits;
pub mod rgdid;
pub mod shard_key;

pub use atom::{Atom, MAX_ATOM_LEN};
pub use entity_id::EntityId;
pub use error::{Error, Result};
pub use gdid::{
    Gdid, GdidRangeComparer, AUTHORITY_MASK, AUTHORITY_MAX, COUNTER_MASK, COUNTER_MAX,
    GDID_BYTE_LEN, GDID_HEX_LEN,
};
pub use hash::{adler32, DistributedStableHash};
pub use limits::Limits;
pub use rgdid::{Rgdid, RGDID_BYTE_LEN, RGDID_HEX_LEN};
pub use shard_key::{ShardKey, ShardKeyType, StableHashProvider};
