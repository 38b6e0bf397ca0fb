//! GDID - distributed identifiers and shard-routing keys
//!
//! Four value types name, order and route entities across a sharded store:
//! [`Gdid`], [`Rgdid`], [`EntityId`] and [`ShardKey`]. Each has a canonical
//! text form, a stable 64-bit hash, and (for the ids) a fixed big-endian
//! byte encoding.
//!
//! # Quick Start
//!
//! ```
//! use gdid::{DistributedStableHash, EntityId, Gdid, Rgdid, ShardKey};
//!
//! let id = Gdid::from_parts(3, 5, 12345)?;
//! assert_eq!(id.to_string(), "3:5:12345");
//!
//! let routed = Rgdid::new(7, id);
//! assert_eq!(routed.to_string(), "7:3:5:12345");
//!
//! let entity: EntityId = "car.vin@dealer::1A8987339HBz0909W874".parse()?;
//! let shard = entity.distributed_stable_hash() % 16;
//! assert!(shard < 16);
//!
//! assert_eq!(ShardKey::from(id).distributed_stable_hash()?, id.distributed_stable_hash());
//! # Ok::<(), gdid::Error>(())
//! ```

// Re-export the public API from gdid-core
pub use gdid_core::*;
