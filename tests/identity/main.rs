//! Identity value type integration tests
//!
//! Exercises the public contract the document and storage layers rely on:
//! text round trips, byte layouts, ordering, and stable hashes.

mod entity_id_invariants;
mod gdid_invariants;
mod rgdid_invariants;
mod serde_round_trip;
mod shard_key_invariants;
