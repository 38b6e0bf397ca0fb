//! ShardKey invariant tests

use gdid::{Atom, Gdid, ShardKey, ShardKeyType};
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    #[test]
    fn string_hash_is_deterministic(s in ".{0,64}") {
        prop_assert_eq!(ShardKey::for_string(&s), ShardKey::for_string(&s));
        let key = ShardKey::from(s.clone());
        prop_assert_eq!(key.distributed_stable_hash().unwrap(), ShardKey::for_string(&s));
    }

    #[test]
    fn bytes_hash_is_deterministic(b in proptest::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_eq!(ShardKey::for_bytes(&b), ShardKey::for_bytes(&b));
        prop_assert_eq!(ShardKey::for_bytes(&b) == 0, b.is_empty());
    }
}

#[test]
fn test_pinned_constants_detect_algorithm_drift() {
    assert_eq!(ShardKey::for_string(""), 0);
    assert_eq!(ShardKey::for_bytes(&[]), 0);
    assert_eq!(ShardKey::for_string("abc"), 3_519_216_918_460_997_987);
    assert_eq!(
        ShardKey::for_string("1A8987339HBz0909W874"),
        5_902_629_410_803_103_370
    );
}

#[test]
fn test_every_domain_reports_its_type() {
    let cases: Vec<(ShardKey, ShardKeyType)> = vec![
        (ShardKey::default(), ShardKeyType::Uninitialized),
        (ShardKey::from(Gdid::new(1, 2)), ShardKeyType::Gdid),
        (ShardKey::from(Atom::encode("a").unwrap()), ShardKeyType::Atom),
        (ShardKey::from(1u64), ShardKeyType::Ulong),
        (ShardKey::from(1u32), ShardKeyType::Uint),
        (ShardKey::from(chrono::Utc::now()), ShardKeyType::DateTime),
        (ShardKey::Provider(None), ShardKeyType::Provider),
        (ShardKey::from(Uuid::new_v4()), ShardKeyType::Guid),
        (ShardKey::from("s"), ShardKeyType::String),
        (ShardKey::from(vec![1u8]), ShardKeyType::ByteArray),
    ];
    for (key, expected) in cases {
        assert_eq!(key.data_type(), expected);
        assert_eq!(
            key.distributed_stable_hash().is_ok(),
            expected != ShardKeyType::Uninitialized
        );
    }
}

#[test]
fn test_routing_is_spread_across_buckets() {
    let mut buckets = [0usize; 8];
    for i in 0..800 {
        let key = ShardKey::from(format!("customer-{}", i));
        let hash = key.distributed_stable_hash().unwrap();
        buckets[(hash % 8) as usize] += 1;
    }
    assert!(buckets.iter().all(|&n| n > 0), "buckets: {:?}", buckets);
}

#[test]
fn test_keys_are_shareable_across_threads() {
    let key = ShardKey::from("tenant-42");
    let expected = key.distributed_stable_hash().unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let key = key.clone();
            std::thread::spawn(move || key.distributed_stable_hash().unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
