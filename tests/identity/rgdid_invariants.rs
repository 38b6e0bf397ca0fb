//! Rgdid invariant tests

use gdid::{DistributedStableHash, Gdid, Rgdid, AUTHORITY_MAX, COUNTER_MAX};
use proptest::prelude::*;

fn any_rgdid() -> impl Strategy<Value = Rgdid> {
    (any::<u32>(), any::<u32>(), 0..=AUTHORITY_MAX, 0..=COUNTER_MAX).prop_map(
        |(route, era, authority, counter)| {
            Rgdid::new(route, Gdid::from_parts(era, authority, counter).unwrap())
        },
    )
}

proptest! {
    #[test]
    fn text_round_trip(id in any_rgdid()) {
        prop_assert_eq!(id.to_string().parse::<Rgdid>().unwrap(), id);
    }

    #[test]
    fn hex_round_trip(id in any_rgdid()) {
        prop_assert_eq!(Rgdid::try_parse(&id.to_hex_string()), Some(id));
    }

    #[test]
    fn bytes_round_trip(id in any_rgdid()) {
        let bytes = id.to_bytes();
        prop_assert_eq!(&bytes[4..], &id.gdid().to_bytes()[..]);
        prop_assert_eq!(Rgdid::from_bytes(&bytes).unwrap(), id);
    }
}

#[test]
fn test_documented_scenario() {
    let id = Rgdid::new(7, Gdid::from_parts(3, 5, 12345).unwrap());
    assert_eq!(id.to_string(), "7:3:5:12345");
}

#[test]
fn test_zero_sentinel() {
    assert!(Rgdid::ZERO.is_zero());
    assert_eq!("".parse::<Rgdid>().unwrap(), Rgdid::ZERO);
    assert!(Rgdid::new(99, Gdid::ZERO).is_zero());
}

#[test]
fn test_route_separates_otherwise_equal_ids() {
    let gdid = Gdid::from_parts(1, 2, 3).unwrap();
    let a = Rgdid::new(1, gdid);
    let b = Rgdid::new(2, gdid);
    assert_ne!(a, b);
    assert!(a < b);
    assert_ne!(a.distributed_stable_hash(), b.distributed_stable_hash());
}
