//! Gdid invariant tests

use gdid::{Gdid, GdidRangeComparer, AUTHORITY_MAX, COUNTER_MAX};
use proptest::prelude::*;
use std::cmp::Ordering;

fn any_gdid() -> impl Strategy<Value = Gdid> {
    (any::<u32>(), 0..=AUTHORITY_MAX, 0..=COUNTER_MAX)
        .prop_map(|(era, authority, counter)| Gdid::from_parts(era, authority, counter).unwrap())
}

proptest! {
    #[test]
    fn text_round_trip(id in any_gdid()) {
        prop_assert_eq!(id.to_string().parse::<Gdid>().unwrap(), id);
    }

    #[test]
    fn hex_round_trip(id in any_gdid()) {
        prop_assert_eq!(id.to_hex_string().parse::<Gdid>().unwrap(), id);
    }

    #[test]
    fn bytes_round_trip(id in any_gdid()) {
        prop_assert_eq!(Gdid::from_bytes(&id.to_bytes()).unwrap(), id);
    }

    #[test]
    fn ordering_matches_era_then_id(a in any_gdid(), b in any_gdid()) {
        let expected = (a.era(), a.id()).cmp(&(b.era(), b.id()));
        prop_assert_eq!(a.cmp(&b), expected);
        // Byte order agrees with value order
        prop_assert_eq!(a.to_bytes().cmp(&b.to_bytes()), expected);
    }

    #[test]
    fn range_order_agrees_within_one_authority(
        authority in 0..=AUTHORITY_MAX,
        a in (any::<u32>(), 0..=COUNTER_MAX),
        b in (any::<u32>(), 0..=COUNTER_MAX),
    ) {
        let a = Gdid::from_parts(a.0, authority, a.1).unwrap();
        let b = Gdid::from_parts(b.0, authority, b.1).unwrap();
        prop_assert_eq!(GdidRangeComparer.compare(&a, &b), a.cmp(&b));
    }

    #[test]
    fn only_all_zero_parts_give_zero(era in any::<u32>(), authority in 0..=AUTHORITY_MAX, counter in 0..=COUNTER_MAX) {
        let id = Gdid::from_parts(era, authority, counter).unwrap();
        prop_assert_eq!(id.is_zero(), era == 0 && authority == 0 && counter == 0);
    }
}

#[test]
fn test_documented_scenarios() {
    let id = Gdid::from_parts(3, 5, 12345).unwrap();
    assert_eq!(id.to_string(), "3:5:12345");
    assert_eq!("3:5:12345".parse::<Gdid>().unwrap(), id);
    assert_eq!(Gdid::ZERO.to_string(), "0:0:0");
}

#[test]
fn test_extremes_round_trip() {
    let max = Gdid::from_parts(u32::MAX, AUTHORITY_MAX, COUNTER_MAX).unwrap();
    assert_eq!(max, Gdid::new(u32::MAX, u64::MAX));
    assert_eq!(max.to_string(), format!("{}:15:{}", u32::MAX, COUNTER_MAX));
    assert_eq!(max.to_string().parse::<Gdid>().unwrap(), max);
    assert_eq!(max.to_hex_string(), "FFFFFFFFFFFFFFFFFFFFFFFF");
}

#[test]
fn test_range_comparer_sorts_mixed_authorities() {
    let mut ids = vec![
        Gdid::from_parts(1, 9, 30).unwrap(),
        Gdid::from_parts(1, 0, 20).unwrap(),
        Gdid::from_parts(0, 15, 40).unwrap(),
        Gdid::from_parts(1, 4, 10).unwrap(),
    ];
    ids.sort_by(|a, b| GdidRangeComparer.compare(a, b));
    let counters: Vec<_> = ids.iter().map(|id| (id.era(), id.counter())).collect();
    assert_eq!(counters, vec![(0, 40), (1, 10), (1, 20), (1, 30)]);
    assert_eq!(
        GdidRangeComparer.compare(&ids[0], &ids[0]),
        Ordering::Equal
    );
}

#[test]
fn test_gdid_works_as_map_key() {
    use std::collections::{BTreeSet, HashSet};

    let a = Gdid::from_parts(1, 1, 1).unwrap();
    let b = Gdid::from_parts(1, 1, 2).unwrap();
    let hashed: HashSet<_> = [a, b, a].into_iter().collect();
    assert_eq!(hashed.len(), 2);
    let ordered: BTreeSet<_> = [b, a].into_iter().collect();
    assert_eq!(ordered.into_iter().collect::<Vec<_>>(), vec![a, b]);
}
