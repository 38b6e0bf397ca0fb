//! EntityId invariant tests

use gdid::{Atom, DistributedStableHash, EntityId, Error, ShardKey};
use proptest::prelude::*;

fn atom_token() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,8}"
}

fn address() -> impl Strategy<Value = String> {
    // Any printable ASCII with at least one visible character
    "[!-~][ -~]{0,40}"
}

proptest! {
    #[test]
    fn system_only_round_trip(system in atom_token(), addr in address()) {
        let id = EntityId::new(Atom::encode(&system).unwrap(), Atom::ZERO, Atom::ZERO, addr).unwrap();
        prop_assert_eq!(id.as_string().parse::<EntityId>().unwrap(), id);
    }

    #[test]
    fn type_and_system_round_trip(
        system in atom_token(),
        entity_type in atom_token(),
        addr in address(),
    ) {
        let id = EntityId::new(
            Atom::encode(&system).unwrap(),
            Atom::encode(&entity_type).unwrap(),
            Atom::ZERO,
            addr,
        )
        .unwrap();
        prop_assert_eq!(id.as_string().parse::<EntityId>().unwrap(), id);
    }

    #[test]
    fn full_form_round_trip(
        system in atom_token(),
        entity_type in atom_token(),
        schema in atom_token(),
        addr in address(),
    ) {
        let id = EntityId::new(
            Atom::encode(&system).unwrap(),
            Atom::encode(&entity_type).unwrap(),
            Atom::encode(&schema).unwrap(),
            addr,
        )
        .unwrap();
        prop_assert_eq!(id.as_string().parse::<EntityId>().unwrap(), id);
    }

    #[test]
    fn try_parse_never_panics(s in ".{0,64}") {
        let _ = EntityId::try_parse(&s);
    }
}

#[test]
fn test_documented_scenarios() {
    let s = "car.vin@dealer::1A8987339HBz0909W874";
    let id: EntityId = s.parse().unwrap();
    assert_eq!(id.system().to_string(), "dealer");
    assert_eq!(id.entity_type().to_string(), "car");
    assert_eq!(id.schema().to_string(), "vin");
    assert_eq!(id.address(), "1A8987339HBz0909W874");
    assert_eq!(id.as_string(), s);

    let id: EntityId = "dealer::I9973OD".parse().unwrap();
    assert!(id.entity_type().is_zero());
    assert!(id.schema().is_zero());
    assert_eq!(id.as_string(), "dealer::I9973OD");
}

#[test]
fn test_stable_hash_uses_case_sensitive_address() {
    let upper: EntityId = "dealer::ABC".parse().unwrap();
    let lower: EntityId = "dealer::abc".parse().unwrap();
    assert_ne!(upper.distributed_stable_hash(), lower.distributed_stable_hash());
    assert_eq!(
        upper.distributed_stable_hash() ^ lower.distributed_stable_hash(),
        ShardKey::for_string("ABC") ^ ShardKey::for_string("abc")
    );
}

#[test]
fn test_parse_error_excerpt_is_truncated() {
    let input = format!("no separator {}", "x".repeat(500));
    match input.parse::<EntityId>() {
        Err(Error::Format { type_name, excerpt }) => {
            assert_eq!(type_name, "EntityId");
            assert!(excerpt.len() < 64);
        }
        other => panic!("expected format error, got {:?}", other),
    }
}
