//! Serde encodes every id as its canonical string form

use gdid::{Atom, EntityId, Gdid, Rgdid};
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Row {
    id: Gdid,
    routed: Rgdid,
    owner: EntityId,
    system: Atom,
}

#[test]
fn test_row_serializes_ids_as_strings() {
    let row = Row {
        id: Gdid::from_parts(3, 5, 12345).unwrap(),
        routed: Rgdid::new(7, Gdid::from_parts(3, 5, 12345).unwrap()),
        owner: "car.vin@dealer::X1".parse().unwrap(),
        system: Atom::encode("dealer").unwrap(),
    };
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "3:5:12345",
            "routed": "7:3:5:12345",
            "owner": "car.vin@dealer::X1",
            "system": "dealer",
        })
    );
    let back: Row = serde_json::from_value(json).unwrap();
    assert_eq!(back, row);
}

#[test]
fn test_hex_text_deserializes() {
    let id: Gdid = serde_json::from_str("\"0x000000030000000000003039\"").unwrap();
    assert_eq!(id, Gdid::new(3, 12345));
}

#[test]
fn test_bad_text_fails_to_deserialize() {
    assert!(serde_json::from_str::<Gdid>("\"1:99:1\"").is_err());
    assert!(serde_json::from_str::<EntityId>("\"no-separator\"").is_err());
    assert!(serde_json::from_str::<Atom>("\"way-too-long\"").is_err());
}
