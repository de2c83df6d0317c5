//! Unit tests for strongly-typed identifiers

use std::collections::HashSet;
use std::str::FromStr;

use core_kernel::{
    BedId, ExemptionId, GuestId, OfficeId, PaymentId, ReservationId, RoomId, UserId,
};
use uuid::Uuid;

#[test]
fn test_new_ids_are_unique() {
    let mut seen = HashSet::new();
    for _ in 0..100 {
        assert!(seen.insert(ReservationId::new()));
    }
}

#[test]
fn test_display_includes_prefix() {
    assert!(ReservationId::new().to_string().starts_with("RSV-"));
    assert!(GuestId::new().to_string().starts_with("GST-"));
    assert!(PaymentId::new().to_string().starts_with("PAY-"));
    assert!(ExemptionId::new().to_string().starts_with("EXM-"));
    assert!(RoomId::new().to_string().starts_with("ROOM-"));
    assert!(BedId::new().to_string().starts_with("BED-"));
    assert!(OfficeId::new().to_string().starts_with("OFC-"));
    assert!(UserId::new().to_string().starts_with("USR-"));
}

#[test]
fn test_parse_with_prefix() {
    let id = BedId::new();
    let parsed = BedId::from_str(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn test_parse_bare_uuid() {
    let uuid = Uuid::new_v4();
    let parsed = GuestId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(parsed.as_uuid(), &uuid);
}

#[test]
fn test_parse_garbage_fails() {
    assert!(ReservationId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_uuid_round_trip() {
    let uuid = Uuid::new_v4();
    let id = PaymentId::from(uuid);
    let back: Uuid = id.into();
    assert_eq!(uuid, back);
}

#[test]
fn test_v7_ids_carry_nondecreasing_timestamps() {
    let first = ReservationId::new_v7();
    let second = ReservationId::new_v7();
    // The first 48 bits of a v7 UUID are the millisecond timestamp
    let ts = |id: &ReservationId| id.as_uuid().as_bytes()[..6].to_vec();
    assert!(ts(&first) <= ts(&second));
}

#[test]
fn test_serde_is_transparent() {
    let id = OfficeId::new();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));
}
