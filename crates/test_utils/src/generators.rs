//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use chrono::{Duration, NaiveDate};
use core_kernel::{BedId, Currency, GuestId, Money, ReservationId, StayPeriod};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating valid Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::PHP),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::SGD),
        Just(Currency::JPY),
    ]
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive PHP Money values
pub fn php_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|amount| Money::from_minor(amount, Currency::PHP))
}

/// Strategy for generating realistic nightly bed prices (50 to 5000 pesos)
pub fn bed_price_strategy() -> impl Strategy<Value = Money> {
    (5_000i64..500_000i64).prop_map(|minor| Money::from_minor(minor, Currency::PHP))
}

/// Strategy for generating sets of bed prices for a reservation
pub fn bed_prices_strategy() -> impl Strategy<Value = Vec<Money>> {
    proptest::collection::vec(bed_price_strategy(), 1..8)
}

/// Strategy for generating check-in dates within 2025
pub fn check_in_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..365i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Duration::days(days)
    })
}

/// Strategy for generating valid stays (check-out on or after check-in)
pub fn stay_strategy() -> impl Strategy<Value = StayPeriod> {
    (check_in_strategy(), 0i64..60i64).prop_map(|(check_in, nights)| {
        StayPeriod::new(check_in, check_in + Duration::days(nights))
            .expect("Generated invalid stay")
    })
}

/// Strategy for generating non-empty stays (at least one night)
pub fn occupied_stay_strategy() -> impl Strategy<Value = StayPeriod> {
    (check_in_strategy(), 1i64..60i64).prop_map(|(check_in, nights)| {
        StayPeriod::new(check_in, check_in + Duration::days(nights))
            .expect("Generated invalid stay")
    })
}

/// Strategy for generating ReservationId
pub fn reservation_id_strategy() -> impl Strategy<Value = ReservationId> {
    any::<[u8; 16]>().prop_map(|bytes| {
        ReservationId::from_uuid(uuid::Uuid::from_bytes(bytes))
    })
}

/// Strategy for generating GuestId
pub fn guest_id_strategy() -> impl Strategy<Value = GuestId> {
    any::<[u8; 16]>().prop_map(|bytes| GuestId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating BedId
pub fn bed_id_strategy() -> impl Strategy<Value = BedId> {
    any::<[u8; 16]>().prop_map(|bytes| BedId::from_uuid(uuid::Uuid::from_bytes(bytes)))
}

/// Strategy for generating official receipt numbers
pub fn or_number_strategy() -> impl Strategy<Value = String> {
    (2025u32..2027u32, 1u32..999_999u32).prop_map(|(year, seq)| format!("OR-{year}-{seq:06}"))
}

/// Strategy for generating gateway transaction ids
pub fn transaction_id_strategy() -> impl Strategy<Value = String> {
    "[A-Z0-9]{12}".prop_map(|s| format!("TXN-{s}"))
}

/// Strategy for generating guest display names
pub fn name_strategy() -> impl Strategy<Value = String> {
    ("[A-Z][a-z]{2,10}", "[A-Z][a-z]{2,10}").prop_map(|(first, last)| format!("{first} {last}"))
}
