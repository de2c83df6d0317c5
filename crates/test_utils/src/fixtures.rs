//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the hostel
//! system. These fixtures are designed to be consistent and predictable for
//! unit tests.

use chrono::NaiveDate;
use core_kernel::{
    BedId, Currency, GuestId, Money, OfficeId, ReservationId, RoomId, StayPeriod, UserId,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The standard single-bed nightly price
    pub fn php_500() -> Money {
        Money::new(dec!(500.00), Currency::PHP)
    }

    /// The cheaper bed used in the two-guest scenario
    pub fn php_300() -> Money {
        Money::new(dec!(300.00), Currency::PHP)
    }

    /// A mid-stay partial payment
    pub fn php_partial_payment() -> Money {
        Money::new(dec!(1200.00), Currency::PHP)
    }

    /// A zero peso amount
    pub fn php_zero() -> Money {
        Money::zero(Currency::PHP)
    }

    /// A USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard check-in date (Jan 1, 2025)
    pub fn check_in() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    /// Standard check-out date (Jan 5, 2025), making a four-night stay
    pub fn check_out() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
    }

    /// The standard four-night stay
    pub fn four_night_stay() -> StayPeriod {
        StayPeriod::new(Self::check_in(), Self::check_out()).unwrap()
    }

    /// A stay overlapping the standard one by two nights
    pub fn overlapping_stay() -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
        )
        .unwrap()
    }

    /// A stay starting on the standard check-out day (no overlap)
    pub fn back_to_back_stay() -> StayPeriod {
        StayPeriod::new(
            Self::check_out(),
            NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
        )
        .unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic reservation ID for testing
    pub fn reservation_id() -> ReservationId {
        ReservationId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic guest ID for testing
    pub fn guest_id() -> GuestId {
        GuestId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic bed ID for testing
    pub fn bed_id() -> BedId {
        BedId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic room ID for testing
    pub fn room_id() -> RoomId {
        RoomId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }

    /// Creates a deterministic office ID for testing
    pub fn office_id() -> OfficeId {
        OfficeId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440005").unwrap())
    }

    /// Creates a deterministic user ID for testing
    pub fn user_id() -> UserId {
        UserId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440006").unwrap())
    }
}

/// Fixture for decimal test data
pub struct DecimalFixtures;

impl DecimalFixtures {
    /// The daily rate of the standard two-guest scenario (500 + 300)
    pub fn scenario_daily_rate() -> Decimal {
        dec!(800.00)
    }

    /// Total billings of the standard scenario (800 x 4 nights)
    pub fn scenario_total_billings() -> Decimal {
        dec!(3200.00)
    }

    /// Zero for comparison tests
    pub fn zero() -> Decimal {
        Decimal::ZERO
    }

    /// Small epsilon for decimal comparisons
    pub fn epsilon() -> Decimal {
        dec!(0.000001)
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// Standard reservation confirmation code
    pub fn reservation_code() -> &'static str {
        "HST-2025-000001"
    }

    /// Standard official receipt number
    pub fn or_number() -> &'static str {
        "OR-1"
    }

    /// Standard gateway transaction id
    pub fn transaction_id() -> &'static str {
        "T-1"
    }

    /// Standard exemption reason
    pub fn exemption_reason() -> &'static str {
        "Official government travel order"
    }

    /// Test booker name
    pub fn booker_name() -> &'static str {
        "Juan Dela Cruz"
    }

    /// Test guest name
    pub fn guest_name() -> &'static str {
        "Maria Santos"
    }

    /// Test room name
    pub fn room_name() -> &'static str {
        "Room 204"
    }

    /// Test bed name
    pub fn bed_name() -> &'static str {
        "A-1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_fixtures_are_php() {
        assert_eq!(MoneyFixtures::php_500().currency(), Currency::PHP);
        assert_eq!(MoneyFixtures::php_300().currency(), Currency::PHP);
    }

    #[test]
    fn test_standard_stay_is_four_nights() {
        assert_eq!(TemporalFixtures::four_night_stay().nights(), 4);
    }

    #[test]
    fn test_overlap_fixtures_behave() {
        let stay = TemporalFixtures::four_night_stay();
        assert!(stay.overlaps(&TemporalFixtures::overlapping_stay()));
        assert!(!stay.overlaps(&TemporalFixtures::back_to_back_stay()));
    }

    #[test]
    fn test_id_fixtures_are_deterministic() {
        assert_eq!(IdFixtures::reservation_id(), IdFixtures::reservation_id());
    }
}
