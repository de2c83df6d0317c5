//! Comprehensive tests for domain_lodging

use chrono::NaiveDate;
use core_kernel::{Currency, GuestId, Money, OfficeId, ReservationId, RoomId, StayPeriod};
use rust_decimal_macros::dec;

use domain_lodging::availability::{ensure_all_free, free_beds};
use domain_lodging::{Bed, BedHold, BedStatus, Gender, LodgingError, Room};

fn stay(from: (i32, u32, u32), to: (i32, u32, u32)) -> StayPeriod {
    StayPeriod::new(
        NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
        NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
    )
    .unwrap()
}

mod inventory {
    use super::*;

    #[test]
    fn test_room_gender_eligibility() {
        let room = Room::new(OfficeId::new(), "Female Dorm 1")
            .with_eligible_gender(Gender::Female);

        assert!(room.eligible_gender.admits(Gender::Female));
        assert!(!room.eligible_gender.admits(Gender::Male));
    }

    #[test]
    fn test_bed_price_is_optional() {
        let unpriced = Bed::new(RoomId::new(), "B-1");
        let priced = Bed::new(RoomId::new(), "B-2")
            .with_price(Money::new(dec!(300.00), Currency::PHP));

        assert!(unpriced.price.is_none());
        assert_eq!(priced.price.unwrap().amount(), dec!(300.00));
    }

    #[test]
    fn test_bed_status_serializes_snake_case() {
        let json = serde_json::to_string(&BedStatus::Maintenance).unwrap();
        assert_eq!(json, "\"maintenance\"");
    }
}

mod double_booking {
    use super::*;

    /// Two reservations racing for the same bed over overlapping dates:
    /// whichever hold lands first blocks the other.
    #[test]
    fn test_second_overlapping_assignment_is_rejected() {
        let room = RoomId::new();
        let beds = vec![Bed::new(room, "A-1").with_price(Money::new(dec!(500.00), Currency::PHP))];
        let first_stay = stay((2025, 1, 1), (2025, 1, 5));
        let second_stay = stay((2025, 1, 3), (2025, 1, 7));

        // First assignment goes through against an empty hold set
        assert!(ensure_all_free(&[beds[0].id], &beds, &[], &first_stay).is_ok());

        let committed = vec![BedHold::new(
            beds[0].id,
            GuestId::new(),
            ReservationId::new(),
            first_stay,
        )];

        // Second assignment sees the committed hold and fails
        let result = ensure_all_free(&[beds[0].id], &beds, &committed, &second_stay);
        assert!(matches!(result, Err(LodgingError::BedUnavailable { .. })));
    }

    #[test]
    fn test_canceled_reservations_release_their_beds() {
        // Callers only pass holds of non-canceled reservations; with the
        // canceled hold filtered out, the bed is free again.
        let room = RoomId::new();
        let beds = vec![Bed::new(room, "A-1")];
        let requested_stay = stay((2025, 1, 1), (2025, 1, 5));

        let free = free_beds(&beds, &[], &requested_stay);
        assert_eq!(free.len(), 1);
    }

    #[test]
    fn test_multi_bed_assignment_fails_atomically() {
        let room = RoomId::new();
        let beds = vec![Bed::new(room, "A-1"), Bed::new(room, "A-2")];
        let requested_stay = stay((2025, 1, 1), (2025, 1, 5));

        let holds = vec![BedHold::new(
            beds[1].id,
            GuestId::new(),
            ReservationId::new(),
            stay((2025, 1, 4), (2025, 1, 6)),
        )];

        // One of the two requested beds conflicts, so the whole request fails
        let result = ensure_all_free(
            &[beds[0].id, beds[1].id],
            &beds,
            &holds,
            &requested_stay,
        );
        assert!(matches!(
            result,
            Err(LodgingError::BedUnavailable { bed_id }) if bed_id == beds[1].id
        ));
    }
}

mod availability_properties {
    use super::*;
    use proptest::prelude::*;

    fn arb_stay() -> impl Strategy<Value = StayPeriod> {
        (0i64..365, 1i64..30).prop_map(|(offset, len)| {
            let check_in = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
                + chrono::Duration::days(offset);
            StayPeriod::new(check_in, check_in + chrono::Duration::days(len)).unwrap()
        })
    }

    proptest! {
        /// No bed returned as free ever carries a hold overlapping the
        /// requested stay.
        #[test]
        fn free_beds_never_conflict(
            held in arb_stay(),
            requested in arb_stay()
        ) {
            let room = RoomId::new();
            let beds = vec![Bed::new(room, "A-1")];
            let holds = vec![BedHold::new(
                beds[0].id,
                GuestId::new(),
                ReservationId::new(),
                held,
            )];

            let free = free_beds(&beds, &holds, &requested);
            for bed in free {
                prop_assert!(!holds.iter().any(|h| h.blocks(bed.id, &requested)));
            }
        }
    }
}

mod availability_filtering {
    use super::*;

    #[test]
    fn test_free_beds_across_rooms() {
        let room_a = RoomId::new();
        let room_b = RoomId::new();
        let beds = vec![
            Bed::new(room_a, "A-1"),
            Bed::new(room_a, "A-2").with_status(BedStatus::Maintenance),
            Bed::new(room_b, "B-1"),
        ];

        let holds = vec![BedHold::new(
            beds[2].id,
            GuestId::new(),
            ReservationId::new(),
            stay((2025, 1, 1), (2025, 1, 5)),
        )];

        let free = free_beds(&beds, &holds, &stay((2025, 1, 2), (2025, 1, 4)));
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, beds[0].id);
    }
}
