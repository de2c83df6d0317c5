//! Bed holds
//!
//! A hold is the guest-to-bed assignment of a reservation for its stay
//! range. Holds are the unit of double-booking control: a bed with a hold
//! from any non-canceled reservation is unavailable for overlapping stays.

use serde::{Deserialize, Serialize};

use core_kernel::{BedHoldId, BedId, GuestId, ReservationId, StayPeriod};

/// A guest's claim on a bed for a stay range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedHold {
    /// Unique identifier
    pub id: BedHoldId,
    /// The held bed
    pub bed_id: BedId,
    /// The guest sleeping in it
    pub guest_id: GuestId,
    /// The reservation the hold belongs to
    pub reservation_id: ReservationId,
    /// The stay range held
    pub stay: StayPeriod,
}

impl BedHold {
    /// Creates a new hold
    pub fn new(
        bed_id: BedId,
        guest_id: GuestId,
        reservation_id: ReservationId,
        stay: StayPeriod,
    ) -> Self {
        Self {
            id: BedHoldId::new_v7(),
            bed_id,
            guest_id,
            reservation_id,
            stay,
        }
    }

    /// Returns true if this hold blocks the given bed for the given stay
    pub fn blocks(&self, bed_id: BedId, stay: &StayPeriod) -> bool {
        self.bed_id == bed_id && self.stay.overlaps(stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn stay(from: (i32, u32, u32), to: (i32, u32, u32)) -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_hold_blocks_overlapping_stay_on_same_bed() {
        let bed = BedId::new();
        let hold = BedHold::new(bed, GuestId::new(), ReservationId::new(), stay((2025, 1, 1), (2025, 1, 5)));

        assert!(hold.blocks(bed, &stay((2025, 1, 4), (2025, 1, 8))));
    }

    #[test]
    fn test_hold_ignores_other_beds() {
        let hold = BedHold::new(
            BedId::new(),
            GuestId::new(),
            ReservationId::new(),
            stay((2025, 1, 1), (2025, 1, 5)),
        );

        assert!(!hold.blocks(BedId::new(), &stay((2025, 1, 1), (2025, 1, 5))));
    }

    #[test]
    fn test_hold_allows_back_to_back_stay() {
        let bed = BedId::new();
        let hold = BedHold::new(bed, GuestId::new(), ReservationId::new(), stay((2025, 1, 1), (2025, 1, 5)));

        assert!(!hold.blocks(bed, &stay((2025, 1, 5), (2025, 1, 9))));
    }
}
