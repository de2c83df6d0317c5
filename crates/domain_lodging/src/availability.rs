//! Bed availability
//!
//! Answers "which beds are free for stay `[check_in, check_out)`" against a
//! set of active holds. Callers load the holds of non-canceled reservations
//! only; canceled reservations release their beds.
//!
//! This in-memory check is re-run inside the assignment transaction against
//! locked rows, so the answer a user saw on the form cannot race another
//! admin into a double booking.

use core_kernel::{BedId, StayPeriod};
use tracing::debug;

use crate::bed::Bed;
use crate::error::LodgingError;
use crate::hold::BedHold;

/// Returns the beds free for the given stay
///
/// A bed is free when it is assignable (not under maintenance) and no active
/// hold on it overlaps the stay.
pub fn free_beds<'a>(
    beds: &'a [Bed],
    active_holds: &[BedHold],
    stay: &StayPeriod,
) -> Vec<&'a Bed> {
    beds.iter()
        .filter(|bed| bed.status.is_assignable())
        .filter(|bed| !active_holds.iter().any(|h| h.blocks(bed.id, stay)))
        .collect()
}

/// Verifies that every requested bed is free for the stay
///
/// Used inside the assignment transaction after the bed rows are locked.
/// The first conflicting bed aborts the whole assignment.
pub fn ensure_all_free(
    requested: &[BedId],
    beds: &[Bed],
    active_holds: &[BedHold],
    stay: &StayPeriod,
) -> Result<(), LodgingError> {
    for bed_id in requested {
        let bed = beds
            .iter()
            .find(|b| b.id == *bed_id)
            .ok_or(LodgingError::UnknownBed { bed_id: *bed_id })?;

        if !bed.status.is_assignable() {
            return Err(LodgingError::BedUnavailable { bed_id: *bed_id });
        }

        if active_holds.iter().any(|h| h.blocks(*bed_id, stay)) {
            debug!(bed = %bed_id, "bed hold conflict");
            return Err(LodgingError::BedUnavailable { bed_id: *bed_id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bed::BedStatus;
    use chrono::NaiveDate;
    use core_kernel::{GuestId, ReservationId, RoomId};

    fn stay(from: (i32, u32, u32), to: (i32, u32, u32)) -> StayPeriod {
        StayPeriod::new(
            NaiveDate::from_ymd_opt(from.0, from.1, from.2).unwrap(),
            NaiveDate::from_ymd_opt(to.0, to.1, to.2).unwrap(),
        )
        .unwrap()
    }

    fn hold_on(bed_id: BedId, from: (i32, u32, u32), to: (i32, u32, u32)) -> BedHold {
        BedHold::new(bed_id, GuestId::new(), ReservationId::new(), stay(from, to))
    }

    #[test]
    fn test_free_beds_excludes_overlapping_holds() {
        let room = RoomId::new();
        let beds = vec![Bed::new(room, "A-1"), Bed::new(room, "A-2")];
        let holds = vec![hold_on(beds[0].id, (2025, 1, 1), (2025, 1, 5))];

        let free = free_beds(&beds, &holds, &stay((2025, 1, 3), (2025, 1, 7)));
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, beds[1].id);
    }

    #[test]
    fn test_free_beds_excludes_maintenance() {
        let room = RoomId::new();
        let beds = vec![
            Bed::new(room, "A-1").with_status(BedStatus::Maintenance),
            Bed::new(room, "A-2"),
        ];

        let free = free_beds(&beds, &[], &stay((2025, 1, 1), (2025, 1, 5)));
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].id, beds[1].id);
    }

    #[test]
    fn test_bed_freed_on_checkout_day() {
        let room = RoomId::new();
        let beds = vec![Bed::new(room, "A-1")];
        let holds = vec![hold_on(beds[0].id, (2025, 1, 1), (2025, 1, 5))];

        let free = free_beds(&beds, &holds, &stay((2025, 1, 5), (2025, 1, 9)));
        assert_eq!(free.len(), 1);
    }

    #[test]
    fn test_ensure_all_free_rejects_conflict() {
        let room = RoomId::new();
        let beds = vec![Bed::new(room, "A-1")];
        let holds = vec![hold_on(beds[0].id, (2025, 1, 1), (2025, 1, 5))];

        let result = ensure_all_free(
            &[beds[0].id],
            &beds,
            &holds,
            &stay((2025, 1, 2), (2025, 1, 4)),
        );
        assert!(matches!(result, Err(LodgingError::BedUnavailable { .. })));
    }

    #[test]
    fn test_ensure_all_free_rejects_unknown_bed() {
        let result = ensure_all_free(
            &[BedId::new()],
            &[],
            &[],
            &stay((2025, 1, 1), (2025, 1, 5)),
        );
        assert!(matches!(result, Err(LodgingError::UnknownBed { .. })));
    }

    #[test]
    fn test_ensure_all_free_accepts_disjoint_holds() {
        let room = RoomId::new();
        let beds = vec![Bed::new(room, "A-1")];
        let holds = vec![hold_on(beds[0].id, (2025, 2, 1), (2025, 2, 5))];

        let result = ensure_all_free(
            &[beds[0].id],
            &beds,
            &holds,
            &stay((2025, 1, 1), (2025, 1, 5)),
        );
        assert!(result.is_ok());
    }
}
