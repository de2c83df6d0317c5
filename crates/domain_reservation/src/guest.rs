//! Guests attached to reservations

use serde::{Deserialize, Serialize};

use core_kernel::{GuestId, ReservationId};
use domain_lodging::Gender;

/// A person staying under a reservation
///
/// Each guest occupies exactly one bed per reservation through a bed hold.
/// The exemption flag flips irreversibly when the guest's bed cost is
/// waived; there is no un-exempt operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    /// Unique identifier
    pub id: GuestId,
    /// Reservation this guest belongs to
    pub reservation_id: ReservationId,
    /// Display name
    pub display_name: String,
    /// Guest gender, used for room eligibility
    pub gender: Gender,
    /// Whether this guest's bed cost has been waived
    pub is_exempted: bool,
}

impl Guest {
    /// Creates a new, non-exempted guest
    pub fn new(
        reservation_id: ReservationId,
        display_name: impl Into<String>,
        gender: Gender,
    ) -> Self {
        Self {
            id: GuestId::new_v7(),
            reservation_id,
            display_name: display_name.into(),
            gender,
            is_exempted: false,
        }
    }

    /// Flags the guest as exempted
    ///
    /// Irreversible; the exemption engine checks the flag before calling.
    pub fn mark_exempted(&mut self) {
        self.is_exempted = true;
    }
}
