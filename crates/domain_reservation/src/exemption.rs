//! Payment exemptions
//!
//! An exemption waives one guest's bed cost for a reservation, exactly once
//! per guest. The engine checks its own preconditions (including the
//! already-exempted flag) instead of trusting callers to pre-filter
//! candidate lists, and snapshots the bed price at waiver time so later
//! price edits cannot rewrite history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use core_kernel::{ActorContext, ExemptionId, GuestId, Money, ReservationId, UserId};

use crate::error::ReservationError;
use crate::guest::Guest;
use crate::ledger::LedgerProjection;
use crate::reservation::Reservation;

/// An immutable record of a waived bed cost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentExemption {
    /// Unique identifier
    pub id: ExemptionId,
    /// Reservation the waiver applies to
    pub reservation_id: ReservationId,
    /// The exempted guest
    pub guest_id: GuestId,
    /// User who granted the waiver
    pub granted_by: UserId,
    /// The bed's nightly price at waiver time
    pub waived_price: Money,
    /// Why the cost was waived
    pub reason: String,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// The full effect of a successful exemption
///
/// The storage layer persists all three pieces in one transaction: the
/// exemption row, the guest's flipped flag, and the recomputed ledger.
#[derive(Debug, Clone)]
pub struct ExemptionOutcome {
    pub exemption: PaymentExemption,
    pub ledger: LedgerProjection,
}

/// Decides whether a guest's bed cost can be waived and computes the effect
///
/// # Errors
///
/// - `NotAcceptingPayments` when the reservation is canceled or checked out
/// - `GuestNotInReservation` when the guest belongs to another reservation
/// - `AlreadyExempted` when the guest's cost was waived before
/// - `NoBedAssigned` / `BedHasNoPrice` when there is nothing to waive
pub fn prepare_exemption(
    ctx: &ActorContext,
    reservation: &Reservation,
    guest: &Guest,
    bed_price: Option<Money>,
    reason: impl Into<String>,
    total_paid: Money,
) -> Result<ExemptionOutcome, ReservationError> {
    if !reservation.status.accepts_payments() {
        return Err(ReservationError::NotAcceptingPayments(reservation.status));
    }
    if guest.reservation_id != reservation.id {
        return Err(ReservationError::GuestNotInReservation);
    }
    if guest.is_exempted {
        return Err(ReservationError::AlreadyExempted);
    }
    let waived_price = bed_price.ok_or(ReservationError::NoBedAssigned)?;
    if !waived_price.is_positive() {
        return Err(ReservationError::BedHasNoPrice);
    }

    let ledger = LedgerProjection::recompute_after_waiver(
        reservation.ledger.daily_rate,
        waived_price,
        &reservation.stay,
        total_paid,
    )?;

    info!(
        reservation = %reservation.id,
        guest = %guest.id,
        waived = %waived_price,
        "bed cost waived"
    );

    Ok(ExemptionOutcome {
        exemption: PaymentExemption {
            id: ExemptionId::new_v7(),
            reservation_id: reservation.id,
            guest_id: guest.id,
            granted_by: ctx.user_id,
            waived_price,
            reason: reason.into(),
            created_at: Utc::now(),
        },
        ledger,
    })
}
