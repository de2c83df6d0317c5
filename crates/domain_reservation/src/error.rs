//! Reservation domain errors
//!
//! Two families matter to callers: validation failures (bad input, reported
//! field-by-field) and domain invariant failures (the operation is shaped
//! correctly but the aggregate refuses it). Storage failures live in the
//! infrastructure layer and never reach this enum.

use core_kernel::{MoneyError, TemporalError};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::reservation::ReservationStatus;

/// Errors that can occur in the reservation domain
#[derive(Debug, Error)]
pub enum ReservationError {
    /// Payment amount is zero or negative
    #[error("The payment amount must not be zero or less")]
    NonPositiveAmount,

    /// Payment amount exceeds what is owed
    #[error("The payment amount must not exceed the remaining balance")]
    AmountExceedsBalance {
        amount: Decimal,
        remaining: Decimal,
    },

    /// Reservation is in a state that takes no further money movements
    #[error("Reservation in status {0:?} does not accept payments or exemptions")]
    NotAcceptingPayments(ReservationStatus),

    /// Guest is attached to a different reservation
    #[error("Guest does not belong to this reservation")]
    GuestNotInReservation,

    /// A guest can only be exempted once
    #[error("Guest has already been exempted")]
    AlreadyExempted,

    /// Exemption requires a bed assignment
    #[error("The selected guest does not have an associated bed")]
    NoBedAssigned,

    /// Exemption requires the bed to be priced
    #[error("The selected guest's bed has no price set")]
    BedHasNoPrice,

    /// Status change outside the allowed lifecycle
    #[error("Invalid status transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: ReservationStatus,
        to: ReservationStatus,
    },

    /// Extensions must push the check-out date forward
    #[error("Extended check-out must be after the current check-out date")]
    InvalidExtension,

    /// Bed assignment only applies to waiting-list reservations
    #[error("Beds can only be assigned while the reservation is pending")]
    NotPending,

    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),
}

impl ReservationError {
    /// Returns true for bad-input failures the caller can fix and resubmit
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReservationError::NonPositiveAmount
                | ReservationError::AmountExceedsBalance { .. }
                | ReservationError::Temporal(_)
        )
    }

    /// Returns the offending input field for validation failures
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ReservationError::NonPositiveAmount
            | ReservationError::AmountExceedsBalance { .. } => Some("amount"),
            ReservationError::Temporal(_) => Some("check_out_date"),
            _ => None,
        }
    }
}
