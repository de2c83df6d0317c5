//! Reservation Aggregate Root
//!
//! The Reservation aggregate is the consistency boundary for a booked stay.
//! It owns the status lifecycle and the derived billing ledger; every
//! mutation that touches money funnels through [`LedgerProjection`] so the
//! stored financial fields can never drift from their derivation.
//!
//! # Lifecycle
//!
//! ```text
//! pending ──> checked_in ──> checked_out
//!    │             │
//!    └─────────────┴──> canceled
//! ```
//!
//! Bed assignment only operates on `pending` reservations; payments and
//! exemptions operate on anything not canceled and not checked out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, OfficeId, ReservationId, StayPeriod};

use crate::error::ReservationError;
use crate::ledger::LedgerProjection;

/// Reservation lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// On the waiting list, beds not yet assigned
    Pending,
    /// Guests are in the hostel
    CheckedIn,
    /// Stay completed (terminal)
    CheckedOut,
    /// Aborted before or during the stay (terminal)
    Canceled,
}

impl ReservationStatus {
    /// Returns true for states that end the lifecycle
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReservationStatus::CheckedOut | ReservationStatus::Canceled)
    }

    /// Returns true if payments and exemptions may still be recorded
    pub fn accepts_payments(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true if the transition to `next` is allowed
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        use ReservationStatus::*;
        matches!(
            (self, next),
            (Pending, CheckedIn) | (CheckedIn, CheckedOut) | (Pending, Canceled) | (CheckedIn, Canceled)
        )
    }
}

/// How the booking party intends to settle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    PayNow,
    PayLater,
}

/// A guest party's booked stay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier
    pub id: ReservationId,
    /// Human-readable confirmation code, used for the public status lookup
    pub code: String,
    /// Name of the person who booked
    pub booked_by: String,
    /// Hostel office that owns this reservation
    pub hostel_office_id: OfficeId,
    /// Office the guests travel from
    pub guest_office_id: OfficeId,
    /// The booked stay range
    pub stay: StayPeriod,
    /// Derived financial state
    pub ledger: LedgerProjection,
    /// Lifecycle status
    pub status: ReservationStatus,
    /// Settlement intent
    pub payment_type: PaymentType,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new pending reservation with an empty ledger
    pub fn new(
        booked_by: impl Into<String>,
        hostel_office_id: OfficeId,
        guest_office_id: OfficeId,
        stay: StayPeriod,
        currency: Currency,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ReservationId::new_v7(),
            code: generate_reservation_code(),
            booked_by: booked_by.into(),
            hostel_office_id,
            guest_office_id,
            stay,
            ledger: LedgerProjection::zero(currency),
            status: ReservationStatus::Pending,
            payment_type: PaymentType::PayNow,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the reservation to a new status
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` for any move outside the lifecycle.
    pub fn transition_to(&mut self, next: ReservationStatus) -> Result<(), ReservationError> {
        if !self.status.can_transition_to(next) {
            return Err(ReservationError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Checks the guests in
    pub fn check_in(&mut self) -> Result<(), ReservationError> {
        self.transition_to(ReservationStatus::CheckedIn)
    }

    /// Checks the guests out
    pub fn check_out(&mut self) -> Result<(), ReservationError> {
        self.transition_to(ReservationStatus::CheckedOut)
    }

    /// Cancels the reservation
    pub fn cancel(&mut self) -> Result<(), ReservationError> {
        self.transition_to(ReservationStatus::Canceled)
    }

    /// Switches the settlement intent to pay-later
    pub fn set_pay_later(&mut self) {
        self.payment_type = PaymentType::PayLater;
        self.updated_at = Utc::now();
    }

    /// Applies a finished bed assignment: derives the initial ledger from
    /// the assigned bed prices
    ///
    /// # Errors
    ///
    /// Returns `NotPending` when beds are assigned outside the waiting list.
    pub fn apply_bed_assignment(
        &mut self,
        bed_prices: &[Money],
        total_paid: Money,
    ) -> Result<(), ReservationError> {
        if self.status != ReservationStatus::Pending {
            return Err(ReservationError::NotPending);
        }
        self.ledger = LedgerProjection::recompute(bed_prices, &self.stay, total_paid)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Extends the stay to a later check-out date and re-derives the ledger
    /// from the current daily rate
    ///
    /// # Errors
    ///
    /// - `NotAcceptingPayments` when the reservation is terminal
    /// - `InvalidExtension` when the new date does not move check-out forward
    pub fn extend_stay(
        &mut self,
        new_check_out: chrono::NaiveDate,
        total_paid: Money,
    ) -> Result<(), ReservationError> {
        if !self.status.accepts_payments() {
            return Err(ReservationError::NotAcceptingPayments(self.status));
        }
        if new_check_out <= self.stay.check_out() {
            return Err(ReservationError::InvalidExtension);
        }

        self.stay = StayPeriod::new(self.stay.check_in(), new_check_out)?;
        self.ledger =
            LedgerProjection::from_daily_rate(self.ledger.daily_rate, &self.stay, total_paid)?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// Generates a unique reservation confirmation code
fn generate_reservation_code() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("HST-{}", duration.as_millis() % 10_000_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn php(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::PHP)
    }

    fn test_reservation() -> Reservation {
        let stay = StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        )
        .unwrap();
        Reservation::new(
            "Juan Dela Cruz",
            OfficeId::new(),
            OfficeId::new(),
            stay,
            Currency::PHP,
        )
    }

    #[test]
    fn test_new_reservation_is_pending_pay_now() {
        let r = test_reservation();
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.payment_type, PaymentType::PayNow);
        assert!(r.ledger.total_billings.is_zero());
        assert!(r.code.starts_with("HST-"));
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut r = test_reservation();
        r.check_in().unwrap();
        assert_eq!(r.status, ReservationStatus::CheckedIn);
        r.check_out().unwrap();
        assert_eq!(r.status, ReservationStatus::CheckedOut);
    }

    #[test]
    fn test_cancel_from_pending_and_checked_in() {
        let mut r = test_reservation();
        r.cancel().unwrap();
        assert_eq!(r.status, ReservationStatus::Canceled);

        let mut r = test_reservation();
        r.check_in().unwrap();
        r.cancel().unwrap();
        assert_eq!(r.status, ReservationStatus::Canceled);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut r = test_reservation();
        r.cancel().unwrap();

        assert!(matches!(
            r.check_in(),
            Err(ReservationError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_check_out_requires_check_in() {
        let mut r = test_reservation();
        assert!(matches!(
            r.check_out(),
            Err(ReservationError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_bed_assignment_derives_ledger() {
        let mut r = test_reservation();
        r.apply_bed_assignment(
            &[php(dec!(500)), php(dec!(300))],
            Money::zero(Currency::PHP),
        )
        .unwrap();

        assert_eq!(r.ledger.daily_rate, php(dec!(800)));
        assert_eq!(r.ledger.total_billings, php(dec!(3200)));
        assert_eq!(r.ledger.remaining_balance, php(dec!(3200)));
    }

    #[test]
    fn test_bed_assignment_rejected_after_check_in() {
        let mut r = test_reservation();
        r.check_in().unwrap();

        let result = r.apply_bed_assignment(&[php(dec!(500))], Money::zero(Currency::PHP));
        assert!(matches!(result, Err(ReservationError::NotPending)));
    }

    #[test]
    fn test_extend_stay_recomputes_billings() {
        let mut r = test_reservation();
        r.apply_bed_assignment(&[php(dec!(800))], Money::zero(Currency::PHP))
            .unwrap();

        // four nights -> six nights at the same rate
        r.extend_stay(
            NaiveDate::from_ymd_opt(2025, 1, 7).unwrap(),
            php(dec!(1200)),
        )
        .unwrap();

        assert_eq!(r.stay.nights(), 6);
        assert_eq!(r.ledger.total_billings, php(dec!(4800)));
        assert_eq!(r.ledger.remaining_balance, php(dec!(3600)));
    }

    #[test]
    fn test_extend_stay_must_move_forward() {
        let mut r = test_reservation();
        let result = r.extend_stay(
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            Money::zero(Currency::PHP),
        );
        assert!(matches!(result, Err(ReservationError::InvalidExtension)));
    }

    #[test]
    fn test_extend_stay_rejected_when_terminal() {
        let mut r = test_reservation();
        r.cancel().unwrap();

        let result = r.extend_stay(
            NaiveDate::from_ymd_opt(2025, 1, 9).unwrap(),
            Money::zero(Currency::PHP),
        );
        assert!(matches!(
            result,
            Err(ReservationError::NotAcceptingPayments(_))
        ));
    }

    #[test]
    fn test_pay_later_toggle() {
        let mut r = test_reservation();
        r.set_pay_later();
        assert_eq!(r.payment_type, PaymentType::PayLater);
    }
}
