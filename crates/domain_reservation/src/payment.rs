//! Payment recording
//!
//! Payments are append-only audit rows: created once, never mutated or
//! deleted. Validation happens here against the reservation's current state;
//! the infrastructure layer re-runs it under a row lock before committing
//! the payment together with the balance update.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, PaymentId, ReservationId};

use crate::error::ReservationError;
use crate::reservation::Reservation;

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Over-the-counter cash
    Cash,
    /// Online gateway transfer
    Online,
}

/// An immutable payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Reservation the payment applies to
    pub reservation_id: ReservationId,
    /// Amount applied against the balance
    pub amount: Money,
    /// Official receipt number, globally unique
    pub or_number: String,
    /// Date on the official receipt
    pub or_date: NaiveDate,
    /// Gateway or ledger transaction id, globally unique
    pub transaction_id: String,
    /// How the payment was made
    pub method: PaymentMethod,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

/// A payment submission, not yet validated or persisted
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    pub amount: Money,
    pub or_number: String,
    pub or_date: NaiveDate,
    pub transaction_id: String,
    pub method: PaymentMethod,
}

impl PaymentRequest {
    /// Validates the request against the reservation's current state
    ///
    /// Receipt-number and transaction-id uniqueness are enforced by the
    /// storage layer; everything value-shaped is checked here.
    ///
    /// # Errors
    ///
    /// - `NotAcceptingPayments` when the reservation is canceled or
    ///   checked out
    /// - `NonPositiveAmount` when the amount is zero or less
    /// - `AmountExceedsBalance` when the amount overshoots what is owed
    pub fn validate(&self, reservation: &Reservation) -> Result<(), ReservationError> {
        if !reservation.status.accepts_payments() {
            return Err(ReservationError::NotAcceptingPayments(reservation.status));
        }
        if !self.amount.is_positive() {
            return Err(ReservationError::NonPositiveAmount);
        }
        let remaining = reservation.ledger.remaining_balance;
        // Currency mismatch surfaces here rather than mid-transaction
        remaining.checked_sub(&self.amount)?;
        if self.amount.amount() > remaining.amount() {
            return Err(ReservationError::AmountExceedsBalance {
                amount: self.amount.amount(),
                remaining: remaining.amount(),
            });
        }
        Ok(())
    }

    /// Turns the validated request into the immutable record
    pub fn into_payment(self, reservation_id: ReservationId) -> Payment {
        Payment {
            id: PaymentId::new_v7(),
            reservation_id,
            amount: self.amount,
            or_number: self.or_number,
            or_date: self.or_date,
            transaction_id: self.transaction_id,
            method: self.method,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{Currency, OfficeId, StayPeriod};
    use rust_decimal_macros::dec;

    fn php(amount: rust_decimal::Decimal) -> Money {
        Money::new(amount, Currency::PHP)
    }

    fn reservation_with_balance() -> Reservation {
        let stay = StayPeriod::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
        )
        .unwrap();
        let mut r = Reservation::new(
            "Juan Dela Cruz",
            OfficeId::new(),
            OfficeId::new(),
            stay,
            Currency::PHP,
        );
        r.apply_bed_assignment(&[php(dec!(200))], Money::zero(Currency::PHP))
            .unwrap();
        r
    }

    fn request(amount: Money) -> PaymentRequest {
        PaymentRequest {
            amount,
            or_number: "OR-1".to_string(),
            or_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            transaction_id: "T-1".to_string(),
            method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn test_valid_payment_passes() {
        let r = reservation_with_balance();
        assert!(request(php(dec!(500))).validate(&r).is_ok());
    }

    #[test]
    fn test_full_balance_payment_passes() {
        let r = reservation_with_balance();
        assert!(request(r.ledger.remaining_balance).validate(&r).is_ok());
    }

    #[test]
    fn test_zero_amount_rejected() {
        let r = reservation_with_balance();
        assert!(matches!(
            request(php(dec!(0))).validate(&r),
            Err(ReservationError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let r = reservation_with_balance();
        assert!(matches!(
            request(php(dec!(-100))).validate(&r),
            Err(ReservationError::NonPositiveAmount)
        ));
    }

    #[test]
    fn test_overshooting_amount_rejected() {
        let r = reservation_with_balance();
        // balance is 800 for the four-night 200/night stay
        assert!(matches!(
            request(php(dec!(5000))).validate(&r),
            Err(ReservationError::AmountExceedsBalance { .. })
        ));
    }

    #[test]
    fn test_canceled_reservation_rejects_payment() {
        let mut r = reservation_with_balance();
        r.cancel().unwrap();
        assert!(matches!(
            request(php(dec!(100))).validate(&r),
            Err(ReservationError::NotAcceptingPayments(_))
        ));
    }

    #[test]
    fn test_into_payment_preserves_fields() {
        let r = reservation_with_balance();
        let payment = request(php(dec!(500))).into_payment(r.id);

        assert_eq!(payment.reservation_id, r.id);
        assert_eq!(payment.amount, php(dec!(500)));
        assert_eq!(payment.or_number, "OR-1");
        assert_eq!(payment.transaction_id, "T-1");
        assert_eq!(payment.method, PaymentMethod::Cash);
    }
}
