//! Payment repository implementation
//!
//! Recording a payment is the canonical atomic unit of this system: the
//! payment row and the reservation's balance update commit together or not
//! at all. The reservation row is locked before validation so two
//! simultaneous payments cannot both pass the balance check against a stale
//! value.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use core_kernel::{ActorContext, Money, PaymentId, ReservationId};
use domain_reservation::{Payment, PaymentMethod, PaymentRequest, ReservationError};

use crate::error::{DatabaseError, StoreError};
use super::reservation::{currency_from_code, lock_reservation, total_paid};

/// Database row for a payment
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PaymentRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub amount: Decimal,
    pub or_number: String,
    pub or_date: NaiveDate,
    pub transaction_id: String,
    pub method: String,
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

impl PaymentRow {
    pub fn into_domain(self) -> Result<Payment, DatabaseError> {
        let currency = currency_from_code(&self.currency)?;
        Ok(Payment {
            id: PaymentId::from(self.id),
            reservation_id: ReservationId::from(self.reservation_id),
            amount: Money::new(self.amount, currency),
            or_number: self.or_number,
            or_date: self.or_date,
            transaction_id: self.transaction_id,
            method: method_from_str(&self.method)?,
            created_at: self.created_at,
        })
    }
}

pub(crate) fn method_from_str(method: &str) -> Result<PaymentMethod, DatabaseError> {
    match method {
        "cash" => Ok(PaymentMethod::Cash),
        "online" => Ok(PaymentMethod::Online),
        other => Err(DatabaseError::SerializationError(format!(
            "unknown payment method '{}'",
            other
        ))),
    }
}

pub(crate) fn method_as_str(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Cash => "cash",
        PaymentMethod::Online => "online",
    }
}

/// Repository for payment records
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    /// Creates a new PaymentRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records a payment and shrinks the remaining balance atomically
    ///
    /// Inside one transaction: lock the reservation row, validate the
    /// request against the locked balance, reject duplicate receipt numbers
    /// and transaction ids, insert the payment, update the balance. The
    /// unique constraints on `or_number` and `transaction_id` back up the
    /// pre-checks against races between the check and the insert.
    ///
    /// # Errors
    ///
    /// - Validation failures (`NonPositiveAmount`, `AmountExceedsBalance`,
    ///   duplicates) surface with their message
    /// - Any storage failure rolls both writes back and surfaces as an
    ///   opaque error the API collapses to "payment processing failed"
    pub async fn record_payment(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
        request: PaymentRequest,
    ) -> Result<Payment, StoreError> {
        let mut tx = self.pool.begin().await?;

        let reservation = lock_reservation(&mut tx, ctx, reservation_id).await?;
        request.validate(&reservation)?;

        let or_taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM payments WHERE or_number = $1)",
        )
        .bind(&request.or_number)
        .fetch_one(&mut *tx)
        .await?;
        if or_taken {
            return Err(
                DatabaseError::duplicate("Payment", "or_number", &request.or_number).into(),
            );
        }

        let txn_taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM payments WHERE transaction_id = $1)",
        )
        .bind(&request.transaction_id)
        .fetch_one(&mut *tx)
        .await?;
        if txn_taken {
            return Err(DatabaseError::duplicate(
                "Payment",
                "transaction_id",
                &request.transaction_id,
            )
            .into());
        }

        let payment = request.into_payment(reservation_id);

        sqlx::query(
            "INSERT INTO payments (id, reservation_id, amount, or_number, or_date, \
             transaction_id, method, currency, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(payment.id.as_uuid())
        .bind(payment.reservation_id.as_uuid())
        .bind(payment.amount.amount())
        .bind(&payment.or_number)
        .bind(payment.or_date)
        .bind(&payment.transaction_id)
        .bind(method_as_str(payment.method))
        .bind(payment.amount.currency().code())
        .bind(payment.created_at)
        .execute(&mut *tx)
        .await?;

        let ledger = reservation
            .ledger
            .after_payment(payment.amount)
            .map_err(ReservationError::from)?;
        super::reservation::store_ledger(&mut tx, reservation_id, &ledger).await?;

        tx.commit().await?;

        info!(
            reservation = %reservation_id,
            or_number = %payment.or_number,
            amount = %payment.amount,
            "payment recorded"
        );
        Ok(payment)
    }

    /// Lists a reservation's payments, newest first
    pub async fn payment_history(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
    ) -> Result<Vec<Payment>, StoreError> {
        let rows: Vec<PaymentRow> = sqlx::query_as(
            "SELECT p.id, p.reservation_id, p.amount, p.or_number, p.or_date, \
             p.transaction_id, p.method, p.currency, p.created_at \
             FROM payments p \
             JOIN reservations r ON r.id = p.reservation_id \
             WHERE p.reservation_id = $1 AND r.hostel_office_id = $2 \
             ORDER BY p.created_at DESC",
        )
        .bind(reservation_id.as_uuid())
        .bind(ctx.office_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(StoreError::from))
            .collect()
    }

    /// Returns the total amount paid against a reservation
    pub async fn total_paid_for(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
    ) -> Result<Money, StoreError> {
        let mut tx = self.pool.begin().await?;
        let reservation = lock_reservation(&mut tx, ctx, reservation_id).await?;
        let paid = total_paid(
            &mut tx,
            *reservation_id.as_uuid(),
            reservation.ledger.daily_rate.currency(),
        )
        .await?;
        tx.commit().await?;
        Ok(paid)
    }
}
