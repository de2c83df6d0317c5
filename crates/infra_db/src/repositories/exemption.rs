//! Payment exemption repository implementation
//!
//! Waiving a guest's bed cost touches three rows: the new exemption record,
//! the guest's exemption flag, and the reservation's recomputed ledger. All
//! three commit as one transaction under the reservation row lock; any
//! failure rolls the whole waiver back.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use core_kernel::{ActorContext, ExemptionId, GuestId, Money, ReservationId, UserId};
use domain_reservation::{prepare_exemption, Guest, PaymentExemption};

use crate::error::{DatabaseError, StoreError};
use super::lodging::gender_from_str;
use super::reservation::{currency_from_code, lock_reservation, store_ledger, total_paid};

/// Database row for a payment exemption
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExemptionRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub guest_id: Uuid,
    pub user_id: Uuid,
    pub price: Decimal,
    pub currency: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl ExemptionRow {
    pub fn into_domain(self) -> Result<PaymentExemption, DatabaseError> {
        let currency = currency_from_code(&self.currency)?;
        Ok(PaymentExemption {
            id: ExemptionId::from(self.id),
            reservation_id: ReservationId::from(self.reservation_id),
            guest_id: GuestId::from(self.guest_id),
            granted_by: UserId::from(self.user_id),
            waived_price: Money::new(self.price, currency),
            reason: self.reason,
            created_at: self.created_at,
        })
    }
}

/// Database row for a guest
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GuestRow {
    pub id: Uuid,
    pub reservation_id: Uuid,
    pub display_name: String,
    pub gender: String,
    pub is_exempted: bool,
}

impl GuestRow {
    pub fn into_domain(self) -> Result<Guest, DatabaseError> {
        Ok(Guest {
            id: GuestId::from(self.id),
            reservation_id: ReservationId::from(self.reservation_id),
            display_name: self.display_name,
            gender: gender_from_str(&self.gender)?,
            is_exempted: self.is_exempted,
        })
    }
}

async fn load_guest(
    tx: &mut Transaction<'_, Postgres>,
    guest_id: GuestId,
) -> Result<Guest, StoreError> {
    let row: Option<GuestRow> = sqlx::query_as(
        "SELECT id, reservation_id, display_name, gender, is_exempted \
         FROM guests WHERE id = $1 FOR UPDATE",
    )
    .bind(guest_id.as_uuid())
    .fetch_optional(&mut **tx)
    .await?;

    let row = row.ok_or_else(|| DatabaseError::not_found("Guest", guest_id))?;
    Ok(row.into_domain()?)
}

/// Repository for payment exemptions
#[derive(Debug, Clone)]
pub struct ExemptionRepository {
    pool: PgPool,
}

impl ExemptionRepository {
    /// Creates a new ExemptionRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Waives a guest's bed cost for a reservation, exactly once per guest
    ///
    /// Inside one transaction: lock the reservation and guest rows, load
    /// the guest's bed price through its hold, run the engine preconditions
    /// (guest belongs here, not already exempted, bed priced), then insert
    /// the exemption snapshot, flip the guest's flag, and store the
    /// recomputed ledger.
    pub async fn exempt_guest(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
        guest_id: GuestId,
        reason: String,
    ) -> Result<PaymentExemption, StoreError> {
        let mut tx = self.pool.begin().await?;

        let reservation = lock_reservation(&mut tx, ctx, reservation_id).await?;
        let guest = load_guest(&mut tx, guest_id).await?;

        let currency = reservation.ledger.daily_rate.currency();
        let hold_price: Option<Option<Decimal>> = sqlx::query_scalar(
            "SELECT b.price FROM bed_holds h \
             JOIN beds b ON b.id = h.bed_id \
             WHERE h.reservation_id = $1 AND h.guest_id = $2",
        )
        .bind(reservation_id.as_uuid())
        .bind(guest_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;
        // A hold on an unpriced bed must surface as "no price set", not as a
        // missing bed assignment
        let bed_price =
            hold_price.map(|p| Money::new(p.unwrap_or(Decimal::ZERO), currency));

        let paid = total_paid(&mut tx, *reservation_id.as_uuid(), currency).await?;
        let outcome = prepare_exemption(ctx, &reservation, &guest, bed_price, reason, paid)?;

        sqlx::query(
            "INSERT INTO payment_exemptions (id, reservation_id, guest_id, user_id, price, \
             currency, reason, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(outcome.exemption.id.as_uuid())
        .bind(outcome.exemption.reservation_id.as_uuid())
        .bind(outcome.exemption.guest_id.as_uuid())
        .bind(outcome.exemption.granted_by.as_uuid())
        .bind(outcome.exemption.waived_price.amount())
        .bind(outcome.exemption.waived_price.currency().code())
        .bind(&outcome.exemption.reason)
        .bind(outcome.exemption.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE guests SET is_exempted = TRUE WHERE id = $1")
            .bind(guest_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        store_ledger(&mut tx, reservation_id, &outcome.ledger).await?;

        tx.commit().await?;

        info!(
            reservation = %reservation_id,
            guest = %guest_id,
            waived = %outcome.exemption.waived_price,
            "payment exemption granted"
        );
        Ok(outcome.exemption)
    }

    /// Lists the exemptions granted on a reservation
    pub async fn exemptions_for(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
    ) -> Result<Vec<PaymentExemption>, StoreError> {
        let rows: Vec<ExemptionRow> = sqlx::query_as(
            "SELECT e.id, e.reservation_id, e.guest_id, e.user_id, e.price, e.currency, \
             e.reason, e.created_at \
             FROM payment_exemptions e \
             JOIN reservations r ON r.id = e.reservation_id \
             WHERE e.reservation_id = $1 AND r.hostel_office_id = $2 \
             ORDER BY e.created_at DESC",
        )
        .bind(reservation_id.as_uuid())
        .bind(ctx.office_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(StoreError::from))
            .collect()
    }

    /// Lists the guests of a reservation still eligible for exemption
    pub async fn exemption_candidates(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
    ) -> Result<Vec<Guest>, StoreError> {
        let rows: Vec<GuestRow> = sqlx::query_as(
            "SELECT g.id, g.reservation_id, g.display_name, g.gender, g.is_exempted \
             FROM guests g \
             JOIN reservations r ON r.id = g.reservation_id \
             WHERE g.reservation_id = $1 AND r.hostel_office_id = $2 \
               AND g.is_exempted = FALSE \
             ORDER BY g.display_name",
        )
        .bind(reservation_id.as_uuid())
        .bind(ctx.office_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|r| r.into_domain().map_err(StoreError::from))
            .collect()
    }
}
