//! Reservation repository implementation
//!
//! This module provides database access for reservation aggregates. Every
//! mutating operation runs in a single transaction and takes a
//! `SELECT ... FOR UPDATE` lock on the reservation row first, so concurrent
//! mutations of the same reservation serialize at the database.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tracing::info;
use uuid::Uuid;

use core_kernel::{ActorContext, Currency, Money, ReservationId, StayPeriod};
use domain_reservation::{
    LedgerProjection, PaymentType, Reservation, ReservationQuery, ReservationStatus,
};

use crate::error::{DatabaseError, StoreError};

pub(crate) const RESERVATION_COLUMNS: &str = "id, code, booked_by, hostel_office_id, \
     guest_office_id, check_in_date, check_out_date, daily_rate, total_billings, \
     remaining_balance, currency, status, payment_type, created_at, updated_at";

/// Database row for a reservation
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReservationRow {
    pub id: Uuid,
    pub code: String,
    pub booked_by: String,
    pub hostel_office_id: Uuid,
    pub guest_office_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub daily_rate: Decimal,
    pub total_billings: Decimal,
    pub remaining_balance: Decimal,
    pub currency: String,
    pub status: String,
    pub payment_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReservationRow {
    /// Rehydrates the domain aggregate from the stored row
    pub fn into_domain(self) -> Result<Reservation, DatabaseError> {
        let currency = currency_from_code(&self.currency)?;
        let stay = StayPeriod::new(self.check_in_date, self.check_out_date).map_err(|e| {
            DatabaseError::SerializationError(format!("reservation {}: {}", self.id, e))
        })?;

        Ok(Reservation {
            id: ReservationId::from(self.id),
            code: self.code,
            booked_by: self.booked_by,
            hostel_office_id: self.hostel_office_id.into(),
            guest_office_id: self.guest_office_id.into(),
            stay,
            ledger: LedgerProjection {
                daily_rate: Money::new(self.daily_rate, currency),
                total_billings: Money::new(self.total_billings, currency),
                remaining_balance: Money::new(self.remaining_balance, currency),
            },
            status: status_from_str(&self.status)?,
            payment_type: payment_type_from_str(&self.payment_type)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

pub(crate) fn currency_from_code(code: &str) -> Result<Currency, DatabaseError> {
    match code {
        "PHP" => Ok(Currency::PHP),
        "USD" => Ok(Currency::USD),
        "EUR" => Ok(Currency::EUR),
        "SGD" => Ok(Currency::SGD),
        "JPY" => Ok(Currency::JPY),
        other => Err(DatabaseError::SerializationError(format!(
            "unknown currency code '{}'",
            other
        ))),
    }
}

pub(crate) fn status_from_str(status: &str) -> Result<ReservationStatus, DatabaseError> {
    match status {
        "pending" => Ok(ReservationStatus::Pending),
        "checked_in" => Ok(ReservationStatus::CheckedIn),
        "checked_out" => Ok(ReservationStatus::CheckedOut),
        "canceled" => Ok(ReservationStatus::Canceled),
        other => Err(DatabaseError::SerializationError(format!(
            "unknown reservation status '{}'",
            other
        ))),
    }
}

pub(crate) fn status_as_str(status: ReservationStatus) -> &'static str {
    match status {
        ReservationStatus::Pending => "pending",
        ReservationStatus::CheckedIn => "checked_in",
        ReservationStatus::CheckedOut => "checked_out",
        ReservationStatus::Canceled => "canceled",
    }
}

pub(crate) fn payment_type_from_str(payment_type: &str) -> Result<PaymentType, DatabaseError> {
    match payment_type {
        "pay_now" => Ok(PaymentType::PayNow),
        "pay_later" => Ok(PaymentType::PayLater),
        other => Err(DatabaseError::SerializationError(format!(
            "unknown payment type '{}'",
            other
        ))),
    }
}

/// Sums all payments recorded against a reservation, inside the caller's
/// transaction so the total is consistent with the held row lock
pub(crate) async fn total_paid(
    tx: &mut Transaction<'_, Postgres>,
    reservation_id: Uuid,
    currency: Currency,
) -> Result<Money, DatabaseError> {
    let total: Decimal = sqlx::query_scalar(
        "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE reservation_id = $1",
    )
    .bind(reservation_id)
    .fetch_one(&mut **tx)
    .await?;

    Ok(Money::new(total, currency))
}

/// Locks and loads a reservation row scoped to the acting office
pub(crate) async fn lock_reservation(
    tx: &mut Transaction<'_, Postgres>,
    ctx: &ActorContext,
    id: ReservationId,
) -> Result<Reservation, StoreError> {
    let sql = format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations \
         WHERE id = $1 AND hostel_office_id = $2 FOR UPDATE"
    );
    let row: Option<ReservationRow> = sqlx::query_as(&sql)
        .bind(id.as_uuid())
        .bind(ctx.office_id.as_uuid())
        .fetch_optional(&mut **tx)
        .await?;

    let row = row.ok_or_else(|| DatabaseError::not_found("Reservation", id))?;
    Ok(row.into_domain()?)
}

/// Writes a reservation's derived ledger fields back to its row
pub(crate) async fn store_ledger(
    tx: &mut Transaction<'_, Postgres>,
    id: ReservationId,
    ledger: &LedgerProjection,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "UPDATE reservations \
         SET daily_rate = $2, total_billings = $3, remaining_balance = $4, updated_at = NOW() \
         WHERE id = $1",
    )
    .bind(id.as_uuid())
    .bind(ledger.daily_rate.amount())
    .bind(ledger.total_billings.amount())
    .bind(ledger.remaining_balance.amount())
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Repository for reservation aggregates
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a new reservation with its guests
    pub async fn create(
        &self,
        reservation: &Reservation,
        guests: &[domain_reservation::Guest],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO reservations (id, code, booked_by, hostel_office_id, guest_office_id, \
             check_in_date, check_out_date, daily_rate, total_billings, remaining_balance, \
             currency, status, payment_type, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(reservation.id.as_uuid())
        .bind(&reservation.code)
        .bind(&reservation.booked_by)
        .bind(reservation.hostel_office_id.as_uuid())
        .bind(reservation.guest_office_id.as_uuid())
        .bind(reservation.stay.check_in())
        .bind(reservation.stay.check_out())
        .bind(reservation.ledger.daily_rate.amount())
        .bind(reservation.ledger.total_billings.amount())
        .bind(reservation.ledger.remaining_balance.amount())
        .bind(reservation.ledger.daily_rate.currency().code())
        .bind(status_as_str(reservation.status))
        .bind(match reservation.payment_type {
            PaymentType::PayNow => "pay_now",
            PaymentType::PayLater => "pay_later",
        })
        .bind(reservation.created_at)
        .bind(reservation.updated_at)
        .execute(&mut *tx)
        .await?;

        for guest in guests {
            sqlx::query(
                "INSERT INTO guests (id, reservation_id, display_name, gender, is_exempted) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(guest.id.as_uuid())
            .bind(guest.reservation_id.as_uuid())
            .bind(&guest.display_name)
            .bind(super::lodging::gender_as_str(guest.gender))
            .bind(guest.is_exempted)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(reservation = %reservation.id, code = %reservation.code, "reservation created");
        Ok(())
    }

    /// Fetches a reservation scoped to the acting office
    pub async fn get(
        &self,
        ctx: &ActorContext,
        id: ReservationId,
    ) -> Result<Reservation, StoreError> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations \
             WHERE id = $1 AND hostel_office_id = $2"
        );
        let row: Option<ReservationRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .bind(ctx.office_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        let row = row.ok_or_else(|| DatabaseError::not_found("Reservation", id))?;
        Ok(row.into_domain()?)
    }

    /// Public lookup by confirmation code, unscoped
    pub async fn find_by_code(&self, code: &str) -> Result<Option<Reservation>, StoreError> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE code = $1");
        let row: Option<ReservationRow> = sqlx::query_as(&sql)
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ReservationRow::into_domain)
            .transpose()
            .map_err(StoreError::from)
    }

    /// Lists non-pending reservations of the acting office
    ///
    /// Pending reservations have a dedicated waiting-list query.
    pub async fn list(
        &self,
        ctx: &ActorContext,
        query: &ReservationQuery,
    ) -> Result<Vec<Reservation>, StoreError> {
        self.list_inner(ctx, query, false).await
    }

    /// Lists the waiting list (pending reservations) of the acting office
    pub async fn waiting_list(
        &self,
        ctx: &ActorContext,
        query: &ReservationQuery,
    ) -> Result<Vec<Reservation>, StoreError> {
        self.list_inner(ctx, query, true).await
    }

    async fn list_inner(
        &self,
        ctx: &ActorContext,
        query: &ReservationQuery,
        pending_only: bool,
    ) -> Result<Vec<Reservation>, StoreError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE hostel_office_id = "
        ));
        qb.push_bind(ctx.office_id.as_uuid());

        if pending_only {
            qb.push(" AND status = 'pending'");
        } else {
            qb.push(" AND status <> 'pending'");
        }

        if let Some(search) = &query.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (booked_by ILIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR code ILIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }

        if let Some(status) = query.status {
            qb.push(" AND status = ");
            qb.push_bind(status_as_str(status));
        }

        match query.settled {
            Some(true) => {
                qb.push(" AND remaining_balance = 0");
            }
            Some(false) => {
                qb.push(" AND remaining_balance > 0");
            }
            None => {}
        }

        qb.push(" ORDER BY created_at DESC");
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(query.limit.unwrap_or(50)));
        qb.push(" OFFSET ");
        qb.push_bind(i64::from(query.offset.unwrap_or(0)));

        let rows: Vec<ReservationRow> = qb.build_query_as().fetch_all(&self.pool).await?;
        rows.into_iter()
            .map(|r| r.into_domain().map_err(StoreError::from))
            .collect()
    }

    /// Moves a reservation to a new status
    ///
    /// Checking in marks the held beds occupied; checking out frees them;
    /// canceling frees them and releases the holds so the beds become
    /// available to other reservations.
    pub async fn update_status(
        &self,
        ctx: &ActorContext,
        id: ReservationId,
        next: ReservationStatus,
    ) -> Result<Reservation, StoreError> {
        let mut tx = self.pool.begin().await?;

        let mut reservation = lock_reservation(&mut tx, ctx, id).await?;
        reservation.transition_to(next)?;

        sqlx::query("UPDATE reservations SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(id.as_uuid())
            .bind(status_as_str(next))
            .execute(&mut *tx)
            .await?;

        match next {
            ReservationStatus::CheckedIn => {
                sqlx::query(
                    "UPDATE beds SET status = 'occupied' WHERE id IN \
                     (SELECT bed_id FROM bed_holds WHERE reservation_id = $1)",
                )
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await?;
            }
            ReservationStatus::CheckedOut => {
                // Holds stay behind: their past range blocks nothing and the
                // ledger recompute still needs the guest-to-bed price linkage
                sqlx::query(
                    "UPDATE beds SET status = 'available' WHERE id IN \
                     (SELECT bed_id FROM bed_holds WHERE reservation_id = $1)",
                )
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await?;
            }
            ReservationStatus::Canceled => {
                // Cancellation releases the dates for other reservations
                sqlx::query(
                    "UPDATE beds SET status = 'available' WHERE id IN \
                     (SELECT bed_id FROM bed_holds WHERE reservation_id = $1)",
                )
                .bind(id.as_uuid())
                .execute(&mut *tx)
                .await?;
                sqlx::query("DELETE FROM bed_holds WHERE reservation_id = $1")
                    .bind(id.as_uuid())
                    .execute(&mut *tx)
                    .await?;
            }
            ReservationStatus::Pending => {}
        }

        tx.commit().await?;
        info!(reservation = %id, status = status_as_str(next), "reservation status updated");
        Ok(reservation)
    }

    /// Extends the stay to a later check-out date
    ///
    /// Recomputes the ledger from the stored daily rate against payments
    /// already received, and pushes the bed holds out to the new date. A
    /// hold collision with another reservation aborts the extension.
    pub async fn extend_stay(
        &self,
        ctx: &ActorContext,
        id: ReservationId,
        new_check_out: NaiveDate,
    ) -> Result<Reservation, StoreError> {
        let mut tx = self.pool.begin().await?;

        let mut reservation = lock_reservation(&mut tx, ctx, id).await?;
        let currency = reservation.ledger.daily_rate.currency();
        let paid = total_paid(&mut tx, *id.as_uuid(), currency).await?;

        reservation.extend_stay(new_check_out, paid)?;

        sqlx::query(
            "UPDATE reservations SET check_out_date = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(new_check_out)
        .execute(&mut *tx)
        .await?;

        store_ledger(&mut tx, id, &reservation.ledger).await?;

        // The GiST exclusion constraint on bed_holds rejects the extension
        // when another reservation already holds a bed past the old date.
        sqlx::query("UPDATE bed_holds SET check_out_date = $2 WHERE reservation_id = $1")
            .bind(id.as_uuid())
            .bind(new_check_out)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        info!(reservation = %id, check_out = %new_check_out, "stay extended");
        Ok(reservation)
    }

    /// Switches a reservation to pay-later
    pub async fn set_pay_later(
        &self,
        ctx: &ActorContext,
        id: ReservationId,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE reservations SET payment_type = 'pay_later', updated_at = NOW() \
             WHERE id = $1 AND hostel_office_id = $2",
        )
        .bind(id.as_uuid())
        .bind(ctx.office_id.as_uuid())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found("Reservation", id).into());
        }
        Ok(())
    }

    /// Recomputes a reservation's ledger from first principles
    ///
    /// The single recovery path when derived fields are suspected stale:
    /// reloads the non-exempted guests' bed prices and the payment total,
    /// reruns the derivation, and stores the result.
    pub async fn recompute_ledger(
        &self,
        ctx: &ActorContext,
        id: ReservationId,
    ) -> Result<LedgerProjection, StoreError> {
        let mut tx = self.pool.begin().await?;

        let reservation = lock_reservation(&mut tx, ctx, id).await?;
        let currency = reservation.ledger.daily_rate.currency();

        let prices: Vec<Decimal> = sqlx::query_scalar(
            "SELECT b.price FROM bed_holds h \
             JOIN beds b ON b.id = h.bed_id \
             JOIN guests g ON g.id = h.guest_id \
             WHERE h.reservation_id = $1 AND g.is_exempted = FALSE AND b.price IS NOT NULL",
        )
        .bind(id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;
        let prices: Vec<Money> = prices.into_iter().map(|p| Money::new(p, currency)).collect();

        let paid = total_paid(&mut tx, *id.as_uuid(), currency).await?;
        let ledger = LedgerProjection::recompute(&prices, &reservation.stay, paid)
            .map_err(domain_reservation::ReservationError::from)?;

        store_ledger(&mut tx, id, &ledger).await?;
        tx.commit().await?;

        Ok(ledger)
    }
}
