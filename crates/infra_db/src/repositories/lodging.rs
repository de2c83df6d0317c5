//! Lodging repository implementation
//!
//! Provides bed availability queries and the bed-assignment transaction for
//! the waiting-list workflow. Assignment is the double-booking chokepoint:
//! the candidate bed rows are locked, availability is re-checked against
//! committed holds, and a GiST exclusion constraint on `bed_holds` backs the
//! whole thing up at the storage level.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use core_kernel::{ActorContext, BedHoldId, BedId, GuestId, Money, ReservationId, StayPeriod};
use domain_lodging::availability::ensure_all_free;
use domain_lodging::{Bed, BedHold, BedStatus, Gender};
use domain_reservation::Reservation;

use crate::error::{DatabaseError, StoreError};
use super::reservation::{lock_reservation, store_ledger, total_paid};

/// Database row for a bed with its room's office
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BedRow {
    pub id: Uuid,
    pub room_id: Uuid,
    pub name: String,
    pub price: Option<Decimal>,
    pub status: String,
    pub office_id: Uuid,
    pub room_name: String,
}

impl BedRow {
    pub fn into_domain(self, currency: core_kernel::Currency) -> Result<Bed, DatabaseError> {
        Ok(Bed {
            id: BedId::from(self.id),
            room_id: self.room_id.into(),
            name: self.name,
            price: self.price.map(|p| Money::new(p, currency)),
            status: bed_status_from_str(&self.status)?,
        })
    }
}

/// Database row for a bed hold
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BedHoldRow {
    pub id: Uuid,
    pub bed_id: Uuid,
    pub guest_id: Uuid,
    pub reservation_id: Uuid,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

impl BedHoldRow {
    pub fn into_domain(self) -> Result<BedHold, DatabaseError> {
        let stay = StayPeriod::new(self.check_in_date, self.check_out_date).map_err(|e| {
            DatabaseError::SerializationError(format!("bed hold {}: {}", self.id, e))
        })?;
        Ok(BedHold {
            id: BedHoldId::from(self.id),
            bed_id: BedId::from(self.bed_id),
            guest_id: GuestId::from(self.guest_id),
            reservation_id: ReservationId::from(self.reservation_id),
            stay,
        })
    }
}

pub(crate) fn bed_status_from_str(status: &str) -> Result<BedStatus, DatabaseError> {
    match status {
        "available" => Ok(BedStatus::Available),
        "reserved" => Ok(BedStatus::Reserved),
        "occupied" => Ok(BedStatus::Occupied),
        "maintenance" => Ok(BedStatus::Maintenance),
        other => Err(DatabaseError::SerializationError(format!(
            "unknown bed status '{}'",
            other
        ))),
    }
}

pub(crate) fn gender_from_str(gender: &str) -> Result<Gender, DatabaseError> {
    match gender {
        "any" => Ok(Gender::Any),
        "male" => Ok(Gender::Male),
        "female" => Ok(Gender::Female),
        other => Err(DatabaseError::SerializationError(format!(
            "unknown gender '{}'",
            other
        ))),
    }
}

pub(crate) fn gender_as_str(gender: Gender) -> &'static str {
    match gender {
        Gender::Any => "any",
        Gender::Male => "male",
        Gender::Female => "female",
    }
}

/// A requested guest-to-bed pairing for assignment
#[derive(Debug, Clone, Copy)]
pub struct BedAssignment {
    pub guest_id: GuestId,
    pub bed_id: BedId,
}

/// Repository for rooms, beds, and holds
#[derive(Debug, Clone)]
pub struct LodgingRepository {
    pool: PgPool,
}

impl LodgingRepository {
    /// Creates a new LodgingRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Lists the beds of the acting office free for `[check_in, check_out)`
    ///
    /// A bed qualifies when its room belongs to the office, it is not under
    /// maintenance, and no hold overlaps the requested range. Holds only
    /// exist for non-canceled reservations; cancellation deletes them.
    pub async fn available_beds(
        &self,
        ctx: &ActorContext,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<BedRow>, StoreError> {
        let rows: Vec<BedRow> = sqlx::query_as(
            "SELECT b.id, b.room_id, b.name, b.price, b.status, \
                    r.office_id, r.name AS room_name \
             FROM beds b \
             JOIN rooms r ON r.id = b.room_id \
             WHERE r.office_id = $1 \
               AND b.status <> 'maintenance' \
               AND NOT EXISTS ( \
                   SELECT 1 FROM bed_holds h \
                   WHERE h.bed_id = b.id \
                     AND h.check_in_date < $3 \
                     AND $2 < h.check_out_date) \
             ORDER BY r.name, b.name",
        )
        .bind(ctx.office_id.as_uuid())
        .bind(check_in)
        .bind(check_out)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Assigns beds to a pending reservation's guests
    ///
    /// Inside one transaction: lock the reservation, lock the requested bed
    /// rows, re-check availability against committed holds, insert the
    /// holds, mark the beds reserved, and derive the reservation's initial
    /// ledger from the assigned bed prices. Any conflict aborts everything;
    /// the exclusion constraint catches whatever a concurrent transaction
    /// might sneak past the re-check.
    pub async fn assign_beds(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
        assignments: &[BedAssignment],
    ) -> Result<Reservation, StoreError> {
        let mut tx = self.pool.begin().await?;

        let mut reservation = lock_reservation(&mut tx, ctx, reservation_id).await?;
        let currency = reservation.ledger.daily_rate.currency();
        let stay = reservation.stay;

        let bed_ids: Vec<Uuid> = assignments.iter().map(|a| *a.bed_id.as_uuid()).collect();

        // Lock the candidate beds so a concurrent assignment serializes here
        let bed_rows: Vec<BedRow> = sqlx::query_as(
            "SELECT b.id, b.room_id, b.name, b.price, b.status, \
                    r.office_id, r.name AS room_name \
             FROM beds b \
             JOIN rooms r ON r.id = b.room_id \
             WHERE b.id = ANY($1) AND r.office_id = $2 \
             FOR UPDATE OF b",
        )
        .bind(&bed_ids)
        .bind(ctx.office_id.as_uuid())
        .fetch_all(&mut *tx)
        .await?;

        let beds: Vec<Bed> = bed_rows
            .into_iter()
            .map(|row| row.into_domain(currency))
            .collect::<Result<_, _>>()?;

        let hold_rows: Vec<BedHoldRow> = sqlx::query_as(
            "SELECT id, bed_id, guest_id, reservation_id, check_in_date, check_out_date \
             FROM bed_holds WHERE bed_id = ANY($1)",
        )
        .bind(&bed_ids)
        .fetch_all(&mut *tx)
        .await?;
        let holds: Vec<BedHold> = hold_rows
            .into_iter()
            .map(BedHoldRow::into_domain)
            .collect::<Result<_, _>>()?;

        let requested: Vec<BedId> = assignments.iter().map(|a| a.bed_id).collect();
        ensure_all_free(&requested, &beds, &holds, &stay)?;

        for assignment in assignments {
            let hold = BedHold::new(assignment.bed_id, assignment.guest_id, reservation_id, stay);
            sqlx::query(
                "INSERT INTO bed_holds (id, bed_id, guest_id, reservation_id, \
                 check_in_date, check_out_date) VALUES ($1, $2, $3, $4, $5, $6)",
            )
            .bind(hold.id.as_uuid())
            .bind(hold.bed_id.as_uuid())
            .bind(hold.guest_id.as_uuid())
            .bind(hold.reservation_id.as_uuid())
            .bind(stay.check_in())
            .bind(stay.check_out())
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("UPDATE beds SET status = 'reserved' WHERE id = ANY($1)")
            .bind(&bed_ids)
            .execute(&mut *tx)
            .await?;

        let prices: Vec<Money> = beds.iter().filter_map(|b| b.price).collect();
        let paid = total_paid(&mut tx, *reservation_id.as_uuid(), currency).await?;
        reservation.apply_bed_assignment(&prices, paid)?;

        store_ledger(&mut tx, reservation_id, &reservation.ledger).await?;

        tx.commit().await?;

        info!(
            reservation = %reservation_id,
            beds = assignments.len(),
            daily_rate = %reservation.ledger.daily_rate,
            "beds assigned"
        );
        Ok(reservation)
    }
}
