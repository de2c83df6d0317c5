//! PostgreSQL adapter for the reservation storage port
//!
//! Bridges `domain_reservation::ports::ReservationPort` onto the concrete
//! repositories, translating store errors into the port's unified error
//! type so domain consumers never see sqlx.

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{ActorContext, DomainPort, GuestId, PortError, ReservationId};
use domain_reservation::{
    Payment, PaymentExemption, PaymentRequest, Reservation, ReservationPort, ReservationQuery,
};

use crate::error::StoreError;
use crate::repositories::{ExemptionRepository, PaymentRepository, ReservationRepository};

/// The production implementation of [`ReservationPort`]
#[derive(Debug, Clone)]
pub struct PostgresReservationAdapter {
    reservations: ReservationRepository,
    payments: PaymentRepository,
    exemptions: ExemptionRepository,
}

impl PostgresReservationAdapter {
    /// Creates an adapter over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            reservations: ReservationRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            exemptions: ExemptionRepository::new(pool),
        }
    }
}

/// Translates store errors into port errors
///
/// Not-found cases are handled per call site where the entity and id are
/// known; everything else funnels through here.
fn map_store_error(err: StoreError) -> PortError {
    match err {
        StoreError::Domain(e) if e.is_validation() => PortError::Validation {
            message: e.to_string(),
            field: e.field().map(String::from),
        },
        StoreError::Domain(e) => PortError::conflict(e.to_string()),
        StoreError::Lodging(e) => PortError::conflict(e.to_string()),
        StoreError::Database(db) if db.is_constraint_violation() => {
            PortError::conflict(db.to_string())
        }
        StoreError::Database(db) => PortError::Internal {
            message: db.to_string(),
            source: None,
        },
    }
}

impl DomainPort for PostgresReservationAdapter {}

#[async_trait]
impl ReservationPort for PostgresReservationAdapter {
    async fn get_reservation(
        &self,
        ctx: &ActorContext,
        id: ReservationId,
    ) -> Result<Reservation, PortError> {
        self.reservations.get(ctx, id).await.map_err(|e| match e {
            StoreError::Database(db) if db.is_not_found() => {
                PortError::not_found("Reservation", id)
            }
            other => map_store_error(other),
        })
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Reservation>, PortError> {
        self.reservations
            .find_by_code(code)
            .await
            .map_err(map_store_error)
    }

    async fn list_reservations(
        &self,
        ctx: &ActorContext,
        query: ReservationQuery,
    ) -> Result<Vec<Reservation>, PortError> {
        self.reservations
            .list(ctx, &query)
            .await
            .map_err(map_store_error)
    }

    async fn waiting_list(
        &self,
        ctx: &ActorContext,
        query: ReservationQuery,
    ) -> Result<Vec<Reservation>, PortError> {
        self.reservations
            .waiting_list(ctx, &query)
            .await
            .map_err(map_store_error)
    }

    async fn record_payment(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
        request: PaymentRequest,
    ) -> Result<Payment, PortError> {
        self.payments
            .record_payment(ctx, reservation_id, request)
            .await
            .map_err(|e| match e {
                StoreError::Database(db) if db.is_not_found() => {
                    PortError::not_found("Reservation", reservation_id)
                }
                other => map_store_error(other),
            })
    }

    async fn exempt_guest(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
        guest_id: GuestId,
        reason: String,
    ) -> Result<PaymentExemption, PortError> {
        self.exemptions
            .exempt_guest(ctx, reservation_id, guest_id, reason)
            .await
            .map_err(|e| match e {
                StoreError::Database(db) if db.is_not_found() => {
                    PortError::not_found("Reservation or guest", reservation_id)
                }
                other => map_store_error(other),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatabaseError;
    use domain_reservation::ReservationError;

    #[test]
    fn test_validation_failures_carry_the_field() {
        let err: StoreError = ReservationError::NonPositiveAmount.into();
        match map_store_error(err) {
            PortError::Validation { field, .. } => assert_eq!(field.as_deref(), Some("amount")),
            other => panic!("Expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_invariant_failures_become_conflicts() {
        let err: StoreError = ReservationError::AlreadyExempted.into();
        assert!(map_store_error(err).is_conflict());
    }

    #[test]
    fn test_duplicate_receipt_becomes_conflict() {
        let err: StoreError = DatabaseError::duplicate("Payment", "or_number", "OR-1").into();
        assert!(map_store_error(err).is_conflict());
    }

    #[test]
    fn test_storage_failures_stay_internal() {
        let err: StoreError = DatabaseError::TransactionFailed("connection reset".into()).into();
        assert!(matches!(map_store_error(err), PortError::Internal { .. }));
    }
}
