//! Reservation Domain Ports
//!
//! This module defines the storage port for the reservation domain. The
//! domain itself stays free of sqlx; the infrastructure layer implements the
//! trait against PostgreSQL, and tests can substitute an in-memory fake.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_reservation::ports::ReservationPort;
//! use std::sync::Arc;
//!
//! pub struct ReservationService {
//!     store: Arc<dyn ReservationPort>,
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{ActorContext, DomainPort, GuestId, PortError, ReservationId};

use crate::exemption::PaymentExemption;
use crate::payment::{Payment, PaymentRequest};
use crate::reservation::{Reservation, ReservationStatus};

/// Query parameters for listing reservations
#[derive(Debug, Clone, Default)]
pub struct ReservationQuery {
    /// Case-insensitive match on booker name or confirmation code
    pub search: Option<String>,
    /// Filter by status
    pub status: Option<ReservationStatus>,
    /// Filter fully-settled (`Some(true)`) or still-owing (`Some(false)`)
    pub settled: Option<bool>,
    /// Limit results
    pub limit: Option<u32>,
    /// Offset for pagination
    pub offset: Option<u32>,
}

impl ReservationQuery {
    /// Creates a query matching a confirmation code or booker name
    pub fn by_search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

/// Storage operations the reservation domain needs
///
/// Implementations must make each mutating operation atomic: the payment row
/// and the balance update commit together or not at all, and the exemption
/// row, guest flag, and ledger update likewise.
#[async_trait]
pub trait ReservationPort: DomainPort {
    /// Fetches a reservation scoped to the actor's office
    async fn get_reservation(
        &self,
        ctx: &ActorContext,
        id: ReservationId,
    ) -> Result<Reservation, PortError>;

    /// Looks up a reservation by its public confirmation code
    async fn find_by_code(&self, code: &str) -> Result<Option<Reservation>, PortError>;

    /// Lists non-pending reservations of the actor's office
    async fn list_reservations(
        &self,
        ctx: &ActorContext,
        query: ReservationQuery,
    ) -> Result<Vec<Reservation>, PortError>;

    /// Lists the waiting list (pending reservations) of the actor's office
    async fn waiting_list(
        &self,
        ctx: &ActorContext,
        query: ReservationQuery,
    ) -> Result<Vec<Reservation>, PortError>;

    /// Records a payment and shrinks the balance in one atomic unit
    async fn record_payment(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
        request: PaymentRequest,
    ) -> Result<Payment, PortError>;

    /// Waives a guest's bed cost in one atomic unit
    async fn exempt_guest(
        &self,
        ctx: &ActorContext,
        reservation_id: ReservationId,
        guest_id: GuestId,
        reason: String,
    ) -> Result<PaymentExemption, PortError>;
}
