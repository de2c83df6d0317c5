//! Core Kernel - Foundational types and utilities for the hostel system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic
//! - Temporal types for stay scheduling
//! - Common identifiers and value objects
//! - The explicit actor context threaded through every core operation

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod context;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{StayPeriod, Timezone, TemporalError};
pub use identifiers::{
    ReservationId, GuestId, PaymentId, ExemptionId,
    RoomId, BedId, BedHoldId, OfficeId, UserId,
};
pub use context::ActorContext;
pub use error::CoreError;
pub use ports::{DomainPort, PortError};
