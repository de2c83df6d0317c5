//! Infrastructure Database Layer
//!
//! This crate provides the database infrastructure for the hostel core
//! system, implementing the atomic units of the billing lifecycle on
//! PostgreSQL using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern, providing data access
//! abstractions that hide the database implementation details from the
//! domain layer. Each financial mutation (payment, exemption, bed
//! assignment) runs in a single transaction that locks the reservation row
//! with `SELECT ... FOR UPDATE` before validating, so concurrent requests
//! against the same reservation serialize instead of racing a stale balance.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PaymentRepository};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/hostel")).await?;
//! let payments = PaymentRepository::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::{DatabaseError, StoreError};
pub use repositories::{
    ExemptionRepository, LodgingRepository, PaymentRepository, ReservationRepository,
};
pub use adapters::PostgresReservationAdapter;
