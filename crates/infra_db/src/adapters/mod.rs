//! Port adapters
//!
//! Implementations of the domain-defined port traits on top of the
//! PostgreSQL repositories.

pub mod reservation;

pub use reservation::PostgresReservationAdapter;
