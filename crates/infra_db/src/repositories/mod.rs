//! Repository implementations
//!
//! One repository per aggregate area:
//! - `reservation`: the aggregate itself, status transitions, extension,
//!   ledger recomputation
//! - `payment`: the atomic payment unit and history
//! - `exemption`: the atomic waiver unit and exemption listings
//! - `lodging`: bed availability and the assignment transaction

pub mod reservation;
pub mod payment;
pub mod exemption;
pub mod lodging;

pub use reservation::{ReservationRepository, ReservationRow};
pub use payment::{PaymentRepository, PaymentRow};
pub use exemption::{ExemptionRepository, ExemptionRow, GuestRow};
pub use lodging::{BedAssignment, BedHoldRow, BedRow, LodgingRepository};
