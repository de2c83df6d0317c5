//! Reservation Domain - Stay Lifecycle and Billing
//!
//! This crate implements the financial heart of the hostel system: the rules
//! that keep a reservation's billing consistent as beds, payments, and
//! exemptions accrue over the stay.
//!
//! # Billing model
//!
//! A reservation's `{daily_rate, total_billings, remaining_balance}` triple
//! is stored for querying but entirely derived:
//!
//! - the daily rate is the sum of the nightly prices of all non-exempted
//!   guests' beds
//! - total billings are the daily rate times the length of stay in nights
//! - the remaining balance is total billings minus payments received,
//!   floored at zero
//!
//! Every mutation rebuilds the triple through [`ledger::LedgerProjection`] —
//! there is no inline balance arithmetic anywhere else.
//!
//! # Append-only audit rows
//!
//! [`payment::Payment`] and [`exemption::PaymentExemption`] are created once
//! and never mutated; the reservation's derived fields are the only mutable
//! financial state.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_reservation::{LedgerProjection, PaymentRequest};
//!
//! request.validate(&reservation)?;
//! let payment = request.into_payment(reservation.id);
//! let ledger = reservation.ledger.after_payment(payment.amount)?;
//! ```

pub mod reservation;
pub mod guest;
pub mod ledger;
pub mod payment;
pub mod exemption;
pub mod ports;
pub mod error;

pub use reservation::{Reservation, ReservationStatus, PaymentType};
pub use guest::Guest;
pub use ledger::LedgerProjection;
pub use payment::{Payment, PaymentMethod, PaymentRequest};
pub use exemption::{ExemptionOutcome, PaymentExemption, prepare_exemption};
pub use ports::{ReservationPort, ReservationQuery};
pub use error::ReservationError;
