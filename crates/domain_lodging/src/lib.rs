//! Lodging Domain - Rooms, Beds, and Availability
//!
//! This crate owns the physical inventory of the hostel network and the
//! rules that keep it from being double-booked:
//!
//! - Rooms belong to a hostel office and may restrict guest gender
//! - Beds belong to rooms, carry an optional nightly price, and move through
//!   a small status lifecycle
//! - A bed hold ties a guest and bed to a reservation for a stay range; two
//!   holds on the same bed must never overlap
//!
//! The availability engine answers "which beds are free for this stay" and
//! is the authority consulted before any hold is written.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_lodging::{availability, Bed, BedHold};
//!
//! let free = availability::free_beds(&beds, &active_holds, &stay);
//! ```

pub mod room;
pub mod bed;
pub mod hold;
pub mod availability;
pub mod error;

pub use room::{Room, Gender};
pub use bed::{Bed, BedStatus};
pub use hold::BedHold;
pub use error::LodgingError;
