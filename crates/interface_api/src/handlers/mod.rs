//! Request handlers

pub mod reservation;
pub mod payment;
pub mod lodging;
pub mod health;
