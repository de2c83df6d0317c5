//! Request/response data transfer objects

pub mod reservation;
pub mod payment;
pub mod lodging;
