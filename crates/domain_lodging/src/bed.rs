//! Bed inventory

use serde::{Deserialize, Serialize};

use core_kernel::{BedId, Money, RoomId};

/// Bed lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BedStatus {
    /// Open for assignment
    Available,
    /// Held by a pending reservation
    Reserved,
    /// A checked-in guest is sleeping in it
    Occupied,
    /// Out of service, never assignable
    Maintenance,
}

impl BedStatus {
    /// Returns true if the bed can take new holds
    pub fn is_assignable(&self) -> bool {
        !matches!(self, BedStatus::Maintenance)
    }
}

/// A bed within a room
///
/// The nightly price is optional: newly encoded inventory may not be priced
/// yet, and an unpriced bed contributes nothing to a reservation's daily
/// rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bed {
    /// Unique identifier
    pub id: BedId,
    /// Room this bed belongs to
    pub room_id: RoomId,
    /// Display name (e.g., "A-1")
    pub name: String,
    /// Nightly price, if set
    pub price: Option<Money>,
    /// Current status
    pub status: BedStatus,
}

impl Bed {
    /// Creates a new available bed
    pub fn new(room_id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id: BedId::new_v7(),
            room_id,
            name: name.into(),
            price: None,
            status: BedStatus::Available,
        }
    }

    /// Sets the nightly price
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the status
    pub fn with_status(mut self, status: BedStatus) -> Self {
        self.status = status;
        self
    }
}
