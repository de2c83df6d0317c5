//! Room inventory

use serde::{Deserialize, Serialize};

use core_kernel::{OfficeId, RoomId};

/// Guest gender, also used for room eligibility
///
/// `Any` only appears on rooms; guests are recorded as male or female.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Any,
    Male,
    Female,
}

impl Gender {
    /// Returns true if a guest of the given gender may occupy a room with
    /// this eligibility
    pub fn admits(&self, guest: Gender) -> bool {
        matches!(self, Gender::Any) || *self == guest
    }
}

/// A room within a hostel office
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: RoomId,
    /// Owning hostel office
    pub office_id: OfficeId,
    /// Display name (e.g., "Room 204")
    pub name: String,
    /// Which guests the room currently admits
    pub eligible_gender: Gender,
}

impl Room {
    /// Creates a new room admitting any guest
    pub fn new(office_id: OfficeId, name: impl Into<String>) -> Self {
        Self {
            id: RoomId::new_v7(),
            office_id,
            name: name.into(),
            eligible_gender: Gender::Any,
        }
    }

    /// Restricts the room to a gender
    pub fn with_eligible_gender(mut self, gender: Gender) -> Self {
        self.eligible_gender = gender;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_room_admits_everyone() {
        assert!(Gender::Any.admits(Gender::Male));
        assert!(Gender::Any.admits(Gender::Female));
    }

    #[test]
    fn test_restricted_room_admits_matching_gender_only() {
        assert!(Gender::Female.admits(Gender::Female));
        assert!(!Gender::Female.admits(Gender::Male));
    }

    #[test]
    fn test_room_builder() {
        let office = OfficeId::new();
        let room = Room::new(office, "Room 204").with_eligible_gender(Gender::Male);

        assert_eq!(room.office_id, office);
        assert_eq!(room.name, "Room 204");
        assert_eq!(room.eligible_gender, Gender::Male);
    }
}
