//! Acting-user context
//!
//! Every core operation receives the authenticated actor explicitly instead
//! of reading it from ambient session state. The context carries the user and
//! the hostel office the user administers; repositories use the office to
//! scope every query.

use serde::{Deserialize, Serialize};

use crate::identifiers::{OfficeId, UserId};

/// The authenticated actor performing an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorContext {
    /// The acting user
    pub user_id: UserId,
    /// The hostel office the user administers
    pub office_id: OfficeId,
}

impl ActorContext {
    /// Creates a new actor context
    pub fn new(user_id: UserId, office_id: OfficeId) -> Self {
        Self { user_id, office_id }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_round_trips_through_serde() {
        let ctx = ActorContext::new(UserId::new(), OfficeId::new());
        let json = serde_json::to_string(&ctx).unwrap();
        let back: ActorContext = serde_json::from_str(&json).unwrap();
        assert_eq!(ctx, back);
    }
}
