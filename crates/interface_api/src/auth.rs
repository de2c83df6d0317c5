//! Authentication and authorization
//!
//! Tokens carry the acting user and the hostel office they administer. The
//! office id becomes part of the [`ActorContext`] threaded into every
//! repository call, so office scoping is enforced by construction rather
//! than read from ambient session state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use core_kernel::ActorContext;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Hostel office the user administers
    pub office_id: Uuid,
    /// User's roles
    pub roles: Vec<String>,
    /// Expiration timestamp
    pub exp: i64,
    /// Issued at timestamp
    pub iat: i64,
}

impl Claims {
    /// Builds the actor context repositories expect
    pub fn actor_context(&self) -> ActorContext {
        ActorContext::new(self.sub.into(), self.office_id.into())
    }
}

/// Auth errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Missing permission: {0}")]
    MissingPermission(String),
}

/// Creates a new JWT token
///
/// # Arguments
///
/// * `user_id` - User identifier
/// * `office_id` - Hostel office the user administers
/// * `roles` - User's roles
/// * `secret` - JWT secret key
/// * `expiration_secs` - Token validity in seconds
pub fn create_token(
    user_id: Uuid,
    office_id: Uuid,
    roles: Vec<String>,
    secret: &str,
    expiration_secs: u64,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(expiration_secs as i64);

    let claims = Claims {
        sub: user_id,
        office_id,
        roles,
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Validates a JWT token
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            AuthError::TokenExpired
        } else {
            AuthError::InvalidToken
        }
    })?;

    Ok(token_data.claims)
}

/// Checks if user has required role
pub fn has_role(claims: &Claims, required_role: &str) -> bool {
    claims.roles.iter().any(|r| r == required_role || r == "super_admin")
}

/// Permission definitions
pub mod permissions {
    pub const RESERVATION_READ: &str = "reservation:read";
    pub const RESERVATION_WRITE: &str = "reservation:write";
    pub const PAYMENT_WRITE: &str = "payment:write";
    pub const EXEMPTION_GRANT: &str = "exemption:grant";
    pub const ROOM_READ: &str = "room:read";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let user = Uuid::new_v4();
        let office = Uuid::new_v4();
        let token = create_token(user, office, vec!["admin".into()], "secret", 3600).unwrap();

        let claims = validate_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, user);
        assert_eq!(claims.office_id, office);

        let ctx = claims.actor_context();
        assert_eq!(ctx.user_id.as_uuid(), &user);
        assert_eq!(ctx.office_id.as_uuid(), &office);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(Uuid::new_v4(), Uuid::new_v4(), vec![], "secret", 3600).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret"),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_super_admin_has_every_role() {
        let claims = Claims {
            sub: Uuid::new_v4(),
            office_id: Uuid::new_v4(),
            roles: vec!["super_admin".to_string()],
            exp: 0,
            iat: 0,
        };
        assert!(has_role(&claims, permissions::EXEMPTION_GRANT));
    }
}
