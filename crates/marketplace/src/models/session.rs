//! Session-related types.
//!
//! The session is the single home for auth state: nothing else in the
//! crate reads or writes the bearer token directly.

use onlylands_core::{TokenClaims, UserId, UserType};
use serde::{Deserialize, Serialize};

/// Session-stored user identity.
///
/// Decoded from the backend bearer token at login; the token itself rides
/// along so authenticated screens can replay it to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Backend user id.
    pub user_id: UserId,
    /// Role the token was issued for.
    pub user_type: UserType,
    /// Phone number the OTP was verified against.
    pub phone_number: String,
    /// The raw bearer token for backend calls.
    pub token: String,
}

impl CurrentUser {
    /// Build the session user from decoded token claims.
    #[must_use]
    pub fn from_claims(claims: TokenClaims, token: String) -> Self {
        Self {
            user_id: claims.user_id,
            user_type: claims.user_type,
            phone_number: claims.phone_number,
            token,
        }
    }

    #[must_use]
    pub const fn is_seller(&self) -> bool {
        matches!(self.user_type, UserType::Seller)
    }

    #[must_use]
    pub const fn is_broker(&self) -> bool {
        matches!(self.user_type, UserType::Broker)
    }
}

/// Session keys for marketplace data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for whether a logged-in broker has a server-side profile.
    pub const BROKER_REGISTERED: &str = "broker_registered";

    /// Key for the persisted post-land draft.
    pub const POST_LAND_DRAFT: &str = "post_land_draft";

    /// Key for the media staging id.
    pub const MEDIA_STAGING_ID: &str = "media_staging_id";

    /// Key for the in-flight payment order.
    pub const PENDING_PAYMENT: &str = "pending_payment";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_from_claims() {
        let claims = TokenClaims {
            user_id: UserId::new("u-1"),
            phone_number: "+917021758061".to_string(),
            user_type: UserType::Broker,
            exp: None,
        };

        let user = CurrentUser::from_claims(claims, "a.b.c".to_string());
        assert!(user.is_broker());
        assert!(!user.is_seller());
        assert_eq!(user.token, "a.b.c");
    }
}
