//! Session-related types for the admin console.

use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// Holds the backend-issued admin bearer token; there is no client-side
/// credential of any kind. Every admin action replays this token and the
/// backend authorizes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Username the token was issued to.
    pub username: String,
    /// The raw admin bearer token.
    pub token: String,
}

/// Session keys for admin data.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";
}
