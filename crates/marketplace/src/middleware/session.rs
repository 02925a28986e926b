//! Session middleware configuration.
//!
//! The session store is this client's analog of the browser's local
//! storage: the bearer token, the post-land draft, the media staging id,
//! and the in-flight payment order all live here. The backend owns every
//! durable record, so the bundled in-memory store suffices.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::MarketplaceConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ol_session";

/// Session expiry time in seconds (24 hours, matching backend token expiry).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(config: &MarketplaceConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
