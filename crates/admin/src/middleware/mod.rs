//! HTTP middleware stack for the admin console.

pub mod auth;
pub mod session;

pub use auth::{RequireAdminAuth, clear_session, force_logout, set_current_admin};
pub use session::create_session_layer;
