//! HTTP middleware stack for the marketplace.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions with in-memory store)
//! 4. Security headers (CSP loosened only for the Razorpay checkout)
//! 5. Rate limiting on the OTP endpoints (governor)

pub mod auth;
pub mod rate_limit;
pub mod security_headers;
pub mod session;

pub use auth::{
    OptionalAuth, RequireAuth, clear_session, force_logout, set_current_user,
};
pub use rate_limit::auth_rate_limiter;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
