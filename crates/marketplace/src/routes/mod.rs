//! HTTP route handlers for the marketplace.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                        - Home page
//! GET  /admin                   - Redirect to the admin console
//!
//! # Auth
//! GET  /login                   - Login-type chooser (seller / broker)
//! GET  /login/{role}            - Phone entry form
//! POST /auth/send-otp           - Send OTP (rate limited)
//! POST /auth/verify-otp         - Verify OTP, log in (rate limited)
//! POST /auth/logout             - Logout
//!
//! # Listings
//! GET  /listings                - Public grid with client-side filters
//! GET  /listings/{id}           - Listing detail
//! GET  /my-listings             - Seller's own listings (requires auth)
//!
//! # Post land (requires seller auth)
//! GET  /post-land               - Form, prefilled from the session draft
//! POST /post-land               - Submit listing (multipart to backend)
//! POST /post-land/draft         - Autosave draft fields
//! POST /post-land/media/{kind}  - Stage a batch of files
//! GET  /post-land/media/{kind}/{index}        - Preview a staged file
//! POST /post-land/media/{kind}/{index}/remove - Unstage one file
//!
//! # Payment (requires auth)
//! GET  /pay/{listing_id}        - Listing fee summary
//! POST /pay/{listing_id}/order  - Create payment order
//! POST /pay/demo/complete       - Simulated checkout completion
//! POST /pay/verify              - Verify gateway identifiers
//!
//! # Broker
//! GET  /broker/register         - Registration form
//! POST /broker/register         - Register broker
//! GET  /broker/dashboard        - Leads list (requires broker auth)
//! ```

pub mod auth;
pub mod broker;
pub mod home;
pub mod listings;
pub mod payment;
pub mod post_land;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::middleware::rate_limit;
use crate::state::AppState;

/// Largest accepted media batch (two videos at 50MB each, plus slack).
const MEDIA_BODY_LIMIT: usize = 120 * 1024 * 1024;

/// Create the auth action routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/send-otp", post(auth::send_otp))
        .route("/verify-otp", post(auth::verify_otp))
        .layer(rate_limit::auth_rate_limiter())
        .route("/logout", post(auth::logout))
}

/// Create the public listing routes router.
pub fn listing_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(listings::index))
        .route("/{id}", get(listings::show))
}

/// Create the post-land routes router.
pub fn post_land_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(post_land::form).post(post_land::submit))
        .route("/draft", post(post_land::save_draft))
        .route("/media/{kind}", post(post_land::add_media))
        .route("/media/{kind}/{index}", get(post_land::preview_media))
        .route(
            "/media/{kind}/{index}/remove",
            post(post_land::remove_media),
        )
        .layer(DefaultBodyLimit::max(MEDIA_BODY_LIMIT))
}

/// Create the payment routes router.
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/demo/complete", post(payment::demo_complete))
        .route("/verify", post(payment::verify))
        .route("/{listing_id}", get(payment::summary))
        .route("/{listing_id}/order", post(payment::create_order))
}

/// Create the broker routes router.
pub fn broker_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            get(broker::register_form).post(broker::register),
        )
        .route("/dashboard", get(broker::dashboard))
}

/// Create all routes for the marketplace.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // The one special-cased path: always leads to the admin console
        .route("/admin", get(home::admin_redirect))
        // Login screens
        .route("/login", get(auth::login_choice))
        .route("/login/{role}", get(auth::login_form))
        // Auth actions
        .nest("/auth", auth_routes())
        // Listings
        .nest("/listings", listing_routes())
        .route("/my-listings", get(listings::my_listings))
        // Post land
        .nest("/post-land", post_land_routes())
        // Payment flow
        .nest("/pay", payment_routes())
        // Broker screens
        .nest("/broker", broker_routes())
}
