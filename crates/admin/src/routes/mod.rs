//! HTTP route handlers for the admin console.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Dashboard (stats + recent activity)
//! GET  /auth/login             - Login page
//! POST /auth/login             - Exchange credentials for an admin token
//! POST /auth/logout            - Logout
//!
//! # Data tables (admin-token auth, enforced by the backend)
//! GET  /users                  - All users
//! GET  /listings               - All listings (with edit/delete actions)
//! GET  /listings/{id}/edit     - Listing edit form
//! POST /listings/{id}          - Update listing
//! POST /listings/{id}/delete   - Delete listing
//! GET  /brokers                - All brokers
//! GET  /payments               - All payments
//! ```

pub mod auth;
pub mod brokers;
pub mod dashboard;
pub mod listings;
pub mod payments;
pub mod users;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    routing::{get, post},
};

use crate::components::{TableColumn, TableRow};
use crate::state::AppState;

/// Shared data-table page template.
///
/// All four collection pages render through this: routes turn backend
/// records into string cells and the template does the rest.
#[derive(Template, WebTemplate)]
#[template(path = "table.html")]
pub struct TableTemplate {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
    pub with_actions: bool,
    pub error: Option<String>,
}

impl TableTemplate {
    fn new(title: &str, columns: Vec<TableColumn>) -> Self {
        Self {
            title: title.to_string(),
            columns,
            rows: Vec::new(),
            with_actions: false,
            error: None,
        }
    }
}

/// Create all routes for the admin console.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::dashboard))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/users", get(users::index))
        .route("/listings", get(listings::index))
        .route("/listings/{id}/edit", get(listings::edit_form))
        .route("/listings/{id}", post(listings::update))
        .route("/listings/{id}/delete", post(listings::delete))
        .route("/brokers", get(brokers::index))
        .route("/payments", get(payments::index))
}
