//! Typed shapes for the admin REST surface.
//!
//! Entity shapes live in `onlylands-core`; these are the admin-specific
//! envelopes and request bodies.

use onlylands_core::{Broker, Listing, ListingStatus, PaymentRecord, User};
use serde::{Deserialize, Serialize};

/// `POST /api/admin/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminLoginResponse {
    pub message: String,
    pub token: String,
}

/// `GET /api/admin/stats` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_listings: u64,
    #[serde(default)]
    pub active_listings: u64,
    #[serde(default)]
    pub pending_listings: u64,
    #[serde(default)]
    pub total_brokers: u64,
    #[serde(default)]
    pub total_payments: u64,
    #[serde(default)]
    pub completed_payments: u64,
}

/// `GET /api/admin/users` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct UsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
}

/// `GET /api/admin/listings` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingsResponse {
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// `GET /api/admin/brokers` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokersResponse {
    #[serde(default)]
    pub brokers: Vec<Broker>,
}

/// `GET /api/admin/payments` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentsResponse {
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

/// Generic `{"message": ...}` response for mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// `PUT /api/admin/update-listing/{id}` request body.
///
/// The backend drops immutable keys itself; this only ever sends the
/// editable fields.
#[derive(Debug, Clone, Serialize)]
pub struct AdminListingUpdate {
    pub title: String,
    pub location: String,
    pub area: String,
    pub price: String,
    pub description: String,
    pub status: ListingStatus,
}
