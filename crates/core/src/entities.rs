//! Entity shapes consumed from the backend.
//!
//! These are plain data transfer shapes: the backend owns and mutates
//! them, the client binaries render them. The backend grew organically
//! (Mongo documents serialized as-is), so optional fields default rather
//! than fail and timestamps stay strings.

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::{
    BrokerId, ListingId, ListingStatus, MediaRef, PaymentStatus, UserId, UserType,
};

/// User record as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub phone_number: String,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A land listing as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub listing_id: ListingId,
    #[serde(default)]
    pub seller_id: Option<UserId>,
    pub title: String,
    #[serde(default)]
    pub location: String,
    pub area: String,
    /// Free text, e.g. "50 Lakhs" or "500000".
    pub price: String,
    pub description: String,
    #[serde(default)]
    pub google_maps_link: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub photos: Vec<MediaRef>,
    #[serde(default)]
    pub videos: Vec<MediaRef>,
    #[serde(default)]
    pub status: ListingStatus,
    /// Owner contact, surfaced in broker leads.
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Broker record as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    #[serde(default)]
    pub broker_id: Option<BrokerId>,
    pub name: String,
    #[serde(default)]
    pub agency: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    /// Older records hold one location string, newer ones a list.
    #[serde(default, deserialize_with = "string_or_seq")]
    pub location: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Payment record as returned by the backend (admin console).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    #[serde(default)]
    pub razorpay_order_id: Option<String>,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub listing_id: Option<ListingId>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Amount in paise.
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub demo_mode: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Accept either a single string or a list of strings.
fn string_or_seq<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrSeq {
        One(String),
        Many(Vec<String>),
    }

    Ok(match StringOrSeq::deserialize(deserializer)? {
        StringOrSeq::One(s) => vec![s],
        StringOrSeq::Many(v) => v,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserializes_with_sparse_fields() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "listing_id": "8d2c7e6a-6a1f-4b40-9f9d-0c6f1d3a9e21",
                "title": "5 Acre Plot",
                "area": "5 Acres",
                "price": "500000",
                "description": "Flat land"
            }"#,
        )
        .unwrap();

        assert_eq!(listing.status, ListingStatus::PendingPayment);
        assert!(listing.photos.is_empty());
        assert_eq!(listing.location, "");
    }

    #[test]
    fn test_listing_deserializes_mixed_media_shapes() {
        let listing: Listing = serde_json::from_str(
            r#"{
                "listing_id": "l-1",
                "title": "Coastal plot",
                "area": "2 Acres",
                "price": "80 Lakhs",
                "description": "Near the beach",
                "status": "active",
                "photos": [
                    "https://bucket.s3.amazonaws.com/photos/a.jpg",
                    {"s3_url": "https://bucket.s3.amazonaws.com/photos/b.jpg"},
                    {"content_type": "image/png", "data": "aGVsbG8="}
                ]
            }"#,
        )
        .unwrap();

        let srcs: Vec<String> = listing.photos.iter().map(MediaRef::src).collect();
        assert_eq!(srcs.len(), 3);
        assert!(srcs[2].starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_broker_location_accepts_string_and_list() {
        let one: Broker = serde_json::from_str(
            r#"{"name": "A", "phone_number": "+919876543210", "location": "Mumbai"}"#,
        )
        .unwrap();
        assert_eq!(one.location, vec!["Mumbai"]);

        let many: Broker = serde_json::from_str(
            r#"{"name": "B", "phone_number": "+919876543210", "location": ["Pune", "Nagpur"]}"#,
        )
        .unwrap();
        assert_eq!(many.location, vec!["Pune", "Nagpur"]);
    }

    #[test]
    fn test_payment_record_defaults() {
        let payment: PaymentRecord = serde_json::from_str(
            r#"{"razorpay_order_id": "order_demo_1", "amount": 29900, "currency": "INR", "status": "completed", "demo_mode": true}"#,
        )
        .unwrap();

        assert_eq!(payment.status, PaymentStatus::Completed);
        assert!(payment.demo_mode);
        assert!(payment.listing_id.is_none());
    }
}
