//! Typed shapes for the backend REST surface.
//!
//! Entity shapes (listings, brokers, users) live in `onlylands-core`;
//! this module adds the per-endpoint request and response envelopes.

use onlylands_core::{BrokerId, ListingId, OrderId};
use serde::{Deserialize, Serialize};

pub use onlylands_core::{Broker, Listing, User};

// =============================================================================
// Auth
// =============================================================================

/// `POST /api/send-otp` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SendOtpResponse {
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Present when the backend falls back to demo OTP delivery.
    #[serde(default)]
    pub demo_info: Option<String>,
}

impl SendOtpResponse {
    /// The backend signals demo mode when no SMS provider is usable.
    #[must_use]
    pub fn is_demo_mode(&self) -> bool {
        self.status.as_deref() == Some("demo_mode")
    }
}

/// `POST /api/verify-otp` response.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpResponse {
    pub message: String,
    pub token: String,
    pub user: User,
}

// =============================================================================
// Listings
// =============================================================================

/// `GET /api/listings`, `GET /api/my-listings`, `GET /api/broker-dashboard`
/// envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingsResponse {
    #[serde(default)]
    pub listings: Vec<Listing>,
}

/// `POST /api/post-land` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PostLandResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub listing_id: ListingId,
}

/// `GET /api/stats` response, rendered on the home page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformStats {
    #[serde(default)]
    pub total_listings: u64,
    #[serde(default)]
    pub active_listings: u64,
    #[serde(default)]
    pub total_brokers: u64,
    #[serde(default)]
    pub active_brokers: u64,
    #[serde(default)]
    pub total_payments: u64,
}

// =============================================================================
// Brokers
// =============================================================================

/// `POST /api/broker-signup` request body.
#[derive(Debug, Clone, Serialize)]
pub struct BrokerSignupRequest {
    pub name: String,
    pub agency: String,
    pub phone_number: String,
    pub email: String,
    pub location: String,
}

/// `POST /api/broker-signup` response.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerSignupResponse {
    pub message: String,
    #[serde(default)]
    pub broker_id: Option<BrokerId>,
}

/// `GET /api/broker-profile` envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct BrokerProfileResponse {
    pub broker: Broker,
}

// =============================================================================
// Payments
// =============================================================================

/// Order descriptor inside the `create-payment-order` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: OrderId,
    /// Amount in paise.
    pub amount: i64,
    pub currency: String,
}

/// `POST /api/create-payment-order` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderResponse {
    pub order: PaymentOrder,
    #[serde(default)]
    pub demo_mode: bool,
}

/// Gateway identifiers handed to `POST /api/verify-payment`.
///
/// Demo mode synthesizes these client-side; the live flow receives them
/// from the Razorpay checkout callback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentVerification {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

/// `POST /api/verify-payment` response.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentResponse {
    pub message: String,
    #[serde(default)]
    pub demo_mode: bool,
}

impl VerifyPaymentResponse {
    /// The backend reports soft verification failure as a 200 with a
    /// "failed" message rather than an error status.
    #[must_use]
    pub fn is_verified(&self) -> bool {
        !self.message.to_lowercase().contains("failed")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_send_otp_demo_mode_detection() {
        let resp: SendOtpResponse = serde_json::from_str(
            r#"{"message": "OTP sent successfully (Demo Mode)", "status": "demo_mode", "demo_info": "Use OTP 123456 for testing."}"#,
        )
        .unwrap();
        assert!(resp.is_demo_mode());

        let resp: SendOtpResponse =
            serde_json::from_str(r#"{"message": "OTP sent successfully", "status": "pending"}"#)
                .unwrap();
        assert!(!resp.is_demo_mode());
    }

    #[test]
    fn test_create_order_response_shape() {
        let resp: CreateOrderResponse = serde_json::from_str(
            r#"{
                "order": {"id": "order_demo_1700000000", "amount": 29900, "currency": "INR", "status": "created"},
                "demo_mode": true
            }"#,
        )
        .unwrap();

        assert!(resp.demo_mode);
        assert_eq!(resp.order.amount, 29_900);
        assert_eq!(resp.order.currency, "INR");
    }

    #[test]
    fn test_verify_payment_soft_failure_detection() {
        let ok: VerifyPaymentResponse =
            serde_json::from_str(r#"{"message": "Payment verified successfully"}"#).unwrap();
        assert!(ok.is_verified());

        let failed: VerifyPaymentResponse =
            serde_json::from_str(r#"{"message": "Payment verification failed"}"#).unwrap();
        assert!(!failed.is_verified());
    }
}
