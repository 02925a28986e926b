//! Payment order creation and verification endpoints.

use onlylands_core::ListingId;

use super::types::{CreateOrderResponse, PaymentVerification, VerifyPaymentResponse};
use super::{ApiError, BackendClient};

impl BackendClient {
    /// `POST /api/create-payment-order`
    ///
    /// `amount_rupees` is in rupees; the backend converts to paise and the
    /// returned order descriptor echoes the paise amount.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if order creation fails.
    pub async fn create_payment_order(
        &self,
        token: &str,
        amount_rupees: u32,
        listing_id: &ListingId,
    ) -> Result<CreateOrderResponse, ApiError> {
        self.post_json(
            "/api/create-payment-order",
            Some(token),
            &serde_json::json!({
                "amount": amount_rupees,
                "listing_id": listing_id,
            }),
        )
        .await
    }

    /// `POST /api/verify-payment`
    ///
    /// One call per attempt; the flow never retries automatically and a
    /// repeat with the same identifiers is the backend's to arbitrate.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request itself fails. A soft
    /// verification failure comes back as `Ok` with a "failed" message -
    /// see [`VerifyPaymentResponse::is_verified`].
    pub async fn verify_payment(
        &self,
        token: &str,
        verification: &PaymentVerification,
    ) -> Result<VerifyPaymentResponse, ApiError> {
        self.post_json("/api/verify-payment", Some(token), verification)
            .await
    }
}
