//! OTP authentication endpoints.

use onlylands_core::{PhoneNumber, UserType};

use super::types::{SendOtpResponse, VerifyOtpResponse};
use super::{ApiError, BackendClient};

impl BackendClient {
    /// `POST /api/send-otp`
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend rejects the request or is
    /// unreachable.
    pub async fn send_otp(
        &self,
        phone: &PhoneNumber,
        user_type: UserType,
    ) -> Result<SendOtpResponse, ApiError> {
        self.post_json(
            "/api/send-otp",
            None,
            &serde_json::json!({
                "phone_number": phone.e164(),
                "user_type": user_type,
            }),
        )
        .await
    }

    /// `POST /api/verify-otp`
    ///
    /// On success the backend issues a bearer token plus the user record.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with the backend's message (e.g.
    /// "Invalid OTP") when verification fails.
    pub async fn verify_otp(
        &self,
        phone: &PhoneNumber,
        otp: &str,
        user_type: UserType,
    ) -> Result<VerifyOtpResponse, ApiError> {
        self.post_json(
            "/api/verify-otp",
            None,
            &serde_json::json!({
                "phone_number": phone.e164(),
                "otp": otp,
                "user_type": user_type,
            }),
        )
        .await
    }
}
