//! Broker registration and dashboard endpoints.

use super::types::{Broker, BrokerProfileResponse, BrokerSignupRequest, BrokerSignupResponse, Listing, ListingsResponse};
use super::{ApiError, BackendClient};

impl BackendClient {
    /// `POST /api/broker-signup`
    ///
    /// Registering an already-known phone number is not an error; the
    /// backend answers with "Broker already registered".
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend rejects the registration.
    pub async fn broker_signup(
        &self,
        request: &BrokerSignupRequest,
    ) -> Result<BrokerSignupResponse, ApiError> {
        self.post_json("/api/broker-signup", None, request).await
    }

    /// `GET /api/broker-profile`
    ///
    /// Returns `None` when the broker has not registered yet - the backend
    /// reports that as a 404, which is ordinary control flow here.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for any failure other than "not registered".
    pub async fn broker_profile(&self, token: &str) -> Result<Option<Broker>, ApiError> {
        match self
            .get_json::<BrokerProfileResponse>("/api/broker-profile", Some(token))
            .await
        {
            Ok(resp) => Ok(Some(resp.broker)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// `GET /api/broker-dashboard`
    ///
    /// Returns `None` when the broker has not registered yet (404), and the
    /// current active leads otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] for any failure other than "not registered".
    pub async fn broker_dashboard(&self, token: &str) -> Result<Option<Vec<Listing>>, ApiError> {
        match self
            .get_json::<ListingsResponse>("/api/broker-dashboard", Some(token))
            .await
        {
            Ok(resp) => Ok(Some(resp.listings)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
