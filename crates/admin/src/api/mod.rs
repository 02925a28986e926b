//! Admin surface of the OnlyLands backend API.
//!
//! Every call except `login` is authorized by the backend-issued admin
//! bearer token. There is deliberately no client-side password anywhere:
//! the backend arbitrates every read and every destructive action.

pub mod types;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

use onlylands_core::{Broker, Listing, ListingId, PaymentRecord, User};

use types::{
    AdminListingUpdate, AdminLoginResponse, AdminStats, BrokersResponse, ListingsResponse,
    MessageResponse, PaymentsResponse, UsersResponse,
};

/// Errors that can occur when calling the admin API.
#[derive(Debug, Error)]
pub enum AdminApiError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The admin token was rejected; the caller must clear its session.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource absent (e.g., deleting a listing twice).
    #[error("not found: {0}")]
    NotFound(String),

    /// Any other non-success status, message taken from the body.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Backend-reported message.
        message: String,
    },

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl AdminApiError {
    /// The message a screen should put in front of the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Unauthorized => "Your admin session has expired. Please log in again.".to_string(),
            Self::NotFound(message) | Self::Status { message, .. } => message.clone(),
            Self::Parse(_) => "Unexpected response from the server.".to_string(),
        }
    }
}

/// Client for the `/api/admin/*` surface.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    /// Create a new admin API client.
    #[must_use]
    pub fn new(backend_base_url: &str) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url: backend_base_url.to_owned(),
            }),
        }
    }

    /// `POST /api/admin/login` - exchange credentials for an admin token.
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError::Unauthorized`] on wrong credentials.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AdminLoginResponse, AdminApiError> {
        let response = self
            .inner
            .client
            .post(self.url("/api/admin/login"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        decode_response(response).await
    }

    /// `GET /api/admin/stats`
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError`] on failure.
    pub async fn stats(&self, token: &str) -> Result<AdminStats, AdminApiError> {
        self.get_json("/api/admin/stats", token).await
    }

    /// `GET /api/admin/users`
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError`] on failure.
    pub async fn users(&self, token: &str) -> Result<Vec<User>, AdminApiError> {
        let resp: UsersResponse = self.get_json("/api/admin/users", token).await?;
        Ok(resp.users)
    }

    /// `GET /api/admin/listings`
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError`] on failure.
    pub async fn listings(&self, token: &str) -> Result<Vec<Listing>, AdminApiError> {
        let resp: ListingsResponse = self.get_json("/api/admin/listings", token).await?;
        Ok(resp.listings)
    }

    /// `GET /api/admin/brokers`
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError`] on failure.
    pub async fn brokers(&self, token: &str) -> Result<Vec<Broker>, AdminApiError> {
        let resp: BrokersResponse = self.get_json("/api/admin/brokers", token).await?;
        Ok(resp.brokers)
    }

    /// `GET /api/admin/payments`
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError`] on failure.
    pub async fn payments(&self, token: &str) -> Result<Vec<PaymentRecord>, AdminApiError> {
        let resp: PaymentsResponse = self.get_json("/api/admin/payments", token).await?;
        Ok(resp.payments)
    }

    /// `DELETE /api/admin/delete-listing/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError::NotFound`] when the listing is gone already.
    pub async fn delete_listing(
        &self,
        token: &str,
        listing_id: &ListingId,
    ) -> Result<(), AdminApiError> {
        let response = self
            .inner
            .client
            .delete(self.url(&format!("/api/admin/delete-listing/{listing_id}")))
            .bearer_auth(token)
            .send()
            .await?;

        let _: MessageResponse = decode_response(response).await?;
        Ok(())
    }

    /// `PUT /api/admin/update-listing/{id}`
    ///
    /// # Errors
    ///
    /// Returns [`AdminApiError`] on failure.
    pub async fn update_listing(
        &self,
        token: &str,
        listing_id: &ListingId,
        update: &AdminListingUpdate,
    ) -> Result<(), AdminApiError> {
        let response = self
            .inner
            .client
            .put(self.url(&format!("/api/admin/update-listing/{listing_id}")))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;

        let _: MessageResponse = decode_response(response).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, AdminApiError> {
        let response = self
            .inner
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;

        decode_response(response).await
    }
}

/// Decode a backend response, mapping the error taxonomy.
async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AdminApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(AdminApiError::Unauthorized);
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(AdminApiError::NotFound(extract_detail(&body)));
    }

    if !status.is_success() {
        tracing::warn!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Backend returned non-success status"
        );
        return Err(AdminApiError::Status {
            status: status.as_u16(),
            message: extract_detail(&body),
        });
    }

    Ok(serde_json::from_str(&body)?)
}

/// Pull the FastAPI-style `detail` message out of an error body.
fn extract_detail(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct Detail {
        detail: String,
    }

    serde_json::from_str::<Detail>(body).map_or_else(
        |_| {
            if body.trim().is_empty() {
                "Unknown error".to_string()
            } else {
                body.chars().take(200).collect()
            }
        },
        |d| d.detail,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Invalid credentials"}"#),
            "Invalid credentials"
        );
        assert_eq!(extract_detail(""), "Unknown error");
    }

    #[test]
    fn test_user_message_for_expired_token() {
        assert_eq!(
            AdminApiError::Unauthorized.user_message(),
            "Your admin session has expired. Please log in again."
        );
    }
}
