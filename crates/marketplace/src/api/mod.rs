//! OnlyLands backend API client.
//!
//! The backend is the system of record for users, listings, brokers, and
//! payments; this client wraps its JSON/multipart REST surface. Screens
//! surface backend error messages verbatim, so [`ApiError::Status`] carries
//! the `detail` string extracted from the response body.
//!
//! # Example
//!
//! ```rust,ignore
//! use onlylands_marketplace::api::BackendClient;
//!
//! let backend = BackendClient::new(&config.backend);
//!
//! // Send an OTP
//! let resp = backend.send_otp(&phone, UserType::Seller).await?;
//!
//! // Browse active listings
//! let listings = backend.listings().await?;
//! ```

mod auth;
mod brokers;
mod listings;
mod payments;
pub mod types;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::BackendApiConfig;

/// Errors that can occur when calling the OnlyLands backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The bearer token was rejected; the caller must clear its session.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource absent. "Broker not registered yet" flows route through
    /// this variant as ordinary control flow.
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

impl ApiError {
    /// The message a screen should put in front of the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            Self::NotFound(message) | Self::Status { message, .. } => message.clone(),
            Self::Parse(_) => "Unexpected response from the server.".to_string(),
        }
    }
}

/// Client for the OnlyLands backend REST API.
///
/// Cheaply cloneable via `Arc`; one instance is shared through the
/// application state.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendApiConfig) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.clone(),
            }),
        }
    }

    /// `GET /api/health` - backend reachability, used by the readiness probe.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.get_json("/api/health", None).await?;
        Ok(())
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// GET a JSON response, optionally with a bearer token.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> Result<T, ApiError> {
        let mut request = self.http().get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        decode_response(request.send().await?).await
    }

    /// POST a JSON body, optionally with a bearer token.
    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.http().post(self.url(path)).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        decode_response(request.send().await?).await
    }
}

/// Decode a backend response into the expected type, mapping the error
/// taxonomy along the way.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if status == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(extract_detail(&body)));
    }

    if !status.is_success() {
        tracing::warn!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Backend returned non-success status"
        );
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: extract_detail(&body),
        });
    }

    match serde_json::from_str(&body) {
        Ok(value) => Ok(value),
        Err(e) => {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            Err(ApiError::Parse(e))
        }
    }
}

/// Pull the FastAPI-style `detail` message out of an error body, falling
/// back to the raw body when the shape differs.
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
