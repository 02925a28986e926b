//! Shared helpers for OnlyLands integration tests.
//!
//! These tests drive the running binaries over HTTP. They require:
//! - The backend API reachable at `ONLYLANDS_API_URL` (demo mode is fine)
//! - The marketplace running (cargo run -p onlylands-marketplace)
//! - The admin console running (cargo run -p onlylands-admin)
//!
//! All tests are `#[ignore]`d so `cargo test` stays green without the
//! stack; run them with `cargo test -p onlylands-integration-tests -- --ignored`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;

/// Base URL for the marketplace (configurable via environment).
#[must_use]
pub fn marketplace_base_url() -> String {
    std::env::var("MARKETPLACE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin console (configurable via environment).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// The demo OTP the backend accepts when no SMS provider is configured.
pub const DEMO_OTP: &str = "123456";

/// Create an HTTP client that keeps session cookies between requests.
///
/// # Panics
///
/// Panics if the client cannot be constructed (test-only code).
#[must_use]
pub fn session_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Log into the marketplace as a seller using the demo OTP flow.
///
/// Returns the client holding the authenticated session cookie.
///
/// # Panics
///
/// Panics when any step of the flow fails (test-only code).
pub async fn login_as_seller(phone_number: &str) -> Client {
    let client = session_client();
    let base_url = marketplace_base_url();

    let resp = client
        .post(format!("{base_url}/auth/send-otp"))
        .form(&[("phone_number", phone_number), ("user_type", "seller")])
        .send()
        .await
        .expect("Failed to send OTP");
    assert!(resp.status().is_success());

    let resp = client
        .post(format!("{base_url}/auth/verify-otp"))
        .form(&[
            ("phone_number", phone_number),
            ("otp", DEMO_OTP),
            ("user_type", "seller"),
        ])
        .send()
        .await
        .expect("Failed to verify OTP");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    client
}
