//! Integration tests for the marketplace OTP login flow.
//!
//! Requires the marketplace and the backend (demo mode) to be running;
//! see the crate docs. Run with: cargo test -- --ignored

use onlylands_integration_tests::{DEMO_OTP, marketplace_base_url, session_client};
use reqwest::StatusCode;

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_login_choice_page_renders() {
    let client = session_client();
    let resp = client
        .get(format!("{}/login", marketplace_base_url()))
        .send()
        .await
        .expect("Failed to load login page");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Login as Seller"));
    assert!(body.contains("Login as Broker"));
}

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_send_otp_rejects_nine_digit_number_without_backend_call() {
    let client = session_client();
    let resp = client
        .post(format!("{}/auth/send-otp", marketplace_base_url()))
        .form(&[("phone_number", "702175806"), ("user_type", "seller")])
        .send()
        .await
        .expect("Failed to post phone number");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");

    // Still on the phone step, with the validation message
    assert!(body.contains("exactly 10 digits"));
    assert!(!body.contains("name=\"otp\""));
}

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_send_otp_advances_to_otp_step_for_ten_digit_number() {
    let client = session_client();
    let resp = client
        .post(format!("{}/auth/send-otp", marketplace_base_url()))
        .form(&[("phone_number", "+91 7021758061"), ("user_type", "seller")])
        .send()
        .await
        .expect("Failed to post phone number");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("name=\"otp\""));
}

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_demo_otp_login_reaches_home_logged_in() {
    let client = session_client();
    let base_url = marketplace_base_url();

    let resp = client
        .post(format!("{base_url}/auth/send-otp"))
        .form(&[("phone_number", "9876543210"), ("user_type", "seller")])
        .send()
        .await
        .expect("Failed to send OTP");
    assert!(resp.status().is_success());

    let resp = client
        .post(format!("{base_url}/auth/verify-otp"))
        .form(&[
            ("phone_number", "9876543210"),
            ("otp", DEMO_OTP),
            ("user_type", "seller"),
        ])
        .send()
        .await
        .expect("Failed to verify OTP");

    // Redirect lands on the home page with the seller nav
    assert!(resp.status().is_success());
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Post Your Land"));
}

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_wrong_otp_surfaces_backend_message() {
    let client = session_client();
    let base_url = marketplace_base_url();

    client
        .post(format!("{base_url}/auth/send-otp"))
        .form(&[("phone_number", "9876543210"), ("user_type", "seller")])
        .send()
        .await
        .expect("Failed to send OTP");

    let resp = client
        .post(format!("{base_url}/auth/verify-otp"))
        .form(&[
            ("phone_number", "9876543210"),
            ("otp", "000000"),
            ("user_type", "seller"),
        ])
        .send()
        .await
        .expect("Failed to verify OTP");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("banner-error"));
}
