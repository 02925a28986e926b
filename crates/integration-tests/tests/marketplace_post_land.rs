//! Integration tests for the post-land flow: drafts, media staging, and
//! the end-to-end submit-then-pay scenario.
//!
//! Requires the marketplace and the backend (demo mode) to be running;
//! see the crate docs. Run with: cargo test -- --ignored

use onlylands_integration_tests::{login_as_seller, marketplace_base_url};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};

/// A tiny valid JPEG header, enough for a staged upload.
fn fake_jpeg(name: &str) -> Part {
    Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10])
        .file_name(name.to_string())
        .mime_str("image/jpeg")
        .expect("static mime type is valid")
}

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_draft_persists_across_reload_and_clears_on_submit() {
    let client = login_as_seller("9876500001").await;
    let base_url = marketplace_base_url();

    // Autosave a draft
    let resp = client
        .post(format!("{base_url}/post-land/draft"))
        .form(&[
            ("title", "Draft Plot"),
            ("location", "Karjat"),
            ("area", "2 Acres"),
            ("price", "20 Lakhs"),
            ("description", "Work in progress"),
        ])
        .send()
        .await
        .expect("Failed to autosave draft");
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    // "Reload": a fresh GET must restore the typed values
    let body = client
        .get(format!("{base_url}/post-land"))
        .send()
        .await
        .expect("Failed to load form")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Draft Plot"));
    assert!(body.contains("Work in progress"));

    // Submit for real
    let resp = client
        .post(format!("{base_url}/post-land"))
        .form(&[
            ("title", "Draft Plot"),
            ("location", "Karjat"),
            ("area", "2 Acres"),
            ("price", "20 Lakhs"),
            ("description", "Work in progress"),
        ])
        .send()
        .await
        .expect("Failed to submit listing");
    assert!(resp.status().is_success());

    // Reopening the form shows defaults again
    let body = client
        .get(format!("{base_url}/post-land"))
        .send()
        .await
        .expect("Failed to reload form")
        .text()
        .await
        .expect("Failed to read body");
    assert!(!body.contains("Draft Plot"));
}

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_media_batch_over_cap_is_rejected_whole() {
    let client = login_as_seller("9876500002").await;
    let base_url = marketplace_base_url();

    // Stage 4 photos
    let form = (0..4).fold(Form::new(), |form, i| {
        form.part("files", fake_jpeg(&format!("p{i}.jpg")))
    });
    let resp = client
        .post(format!("{base_url}/post-land/media/photos"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to stage photos");
    assert!(resp.status().is_success());

    // A batch of 2 more would make 6 - the whole batch must bounce
    let form = Form::new()
        .part("files", fake_jpeg("p4.jpg"))
        .part("files", fake_jpeg("p5.jpg"));
    let body = client
        .post(format!("{base_url}/post-land/media/photos"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to post over-cap batch")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("exceed the limit"));

    // The original 4 previews are still there, no more
    let resp = client
        .get(format!("{base_url}/post-land/media/photos/3"))
        .send()
        .await
        .expect("Failed to fetch preview");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/post-land/media/photos/4"))
        .send()
        .await
        .expect("Failed to fetch preview");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_post_land_with_two_photos_reaches_payment_screen() {
    let client = login_as_seller("9876500003").await;
    let base_url = marketplace_base_url();

    // Stage 2 photos
    let form = Form::new()
        .part("files", fake_jpeg("a.jpg"))
        .part("files", fake_jpeg("b.jpg"));
    let resp = client
        .post(format!("{base_url}/post-land/media/photos"))
        .multipart(form)
        .send()
        .await
        .expect("Failed to stage photos");
    assert!(resp.status().is_success());

    // Submit the canonical scenario fields
    let resp = client
        .post(format!("{base_url}/post-land"))
        .form(&[
            ("title", "5 Acre Plot"),
            ("location", "Alibag"),
            ("area", "5 Acres"),
            ("price", "500000"),
            ("description", "Flat land"),
        ])
        .send()
        .await
        .expect("Failed to submit listing");

    // Lands on the payment screen for the new listing id
    assert!(resp.status().is_success());
    assert!(resp.url().path().starts_with("/pay/"));
    let body = resp.text().await.expect("Failed to read body");
    assert!(body.contains("Complete Payment"));
}

#[tokio::test]
#[ignore = "Requires running marketplace and backend"]
async fn test_demo_payment_completes_and_repeat_is_graceful() {
    let client = login_as_seller("9876500004").await;
    let base_url = marketplace_base_url();

    let resp = client
        .post(format!("{base_url}/post-land"))
        .form(&[
            ("title", "Payment Flow Plot"),
            ("location", "Nagpur"),
            ("area", "1 Acre"),
            ("price", "100000"),
            ("description", "For the payment test"),
        ])
        .send()
        .await
        .expect("Failed to submit listing");
    let pay_path = resp.url().path().to_string();
    assert!(pay_path.starts_with("/pay/"));

    // Create the order; demo backend opens the simulated checkout
    let body = client
        .post(format!("{base_url}{pay_path}/order"))
        .send()
        .await
        .expect("Failed to create order")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Demo") || body.contains("Checkout"));

    // Complete the simulated payment
    let body = client
        .post(format!("{base_url}/pay/demo/complete"))
        .send()
        .await
        .expect("Failed to complete demo payment")
        .text()
        .await
        .expect("Failed to read body");
    assert!(body.contains("Payment Successful"));

    // Completing again must not crash - the flow has moved on
    let resp = client
        .post(format!("{base_url}/pay/demo/complete"))
        .send()
        .await
        .expect("Failed to repeat demo completion");
    assert!(resp.status().is_success() || resp.status().is_redirection());
}
