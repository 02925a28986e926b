//! Payment flow route handlers.
//!
//! The flow walks `Idle → OrderCreated → (WidgetOpen | DemoOpen) →
//! Verifying → Succeeded | Failed`. The in-flight order parks in the
//! session between requests. A declined verification returns the flow to
//! `OrderCreated` so the user can retry by paying again; nothing retries
//! automatically and the backend owns all authoritative payment state.

use std::time::Duration;

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use hmac::{Hmac, Mac};
use rand::Rng as _;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tower_sessions::Session;

use onlylands_core::ListingId;

use crate::api::ApiError;
use crate::api::types::{PaymentOrder, PaymentVerification};
use crate::error::AppError;
use crate::middleware::{RequireAuth, force_logout};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Listing fee in rupees.
pub const LISTING_FEE_RUPEES: u32 = 299;

/// Fixed artificial delay before the demo checkout "completes".
const DEMO_PROCESSING_DELAY: Duration = Duration::from_millis(1200);

/// Throwaway key for demo-mode signatures. The shape matches the real
/// gateway's HMAC so the verify path is identical in both modes.
const DEMO_SIGNING_KEY: &[u8] = b"onlylands-demo-gateway";

// =============================================================================
// Flow State
// =============================================================================

/// Client-side phases of the payment flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentPhase {
    Idle,
    OrderCreated,
    WidgetOpen,
    DemoOpen,
    Verifying,
    Succeeded,
    Failed,
}

impl PaymentPhase {
    /// Legal transitions. `Failed → OrderCreated` is the manual-retry edge.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::OrderCreated)
                | (Self::OrderCreated, Self::WidgetOpen | Self::DemoOpen)
                | (Self::WidgetOpen | Self::DemoOpen, Self::Verifying)
                | (Self::Verifying, Self::Succeeded | Self::Failed)
                | (Self::Failed, Self::OrderCreated)
        )
    }
}

/// The in-flight order, parked in the session between requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPayment {
    pub listing_id: ListingId,
    pub order: PaymentOrder,
    pub demo_mode: bool,
    pub phase: PaymentPhase,
}

impl PendingPayment {
    /// Move to the next phase, rejecting out-of-order requests (double
    /// submits, replayed forms).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BadRequest`] when the transition is not legal.
    pub fn advance(&mut self, next: PaymentPhase) -> Result<(), AppError> {
        if !self.phase.can_transition_to(next) {
            return Err(AppError::BadRequest(format!(
                "payment flow cannot move from {:?} to {next:?}",
                self.phase
            )));
        }
        self.phase = next;
        Ok(())
    }
}

// =============================================================================
// Demo Gateway Identifiers
// =============================================================================

/// Synthesize a demo payment id in the gateway's format.
fn demo_payment_id() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(14)
        .map(char::from)
        .collect();
    format!("pay_demo_{suffix}")
}

/// Demo-mode stand-in for the gateway signature: HMAC-SHA256 over
/// `order_id|payment_id`, hex-encoded.
fn demo_signature(order_id: &str, payment_id: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(DEMO_SIGNING_KEY)
        .expect("HMAC accepts keys of any length");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Format a paise amount for display.
fn format_paise(amount: i64) -> String {
    let rupees = amount / 100;
    let paise = amount % 100;
    if paise == 0 {
        format!("₹{rupees}")
    } else {
        format!("₹{rupees}.{paise:02}")
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Fee summary template.
#[derive(Template, WebTemplate)]
#[template(path = "payment/summary.html")]
pub struct PaymentTemplate {
    pub listing_id: String,
    pub fee_display: String,
    pub error: Option<String>,
}

impl PaymentTemplate {
    fn new(listing_id: String, error: Option<String>) -> Self {
        Self {
            listing_id,
            fee_display: format!("₹{LISTING_FEE_RUPEES}"),
            error,
        }
    }
}

/// Simulated checkout dialog, rendered when the backend signals demo mode.
#[derive(Template, WebTemplate)]
#[template(path = "payment/demo_checkout.html")]
pub struct DemoCheckoutTemplate {
    pub order_id: String,
    pub amount_display: String,
    pub listing_id: String,
}

/// Live gateway checkout page.
#[derive(Template, WebTemplate)]
#[template(path = "payment/razorpay_checkout.html")]
pub struct RazorpayCheckoutTemplate {
    pub key_id: String,
    pub order_id: String,
    pub amount: i64,
    pub currency: String,
    pub amount_display: String,
    pub contact: String,
    pub listing_id: String,
}

/// Terminal success/failure screen.
#[derive(Template, WebTemplate)]
#[template(path = "payment/result.html")]
pub struct PaymentResultTemplate {
    pub success: bool,
    pub message: String,
    pub demo_mode: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the listing fee summary.
pub async fn summary(
    RequireAuth(_user): RequireAuth,
    Path(listing_id): Path<String>,
) -> impl IntoResponse {
    PaymentTemplate::new(listing_id, None)
}

/// Create the payment order and open the matching checkout.
pub async fn create_order(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Path(listing_id): Path<String>,
) -> Result<Response, AppError> {
    let listing_id = ListingId::new(listing_id);

    let resp = match state
        .backend()
        .create_payment_order(&user.token, LISTING_FEE_RUPEES, &listing_id)
        .await
    {
        Ok(resp) => resp,
        Err(ApiError::Unauthorized) => return Ok(force_logout(&session).await),
        Err(e) => {
            tracing::warn!("Failed to create payment order: {e}");
            return Ok(
                PaymentTemplate::new(listing_id.to_string(), Some(e.user_message()))
                    .into_response(),
            );
        }
    };

    let mut pending = PendingPayment {
        listing_id: listing_id.clone(),
        order: resp.order,
        demo_mode: resp.demo_mode,
        phase: PaymentPhase::OrderCreated,
    };
    pending.advance(if resp.demo_mode {
        PaymentPhase::DemoOpen
    } else {
        PaymentPhase::WidgetOpen
    })?;

    session
        .insert(session_keys::PENDING_PAYMENT, &pending)
        .await
        .map_err(|e| AppError::Internal(format!("failed to park payment order: {e}")))?;

    if pending.demo_mode {
        Ok(DemoCheckoutTemplate {
            order_id: pending.order.id.to_string(),
            amount_display: format_paise(pending.order.amount),
            listing_id: listing_id.to_string(),
        }
        .into_response())
    } else {
        Ok(RazorpayCheckoutTemplate {
            key_id: state.config().backend.razorpay_key_id.clone(),
            order_id: pending.order.id.to_string(),
            amount: pending.order.amount,
            currency: pending.order.currency.clone(),
            amount_display: format_paise(pending.order.amount),
            contact: user.phone_number.clone(),
            listing_id: listing_id.to_string(),
        }
        .into_response())
    }
}

/// Complete the simulated checkout: fixed delay, synthesized gateway
/// identifiers, then the same verify path as the live flow.
pub async fn demo_complete(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Result<Response, AppError> {
    let Some(mut pending) = session
        .get::<PendingPayment>(session_keys::PENDING_PAYMENT)
        .await
        .ok()
        .flatten()
    else {
        // Nothing in flight (already verified, or the session moved on)
        return Ok(Redirect::to("/my-listings").into_response());
    };

    if !pending.demo_mode {
        return Err(AppError::BadRequest(
            "demo completion is only valid for demo orders".to_string(),
        ));
    }

    pending.advance(PaymentPhase::Verifying)?;

    tokio::time::sleep(DEMO_PROCESSING_DELAY).await;

    let payment_id = demo_payment_id();
    let verification = PaymentVerification {
        razorpay_order_id: pending.order.id.to_string(),
        razorpay_signature: demo_signature(pending.order.id.as_str(), &payment_id),
        razorpay_payment_id: payment_id,
    };

    Ok(finish_verification(&state, &session, &user, pending, verification).await)
}

/// Verify gateway identifiers posted by the live checkout callback.
pub async fn verify(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(verification): Form<PaymentVerification>,
) -> Result<Response, AppError> {
    let Some(mut pending) = session
        .get::<PendingPayment>(session_keys::PENDING_PAYMENT)
        .await
        .ok()
        .flatten()
    else {
        return Ok(Redirect::to("/my-listings").into_response());
    };

    pending.advance(PaymentPhase::Verifying)?;

    Ok(finish_verification(&state, &session, &user, pending, verification).await)
}

/// One verify call; success clears the parked order, failure rolls the
/// flow back to `OrderCreated` with the error in the banner.
async fn finish_verification(
    state: &AppState,
    session: &Session,
    user: &CurrentUser,
    mut pending: PendingPayment,
    verification: PaymentVerification,
) -> Response {
    match state
        .backend()
        .verify_payment(&user.token, &verification)
        .await
    {
        Ok(resp) if resp.is_verified() => {
            let _ = pending.advance(PaymentPhase::Succeeded);
            if let Err(e) = session
                .remove::<PendingPayment>(session_keys::PENDING_PAYMENT)
                .await
            {
                tracing::warn!("Failed to clear verified payment: {e}");
            }

            PaymentResultTemplate {
                success: true,
                message: resp.message,
                demo_mode: resp.demo_mode,
            }
            .into_response()
        }
        Ok(resp) => {
            retry_with_error(session, pending, resp.message).await
        }
        Err(ApiError::Unauthorized) => force_logout(session).await,
        Err(e) => {
            tracing::warn!("Payment verification failed: {e}");
            let message = e.user_message();
            retry_with_error(session, pending, message).await
        }
    }
}

/// Roll the flow back to `OrderCreated` and re-render the summary with the
/// error, leaving a manual retry open.
async fn retry_with_error(
    session: &Session,
    mut pending: PendingPayment,
    message: String,
) -> Response {
    let _ = pending.advance(PaymentPhase::Failed);
    let _ = pending.advance(PaymentPhase::OrderCreated);
    if let Err(e) = session
        .insert(session_keys::PENDING_PAYMENT, &pending)
        .await
    {
        tracing::warn!("Failed to park payment order for retry: {e}");
    }

    PaymentTemplate::new(pending.listing_id.to_string(), Some(message)).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use onlylands_core::OrderId;

    use super::*;

    fn pending(phase: PaymentPhase, demo_mode: bool) -> PendingPayment {
        PendingPayment {
            listing_id: ListingId::new("l-1"),
            order: PaymentOrder {
                id: OrderId::new("order_demo_1700000000"),
                amount: 29_900,
                currency: "INR".to_string(),
            },
            demo_mode,
            phase,
        }
    }

    #[test]
    fn test_happy_path_transitions_demo() {
        let mut p = pending(PaymentPhase::Idle, true);
        p.advance(PaymentPhase::OrderCreated).unwrap();
        p.advance(PaymentPhase::DemoOpen).unwrap();
        p.advance(PaymentPhase::Verifying).unwrap();
        p.advance(PaymentPhase::Succeeded).unwrap();
    }

    #[test]
    fn test_happy_path_transitions_live() {
        let mut p = pending(PaymentPhase::Idle, false);
        p.advance(PaymentPhase::OrderCreated).unwrap();
        p.advance(PaymentPhase::WidgetOpen).unwrap();
        p.advance(PaymentPhase::Verifying).unwrap();
        p.advance(PaymentPhase::Failed).unwrap();
        // Manual retry reopens from the created order
        p.advance(PaymentPhase::OrderCreated).unwrap();
    }

    #[test]
    fn test_illegal_transitions_are_rejected() {
        let mut p = pending(PaymentPhase::Verifying, true);
        // A double submit cannot re-enter verification
        assert!(p.advance(PaymentPhase::Verifying).is_err());

        let mut p = pending(PaymentPhase::Succeeded, true);
        assert!(p.advance(PaymentPhase::OrderCreated).is_err());

        let mut p = pending(PaymentPhase::Idle, true);
        assert!(p.advance(PaymentPhase::Verifying).is_err());
    }

    #[test]
    fn test_demo_signature_is_deterministic_hex() {
        let a = demo_signature("order_demo_1", "pay_demo_x");
        let b = demo_signature("order_demo_1", "pay_demo_x");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.bytes().all(|b| b.is_ascii_hexdigit()));

        // Different payment id, different signature
        assert_ne!(a, demo_signature("order_demo_1", "pay_demo_y"));
    }

    #[test]
    fn test_demo_payment_id_shape() {
        let id = demo_payment_id();
        assert!(id.starts_with("pay_demo_"));
        assert_eq!(id.len(), "pay_demo_".len() + 14);
        assert_ne!(id, demo_payment_id());
    }

    #[test]
    fn test_format_paise() {
        assert_eq!(format_paise(29_900), "₹299");
        assert_eq!(format_paise(29_950), "₹299.50");
        assert_eq!(format_paise(5), "₹0.05");
    }
}
