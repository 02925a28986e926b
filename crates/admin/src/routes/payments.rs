//! Payments table route handler.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tower_sessions::Session;

use crate::api::AdminApiError;
use crate::components::{TableColumn, TableRow, data_table::cell};
use crate::middleware::{RequireAdminAuth, force_logout};
use crate::state::AppState;

use super::TableTemplate;

fn template() -> TableTemplate {
    TableTemplate::new(
        "All Payments",
        TableColumn::set(&["Order ID", "Listing", "Amount", "Currency", "Status", "Mode", "Created At"]),
    )
}

/// Display all payments.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Response {
    match state.client().payments(&admin.token).await {
        Ok(payments) => TableTemplate {
            rows: payments
                .iter()
                .map(|payment| {
                    TableRow::new(vec![
                        cell(payment.razorpay_order_id.as_deref()),
                        cell(payment.listing_id.as_ref().map(|id| id.as_str())),
                        format!("\u{20b9}{}", payment.amount / 100),
                        cell(Some(&payment.currency)),
                        payment.status.label().to_string(),
                        if payment.demo_mode { "Demo" } else { "Live" }.to_string(),
                        cell(payment.created_at.as_deref()),
                    ])
                })
                .collect(),
            ..template()
        }
        .into_response(),
        Err(AdminApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to fetch payments: {e}");
            TableTemplate {
                error: Some(e.user_message()),
                ..template()
            }
            .into_response()
        }
    }
}
