//! Brokers table route handler.

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
        "All Brokers",
        TableColumn::set(&["Name", "Agency", "Phone Number", "Email", "Location", "Created At"]),
    )
}

/// Display all brokers.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Response {
    match state.client().brokers(&admin.token).await {
        Ok(brokers) => TableTemplate {
            rows: brokers
                .iter()
                .map(|broker| {
                    TableRow::new(vec![
                        broker.name.clone(),
                        cell(Some(&broker.agency)),
                        broker.phone_number.clone(),
                        cell(Some(&broker.email)),
                        cell(Some(&broker.location.join(", "))),
                        cell(broker.created_at.as_deref()),
                    ])
                })
                .collect(),
            ..template()
        }
        .into_response(),
        Err(AdminApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to fetch brokers: {e}");
            TableTemplate {
                error: Some(e.user_message()),
                ..template()
            }
            .into_response()
        }
    }
}
