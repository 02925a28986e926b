//! Users table route handler.

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
        "All Users",
        TableColumn::set(&["User ID", "Phone Number", "User Type", "Created At"]),
    )
}

/// Display all users.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Response {
    match state.client().users(&admin.token).await {
        Ok(users) => TableTemplate {
            rows: users
                .iter()
                .map(|user| {
                    TableRow::new(vec![
                        user.user_id.to_string(),
                        user.phone_number.clone(),
                        user.user_type.to_string(),
                        cell(user.created_at.as_deref()),
                    ])
                })
                .collect(),
            ..template()
        }
        .into_response(),
        Err(AdminApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to fetch users: {e}");
            TableTemplate {
                error: Some(e.user_message()),
                ..template()
            }
            .into_response()
        }
    }
}
