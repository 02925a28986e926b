//! Listings table, edit, and delete route handlers.
//!
//! Update and delete are forwarded to the backend with the session's admin
//! token; the backend alone authorizes them.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;

use onlylands_core::{Listing, ListingId, ListingStatus};

use crate::api::AdminApiError;
use crate::api::types::AdminListingUpdate;
use crate::components::{TableColumn, TableRow, data_table::cell};
use crate::error::AppError;
use crate::middleware::{RequireAdminAuth, force_logout};
use crate::state::AppState;

use super::TableTemplate;

// =============================================================================
// Form Types
// =============================================================================

/// Listing edit form data.
#[derive(Debug, Deserialize)]
pub struct ListingEditForm {
    pub title: String,
    pub location: String,
    pub area: String,
    pub price: String,
    pub description: String,
    pub status: ListingStatus,
}

// =============================================================================
// Templates
// =============================================================================

/// Listing edit page template.
#[derive(Template, WebTemplate)]
#[template(path = "listings_edit.html")]
pub struct ListingEditTemplate {
    pub listing_id: String,
    pub title: String,
    pub location: String,
    pub area: String,
    pub price: String,
    pub description: String,
    pub status_value: String,
    pub error: Option<String>,
}

impl ListingEditTemplate {
    fn from_listing(listing: &Listing) -> Self {
        Self {
            listing_id: listing.listing_id.to_string(),
            title: listing.title.clone(),
            location: listing.location.clone(),
            area: listing.area.clone(),
            price: listing.price.clone(),
            description: listing.description.clone(),
            status_value: listing.status.to_string(),
            error: None,
        }
    }
}

fn table() -> TableTemplate {
    TableTemplate {
        with_actions: true,
        ..TableTemplate::new(
            "All Listings",
            TableColumn::set(&["Title", "Location", "Price", "Area", "Status", "Created At"]),
        )
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display all listings with edit/delete actions.
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Response {
    match state.client().listings(&admin.token).await {
        Ok(listings) => TableTemplate {
            rows: listings
                .iter()
                .map(|listing| {
                    TableRow::with_id(
                        listing.listing_id.to_string(),
                        vec![
                            listing.title.clone(),
                            cell(Some(&listing.location)),
                            listing.price.clone(),
                            listing.area.clone(),
                            listing.status.label().to_string(),
                            cell(listing.created_at.as_deref()),
                        ],
                    )
                })
                .collect(),
            ..table()
        }
        .into_response(),
        Err(AdminApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to fetch listings: {e}");
            TableTemplate {
                error: Some(e.user_message()),
                ..table()
            }
            .into_response()
        }
    }
}

/// Display the edit form for one listing.
pub async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let listings = match state.client().listings(&admin.token).await {
        Ok(listings) => listings,
        Err(AdminApiError::Unauthorized) => return Ok(force_logout(&session).await),
        Err(e) => return Err(e.into()),
    };

    let listing = listings
        .iter()
        .find(|listing| listing.listing_id.as_str() == id)
        .ok_or_else(|| AppError::NotFound(format!("listing {id}")))?;

    Ok(ListingEditTemplate::from_listing(listing).into_response())
}

/// Apply an edit via the backend.
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
    Form(form): Form<ListingEditForm>,
) -> Response {
    let listing_id = ListingId::new(id);
    let update = AdminListingUpdate {
        title: form.title.clone(),
        location: form.location.clone(),
        area: form.area.clone(),
        price: form.price.clone(),
        description: form.description.clone(),
        status: form.status,
    };

    match state
        .client()
        .update_listing(&admin.token, &listing_id, &update)
        .await
    {
        Ok(()) => Redirect::to("/listings").into_response(),
        Err(AdminApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to update listing: {e}");
            ListingEditTemplate {
                listing_id: listing_id.to_string(),
                title: form.title,
                location: form.location,
                area: form.area,
                price: form.price,
                description: form.description,
                status_value: form.status.to_string(),
                error: Some(e.user_message()),
            }
            .into_response()
        }
    }
}

/// Delete a listing via the backend.
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let listing_id = ListingId::new(id);

    match state
        .client()
        .delete_listing(&admin.token, &listing_id)
        .await
    {
        // Already gone is as deleted as it gets
        Ok(()) | Err(AdminApiError::NotFound(_)) => {
            Ok(Redirect::to("/listings").into_response())
        }
        Err(AdminApiError::Unauthorized) => Ok(force_logout(&session).await),
        Err(e) => Err(e.into()),
    }
}
