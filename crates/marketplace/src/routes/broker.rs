//! Broker registration and dashboard route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;

use onlylands_core::{MediaRef, PhoneNumber};

use crate::api::ApiError;
use crate::api::types::{BrokerSignupRequest, Listing};
use crate::middleware::{OptionalAuth, RequireAuth, force_logout};
use crate::models::session_keys;
use crate::routes::listings::whatsapp_contact_url;
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Broker registration form data.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrokerRegisterForm {
    pub name: String,
    pub agency: String,
    pub phone_number: String,
    pub email: String,
    pub location: String,
}

// =============================================================================
// View Types
// =============================================================================

/// Lead card for the broker dashboard.
#[derive(Debug, Clone)]
pub struct LeadView {
    pub title: String,
    pub location: String,
    pub area: String,
    pub price: String,
    pub description: String,
    pub photo_src: Option<String>,
    pub whatsapp_url: Option<String>,
}

impl From<&Listing> for LeadView {
    fn from(listing: &Listing) -> Self {
        Self {
            title: listing.title.clone(),
            location: listing.location.clone(),
            area: listing.area.clone(),
            price: listing.price.clone(),
            description: listing.description.clone(),
            photo_src: listing.photos.first().map(MediaRef::src),
            whatsapp_url: listing
                .phone_number
                .as_deref()
                .and_then(|phone| whatsapp_contact_url(phone, &listing.title, &listing.location)),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Broker registration template.
#[derive(Template, WebTemplate)]
#[template(path = "broker/register.html")]
pub struct BrokerRegisterTemplate {
    pub form: BrokerRegisterForm,
    pub error: Option<String>,
}

/// Broker dashboard (leads list) template.
#[derive(Template, WebTemplate)]
#[template(path = "broker/dashboard.html")]
pub struct BrokerDashboardTemplate {
    pub leads: Vec<LeadView>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the broker registration form.
pub async fn register_form(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    let form = BrokerRegisterForm {
        phone_number: user
            .filter(|u| u.is_broker())
            .map(|u| u.phone_number)
            .unwrap_or_default(),
        ..BrokerRegisterForm::default()
    };

    BrokerRegisterTemplate { form, error: None }
}

/// Handle broker registration.
///
/// The WhatsApp number gets the same 10-digit gate as login; everything
/// else leans on native form constraints with a light server backstop.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<BrokerRegisterForm>,
) -> Response {
    let phone = match PhoneNumber::parse(&form.phone_number) {
        Ok(phone) => phone,
        Err(e) => {
            return BrokerRegisterTemplate {
                error: Some(e.to_string()),
                form,
            }
            .into_response();
        }
    };

    if !form.email.contains('@') {
        return BrokerRegisterTemplate {
            error: Some("Enter a valid email address".to_string()),
            form,
        }
        .into_response();
    }

    let request = BrokerSignupRequest {
        name: form.name.trim().to_string(),
        agency: form.agency.trim().to_string(),
        phone_number: phone.e164(),
        email: form.email.trim().to_string(),
        location: form.location.trim().to_string(),
    };

    match state.backend().broker_signup(&request).await {
        Ok(resp) => {
            tracing::info!("Broker registered: {}", resp.message);

            // A logged-in broker now has a profile; remember that
            if user.as_ref().is_some_and(|u| u.is_broker()) {
                if let Err(e) = session
                    .insert(session_keys::BROKER_REGISTERED, true)
                    .await
                {
                    tracing::warn!("Failed to store broker registration flag: {e}");
                }
                return Redirect::to("/broker/dashboard").into_response();
            }

            Redirect::to("/login/broker").into_response()
        }
        Err(e) => {
            tracing::warn!("Broker registration failed: {e}");
            BrokerRegisterTemplate {
                error: Some(e.user_message()),
                form,
            }
            .into_response()
        }
    }
}

/// Display the broker dashboard: active listings as leads.
///
/// A broker without a server-side profile is bounced to the registration
/// form - the backend reports that as a 404, which is not an error here.
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Response {
    if !user.is_broker() {
        return Redirect::to("/").into_response();
    }

    match state.backend().broker_dashboard(&user.token).await {
        Ok(Some(listings)) => {
            if let Err(e) = session.insert(session_keys::BROKER_REGISTERED, true).await {
                tracing::warn!("Failed to store broker registration flag: {e}");
            }

            BrokerDashboardTemplate {
                leads: listings.iter().map(LeadView::from).collect(),
                error: None,
            }
            .into_response()
        }
        Ok(None) => {
            if let Err(e) = session
                .insert(session_keys::BROKER_REGISTERED, false)
                .await
            {
                tracing::warn!("Failed to store broker registration flag: {e}");
            }

            Redirect::to("/broker/register").into_response()
        }
        Err(ApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to fetch broker dashboard: {e}");
            BrokerDashboardTemplate {
                leads: Vec::new(),
                error: Some(e.user_message()),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use onlylands_core::{ListingId, ListingStatus};

    use super::*;

    #[test]
    fn test_lead_view_builds_whatsapp_link_from_owner_phone() {
        let listing = Listing {
            listing_id: ListingId::new("l-1"),
            seller_id: None,
            title: "5 Acre Plot".to_string(),
            location: "Alibag".to_string(),
            area: "5 Acres".to_string(),
            price: "80 Lakhs".to_string(),
            description: "Flat land".to_string(),
            google_maps_link: None,
            latitude: None,
            longitude: None,
            photos: Vec::new(),
            videos: Vec::new(),
            status: ListingStatus::Active,
            phone_number: Some("+919876543210".to_string()),
            created_at: None,
        };

        let lead = LeadView::from(&listing);
        assert!(lead.whatsapp_url.unwrap().contains("wa.me/919876543210"));

        let anonymous = Listing {
            phone_number: None,
            ..listing
        };
        assert!(LeadView::from(&anonymous).whatsapp_url.is_none());
    }
}
