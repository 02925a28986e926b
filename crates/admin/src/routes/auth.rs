//! Admin authentication route handlers.
//!
//! Credentials go straight to the backend's `/api/admin/login`; the issued
//! admin token is the only thing stored here. No password, hardcoded or
//! otherwise, lives in this binary.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;
use tower_sessions::Session;

use crate::api::AdminApiError;
use crate::middleware::{clear_session, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub username: String,
    pub error: Option<String>,
}

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate {
        username: String::new(),
        error: None,
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    match state.client().login(&form.username, &form.password).await {
        Ok(resp) => {
            let admin = CurrentAdmin {
                username: form.username,
                token: resp.token,
            };

            if let Err(e) = set_current_admin(&session, &admin).await {
                tracing::error!("Failed to set admin session: {e}");
                return LoginTemplate {
                    username: admin.username,
                    error: Some("Session error, please try again.".to_string()),
                }
                .into_response();
            }

            Redirect::to("/").into_response()
        }
        Err(AdminApiError::Unauthorized) => LoginTemplate {
            username: form.username,
            error: Some("Invalid credentials".to_string()),
        }
        .into_response(),
        Err(e) => {
            tracing::warn!("Admin login failed: {e}");
            LoginTemplate {
                username: form.username,
                error: Some(e.user_message()),
            }
            .into_response()
        }
    }
}

/// Handle logout.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_session(&session).await {
        tracing::error!("Failed to flush admin session: {e}");
    }
    Redirect::to("/auth/login").into_response()
}
