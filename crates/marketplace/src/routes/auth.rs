//! OTP authentication route handlers.
//!
//! Login is a two-step form: phone entry, then OTP entry. Phone validation
//! is local-first - numbers that are not exactly 10 digits never reach the
//! backend. Backend error messages surface verbatim in the form banner.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use axum::Form;
use serde::Deserialize;
use tower_sessions::Session;

use onlylands_core::{PhoneNumber, TokenClaims, UserType};

use crate::middleware::{clear_session, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Phone entry form data.
#[derive(Debug, Deserialize)]
pub struct SendOtpForm {
    pub phone_number: String,
    pub user_type: UserType,
}

/// OTP entry form data.
#[derive(Debug, Deserialize)]
pub struct VerifyOtpForm {
    pub phone_number: String,
    pub otp: String,
    pub user_type: UserType,
}

// =============================================================================
// Templates
// =============================================================================

/// Login-type chooser template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login_choice.html")]
pub struct LoginChoiceTemplate {}

/// Two-step OTP login template (phone entry, then OTP entry).
#[derive(Template, WebTemplate)]
#[template(path = "auth/otp_login.html")]
pub struct OtpLoginTemplate {
    pub user_type_value: String,
    pub user_type_label: String,
    pub otp_sent: bool,
    pub phone_number: String,
    pub error: Option<String>,
    pub info: Option<String>,
}

impl OtpLoginTemplate {
    fn phone_step(user_type: UserType) -> Self {
        Self {
            user_type_value: user_type.to_string(),
            user_type_label: user_type.label().to_string(),
            otp_sent: false,
            phone_number: String::new(),
            error: None,
            info: None,
        }
    }

    fn phone_error(user_type: UserType, phone_number: &str, error: String) -> Self {
        Self {
            phone_number: phone_number.to_string(),
            error: Some(error),
            ..Self::phone_step(user_type)
        }
    }

    fn otp_step(user_type: UserType, phone_number: &str, info: Option<String>) -> Self {
        Self {
            otp_sent: true,
            phone_number: phone_number.to_string(),
            info,
            ..Self::phone_step(user_type)
        }
    }

    fn otp_error(user_type: UserType, phone_number: &str, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::otp_step(user_type, phone_number, None)
        }
    }
}

// =============================================================================
// Login Screens
// =============================================================================

/// Display the login-type chooser.
pub async fn login_choice() -> impl IntoResponse {
    LoginChoiceTemplate {}
}

/// Display the phone entry form for a role.
pub async fn login_form(Path(role): Path<String>) -> Response {
    let Ok(user_type) = role.parse::<UserType>() else {
        return Redirect::to("/login").into_response();
    };

    OtpLoginTemplate::phone_step(user_type).into_response()
}

// =============================================================================
// OTP Actions
// =============================================================================

/// Handle the send-OTP step.
pub async fn send_otp(State(state): State<AppState>, Form(form): Form<SendOtpForm>) -> Response {
    let phone = match PhoneNumber::parse(&form.phone_number) {
        Ok(phone) => phone,
        Err(e) => {
            return OtpLoginTemplate::phone_error(
                form.user_type,
                &form.phone_number,
                e.to_string(),
            )
            .into_response();
        }
    };

    match state.backend().send_otp(&phone, form.user_type).await {
        Ok(resp) => {
            let info = if resp.is_demo_mode() {
                resp.demo_info
                    .unwrap_or_else(|| "Demo mode: use OTP 123456 for testing.".to_string())
            } else {
                resp.message
            };
            OtpLoginTemplate::otp_step(form.user_type, phone.as_str(), Some(info)).into_response()
        }
        Err(e) => {
            tracing::warn!("Failed to send OTP: {e}");
            OtpLoginTemplate::phone_error(form.user_type, phone.as_str(), e.user_message())
                .into_response()
        }
    }
}

/// Handle the verify-OTP step: exchange the code for a bearer token, decode
/// it, and store the session user.
pub async fn verify_otp(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<VerifyOtpForm>,
) -> Response {
    let phone = match PhoneNumber::parse(&form.phone_number) {
        Ok(phone) => phone,
        Err(e) => {
            return OtpLoginTemplate::phone_error(
                form.user_type,
                &form.phone_number,
                e.to_string(),
            )
            .into_response();
        }
    };

    let resp = match state
        .backend()
        .verify_otp(&phone, form.otp.trim(), form.user_type)
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!("OTP verification failed: {e}");
            return OtpLoginTemplate::otp_error(form.user_type, phone.as_str(), e.user_message())
                .into_response();
        }
    };

    let claims = match TokenClaims::decode(&resp.token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::error!("Backend issued an undecodable token: {e}");
            return OtpLoginTemplate::otp_error(
                form.user_type,
                phone.as_str(),
                "Login failed, please try again.".to_string(),
            )
            .into_response();
        }
    };

    let user = CurrentUser::from_claims(claims, resp.token);
    let is_broker = user.is_broker();
    let token = user.token.clone();

    if let Err(e) = set_current_user(&session, &user).await {
        tracing::error!("Failed to set session: {e}");
        return Redirect::to("/login").into_response();
    }

    // A broker's profile may not exist yet; a missing profile is ordinary
    // control flow and just means registration is still pending.
    if is_broker {
        match state.backend().broker_profile(&token).await {
            Ok(profile) => {
                if let Err(e) = session
                    .insert(session_keys::BROKER_REGISTERED, profile.is_some())
                    .await
                {
                    tracing::warn!("Failed to store broker registration flag: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to check broker profile: {e}"),
        }
    }

    Redirect::to("/").into_response()
}

/// Handle logout: flush everything the session holds.
pub async fn logout(State(state): State<AppState>, session: Session) -> Response {
    // Release any staged media before the session forgets the staging id
    if let Ok(Some(staging_id)) = session
        .get::<String>(session_keys::MEDIA_STAGING_ID)
        .await
    {
        state.media().clear(&staging_id).await;
    }

    if let Err(e) = clear_session(&session).await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/").into_response()
}
