//! Home page route handler, plus the `/admin` escape hatch.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};

use crate::api::types::PlatformStats;
use crate::middleware::OptionalAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Logged-in user view for the shared nav.
#[derive(Debug, Clone)]
pub struct UserView {
    pub label: String,
    pub is_seller: bool,
    pub is_broker: bool,
}

impl From<&CurrentUser> for UserView {
    fn from(user: &CurrentUser) -> Self {
        Self {
            label: user.user_type.label().to_string(),
            is_seller: user.is_seller(),
            is_broker: user.is_broker(),
        }
    }
}

/// Platform counters shown on the home page.
#[derive(Debug, Clone)]
pub struct StatsView {
    pub total_listings: u64,
    pub active_listings: u64,
    pub total_brokers: u64,
    pub active_brokers: u64,
    pub total_payments: u64,
}

impl From<PlatformStats> for StatsView {
    fn from(stats: PlatformStats) -> Self {
        Self {
            total_listings: stats.total_listings,
            active_listings: stats.active_listings,
            total_brokers: stats.total_brokers,
            active_brokers: stats.active_brokers,
            total_payments: stats.total_payments,
        }
    }
}

/// Featured location tile.
#[derive(Debug, Clone)]
pub struct FeaturedLocation {
    pub name: &'static str,
    pub tagline: &'static str,
}

fn featured_locations() -> Vec<FeaturedLocation> {
    vec![
        FeaturedLocation {
            name: "Alibag",
            tagline: "Coastal Properties",
        },
        FeaturedLocation {
            name: "Nagpur",
            tagline: "Agricultural Land",
        },
        FeaturedLocation {
            name: "Lonavala",
            tagline: "Hill Station Plots",
        },
        FeaturedLocation {
            name: "Karjat",
            tagline: "Farmland & Villas",
        },
    ]
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user: Option<UserView>,
    pub stats: Option<StatsView>,
    pub featured: Vec<FeaturedLocation>,
}

/// Display the home page.
///
/// Stats are decorative; the page renders without them when the call fails.
pub async fn home(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> impl IntoResponse {
    let stats = match state.backend().stats().await {
        Ok(stats) => Some(StatsView::from(stats)),
        Err(e) => {
            tracing::debug!("Failed to fetch platform stats: {e}");
            None
        }
    };

    HomeTemplate {
        user: user.as_ref().map(UserView::from),
        stats,
        featured: featured_locations(),
    }
}

/// `/admin` always leads to the admin console, whatever else is going on.
pub async fn admin_redirect(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.config().admin_console_url)
}
