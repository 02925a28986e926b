//! Dashboard route handler.
//!
//! The five admin collections load concurrently via one join; the page
//! renders only when all of them resolve.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use tower_sessions::Session;

use onlylands_core::{Listing, PaymentRecord};

use crate::api::AdminApiError;
use crate::middleware::{RequireAdminAuth, force_logout};
use crate::state::AppState;

/// One stat card.
#[derive(Debug, Clone)]
pub struct StatCardView {
    pub title: &'static str,
    pub value: u64,
    pub accent: &'static str,
}

/// Recent listing line.
#[derive(Debug, Clone)]
pub struct RecentListingView {
    pub title: String,
    pub price: String,
    pub status_label: String,
}

/// Recent payment line.
#[derive(Debug, Clone)]
pub struct RecentPaymentView {
    pub order_id: String,
    pub amount: String,
    pub status_label: String,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub username: String,
    pub cards: Vec<StatCardView>,
    pub recent_listings: Vec<RecentListingView>,
    pub recent_payments: Vec<RecentPaymentView>,
    pub error: Option<String>,
}

/// How many recent records each dashboard panel shows.
const RECENT_LIMIT: usize = 5;

fn recent_listings(listings: &[Listing]) -> Vec<RecentListingView> {
    listings
        .iter()
        .rev()
        .take(RECENT_LIMIT)
        .map(|listing| RecentListingView {
            title: listing.title.clone(),
            price: listing.price.clone(),
            status_label: listing.status.label().to_string(),
        })
        .collect()
}

fn recent_payments(payments: &[PaymentRecord]) -> Vec<RecentPaymentView> {
    payments
        .iter()
        .rev()
        .take(RECENT_LIMIT)
        .map(|payment| RecentPaymentView {
            order_id: payment
                .razorpay_order_id
                .clone()
                .unwrap_or_else(|| "N/A".to_string()),
            amount: format!("\u{20b9}{}", payment.amount / 100),
            status_label: payment.status.label().to_string(),
        })
        .collect()
}

/// Display the dashboard.
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Response {
    let client = state.client();
    let token = &admin.token;

    // Fixed fan-out: everything the console needs, fetched together
    let joined = tokio::try_join!(
        client.stats(token),
        client.users(token),
        client.listings(token),
        client.brokers(token),
        client.payments(token),
    );

    match joined {
        Ok((stats, users, listings, brokers, payments)) => {
            let cards = vec![
                StatCardView {
                    title: "Total Users",
                    value: stats.total_users.max(users.len() as u64),
                    accent: "accent-blue",
                },
                StatCardView {
                    title: "Total Listings",
                    value: stats.total_listings.max(listings.len() as u64),
                    accent: "accent-green",
                },
                StatCardView {
                    title: "Active Listings",
                    value: stats.active_listings,
                    accent: "accent-green",
                },
                StatCardView {
                    title: "Pending Listings",
                    value: stats.pending_listings,
                    accent: "accent-yellow",
                },
                StatCardView {
                    title: "Total Brokers",
                    value: stats.total_brokers.max(brokers.len() as u64),
                    accent: "accent-purple",
                },
                StatCardView {
                    title: "Total Payments",
                    value: stats.total_payments.max(payments.len() as u64),
                    accent: "accent-green",
                },
                StatCardView {
                    title: "Completed Payments",
                    value: stats.completed_payments,
                    accent: "accent-green",
                },
            ];

            DashboardTemplate {
                username: admin.username,
                cards,
                recent_listings: recent_listings(&listings),
                recent_payments: recent_payments(&payments),
                error: None,
            }
            .into_response()
        }
        Err(AdminApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to load dashboard: {e}");
            DashboardTemplate {
                username: admin.username,
                cards: Vec::new(),
                recent_listings: Vec::new(),
                recent_payments: Vec::new(),
                error: Some(e.user_message()),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use onlylands_core::{ListingId, ListingStatus, PaymentStatus};

    use super::*;

    fn listing(title: &str) -> Listing {
        Listing {
            listing_id: ListingId::new("l-1"),
            seller_id: None,
            title: title.to_string(),
            location: String::new(),
            area: "1 Acre".to_string(),
            price: "100000".to_string(),
            description: String::new(),
            google_maps_link: None,
            latitude: None,
            longitude: None,
            photos: Vec::new(),
            videos: Vec::new(),
            status: ListingStatus::Active,
            phone_number: None,
            created_at: None,
        }
    }

    #[test]
    fn test_recent_listings_takes_newest_first() {
        let listings: Vec<Listing> = (0..8).map(|i| listing(&format!("L{i}"))).collect();
        let recent = recent_listings(&listings);

        assert_eq!(recent.len(), RECENT_LIMIT);
        assert_eq!(recent[0].title, "L7");
    }

    #[test]
    fn test_recent_payments_formats_paise() {
        let payments = vec![PaymentRecord {
            razorpay_order_id: Some("order_demo_1".to_string()),
            razorpay_payment_id: None,
            listing_id: None,
            user_id: None,
            amount: 29_900,
            currency: "INR".to_string(),
            status: PaymentStatus::Completed,
            demo_mode: true,
            created_at: None,
        }];

        let recent = recent_payments(&payments);
        assert_eq!(recent[0].amount, "\u{20b9}299");
        assert_eq!(recent[0].status_label, "Completed");
    }
}
