//! Listing browsing: the public grid, the detail view, and the seller's
//! own listings.
//!
//! Filtering is pure in-memory work over an already-fetched set: one fetch
//! on entry, then search text, location, and price bucket narrowing.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use onlylands_core::{ListingStatus, MediaRef, PhoneNumber};

use crate::api::ApiError;
use crate::api::types::Listing;
use crate::error::AppError;
use crate::middleware::{RequireAuth, force_logout};
use crate::state::AppState;

// =============================================================================
// Filters
// =============================================================================

/// Grid filter query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListingFilterQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// Price buckets offered in the filter bar. Prices are free text ("50
/// Lakhs", "500000"), so bucketing keys off the digits alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBucket {
    Under1Lac,
    OneToFiveLac,
    FiveToTenLac,
    Above10Lac,
}

impl PriceBucket {
    /// Parse the filter-bar value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "under-1lac" => Some(Self::Under1Lac),
            "1lac-5lac" => Some(Self::OneToFiveLac),
            "5lac-10lac" => Some(Self::FiveToTenLac),
            "above-10lac" => Some(Self::Above10Lac),
            _ => None,
        }
    }

    /// Whether a free-text price falls in this bucket.
    #[must_use]
    pub fn contains(self, price: &str) -> bool {
        let Some(value) = price_digits(price) else {
            return false;
        };
        match self {
            Self::Under1Lac => value < 100_000,
            Self::OneToFiveLac => (100_000..=500_000).contains(&value),
            Self::FiveToTenLac => (500_000..=1_000_000).contains(&value),
            Self::Above10Lac => value > 1_000_000,
        }
    }
}

/// Digits-only reading of a free-text price.
fn price_digits(price: &str) -> Option<u64> {
    let digits: String = price.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Apply the grid filters over an already-fetched set.
///
/// Only publicly visible listings survive, whatever the backend returned.
#[must_use]
pub fn filter_listings(listings: &[Listing], query: &ListingFilterQuery) -> Vec<Listing> {
    let search = query
        .q
        .as_deref()
        .map(str::to_lowercase)
        .filter(|s| !s.is_empty());
    let location = query.location.as_deref().filter(|s| !s.is_empty());
    let bucket = query.price.as_deref().and_then(PriceBucket::parse);

    listings
        .iter()
        .filter(|listing| listing.status.is_publicly_visible())
        .filter(|listing| {
            search.as_deref().is_none_or(|term| {
                listing.title.to_lowercase().contains(term)
                    || listing.description.to_lowercase().contains(term)
                    || listing.location.to_lowercase().contains(term)
            })
        })
        .filter(|listing| location.is_none_or(|loc| listing.location == loc))
        .filter(|listing| bucket.is_none_or(|b| b.contains(&listing.price)))
        .cloned()
        .collect()
}

/// Unique, sorted locations for the filter dropdown.
fn unique_locations(listings: &[Listing]) -> Vec<String> {
    let mut locations: Vec<String> = listings
        .iter()
        .filter(|listing| listing.status.is_publicly_visible())
        .map(|listing| listing.location.clone())
        .filter(|location| !location.is_empty())
        .collect();
    locations.sort();
    locations.dedup();
    locations
}

// =============================================================================
// View Types
// =============================================================================

/// Listing card data for grid templates.
#[derive(Debug, Clone)]
pub struct ListingCardView {
    pub listing_id: String,
    pub title: String,
    pub location: String,
    pub area: String,
    pub price: String,
    pub description: String,
    pub photo_src: Option<String>,
    pub photo_count: usize,
    pub video_count: usize,
    pub status_label: String,
    pub status_class: String,
    pub is_pending_payment: bool,
}

impl From<&Listing> for ListingCardView {
    fn from(listing: &Listing) -> Self {
        Self {
            listing_id: listing.listing_id.to_string(),
            title: listing.title.clone(),
            location: listing.location.clone(),
            area: listing.area.clone(),
            price: listing.price.clone(),
            description: listing.description.clone(),
            photo_src: listing.photos.first().map(MediaRef::src),
            photo_count: listing.photos.len(),
            video_count: listing.videos.len(),
            status_label: listing.status.label().to_string(),
            status_class: status_class(listing.status).to_string(),
            is_pending_payment: listing.status == ListingStatus::PendingPayment,
        }
    }
}

/// Listing detail data for the show template.
#[derive(Debug, Clone)]
pub struct ListingDetailView {
    pub title: String,
    pub location: String,
    pub area: String,
    pub price: String,
    pub description: String,
    pub photos: Vec<String>,
    pub videos: Vec<String>,
    pub coordinates: Option<String>,
    pub google_maps_link: Option<String>,
    pub whatsapp_url: Option<String>,
    pub created_at: Option<String>,
    pub status_label: String,
    pub status_class: String,
}

impl From<&Listing> for ListingDetailView {
    fn from(listing: &Listing) -> Self {
        let coordinates = match (listing.latitude.as_deref(), listing.longitude.as_deref()) {
            (Some(lat), Some(lng)) if !lat.is_empty() && !lng.is_empty() => {
                Some(format!("{lat}, {lng}"))
            }
            _ => None,
        };

        Self {
            title: listing.title.clone(),
            location: listing.location.clone(),
            area: listing.area.clone(),
            price: listing.price.clone(),
            description: listing.description.clone(),
            photos: listing.photos.iter().map(MediaRef::src).collect(),
            videos: listing.videos.iter().map(MediaRef::src).collect(),
            coordinates,
            google_maps_link: listing
                .google_maps_link
                .clone()
                .filter(|link| !link.is_empty()),
            whatsapp_url: listing
                .phone_number
                .as_deref()
                .and_then(|phone| whatsapp_contact_url(phone, &listing.title, &listing.location)),
            created_at: listing.created_at.clone(),
            status_label: listing.status.label().to_string(),
            status_class: status_class(listing.status).to_string(),
        }
    }
}

const fn status_class(status: ListingStatus) -> &'static str {
    match status {
        ListingStatus::Active => "badge-active",
        ListingStatus::PendingPayment => "badge-pending",
        ListingStatus::Inactive => "badge-inactive",
    }
}

/// Build a `wa.me` deep link for contacting a listing owner.
#[must_use]
pub fn whatsapp_contact_url(phone: &str, title: &str, location: &str) -> Option<String> {
    let phone = PhoneNumber::parse(phone).ok()?;
    let message = format!(
        "Hi! I'm interested in your land listing: {title} in {location}. Can we discuss the details?"
    );
    Some(format!(
        "https://wa.me/{}?text={}",
        phone.wa_me(),
        urlencoding::encode(&message)
    ))
}

// =============================================================================
// Templates
// =============================================================================

/// Public listings grid template.
#[derive(Template, WebTemplate)]
#[template(path = "listings/index.html")]
pub struct ListingsTemplate {
    pub listings: Vec<ListingCardView>,
    pub locations: Vec<String>,
    pub q: String,
    pub location: String,
    pub price: String,
    pub error: Option<String>,
}

/// Listing detail template.
#[derive(Template, WebTemplate)]
#[template(path = "listings/show.html")]
pub struct ListingDetailTemplate {
    pub listing: ListingDetailView,
}

/// Seller's own listings template.
#[derive(Template, WebTemplate)]
#[template(path = "listings/my_listings.html")]
pub struct MyListingsTemplate {
    pub listings: Vec<ListingCardView>,
    pub error: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the public listings grid.
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListingFilterQuery>,
) -> impl IntoResponse {
    let (listings, locations, error) = match state.backend().listings().await {
        Ok(listings) => {
            let locations = unique_locations(&listings);
            let filtered = filter_listings(&listings, &query);
            (filtered, locations, None)
        }
        Err(e) => {
            tracing::warn!("Failed to fetch listings: {e}");
            (Vec::new(), Vec::new(), Some(e.user_message()))
        }
    };

    ListingsTemplate {
        listings: listings.iter().map(ListingCardView::from).collect(),
        locations,
        q: query.q.unwrap_or_default(),
        location: query.location.unwrap_or_default(),
        price: query.price.unwrap_or_default(),
        error,
    }
}

/// Display one listing in full.
///
/// The backend has no single-listing endpoint; the detail view works off
/// the same fetched set as the grid.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let listings = state.backend().listings().await?;

    let listing = listings
        .iter()
        .find(|listing| listing.listing_id.as_str() == id)
        .ok_or_else(|| AppError::NotFound(format!("listing {id}")))?;

    Ok(ListingDetailTemplate {
        listing: ListingDetailView::from(listing),
    }
    .into_response())
}

/// Display the authenticated seller's listings, any status.
pub async fn my_listings(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Response {
    match state.backend().my_listings(&user.token).await {
        Ok(listings) => MyListingsTemplate {
            listings: listings.iter().map(ListingCardView::from).collect(),
            error: None,
        }
        .into_response(),
        Err(ApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to fetch my listings: {e}");
            MyListingsTemplate {
                listings: Vec::new(),
                error: Some(e.user_message()),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use onlylands_core::ListingId;

    use super::*;

    fn listing(id: &str, title: &str, location: &str, price: &str, status: ListingStatus) -> Listing {
        Listing {
            listing_id: ListingId::new(id),
            seller_id: None,
            title: title.to_string(),
            location: location.to_string(),
            area: "5 Acres".to_string(),
            price: price.to_string(),
            description: "Flat land with road access".to_string(),
            google_maps_link: None,
            latitude: None,
            longitude: None,
            photos: Vec::new(),
            videos: Vec::new(),
            status,
            phone_number: None,
            created_at: None,
        }
    }

    fn mixed_set() -> Vec<Listing> {
        vec![
            listing("l-1", "Coastal plot in Alibag", "Alibag", "80 Lakhs", ListingStatus::Active),
            listing("l-2", "Farmland near Nagpur", "Nagpur", "450000", ListingStatus::Active),
            listing("l-3", "Hidden pending plot", "Alibag", "90000", ListingStatus::PendingPayment),
            listing("l-4", "Retired listing", "Karjat", "2000000", ListingStatus::Inactive),
        ]
    }

    #[test]
    fn test_filter_hides_everything_not_active() {
        let filtered = filter_listings(&mixed_set(), &ListingFilterQuery::default());
        let ids: Vec<&str> = filtered.iter().map(|l| l.listing_id.as_str()).collect();
        assert_eq!(ids, vec!["l-1", "l-2"]);
    }

    #[test]
    fn test_search_matches_title_description_and_location() {
        let query = ListingFilterQuery {
            q: Some("nagpur".to_string()),
            ..ListingFilterQuery::default()
        };
        let filtered = filter_listings(&mixed_set(), &query);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].listing_id.as_str(), "l-2");

        let query = ListingFilterQuery {
            q: Some("road access".to_string()),
            ..ListingFilterQuery::default()
        };
        assert_eq!(filter_listings(&mixed_set(), &query).len(), 2);
    }

    #[test]
    fn test_location_filter_is_exact() {
        let query = ListingFilterQuery {
            location: Some("Alibag".to_string()),
            ..ListingFilterQuery::default()
        };
        let filtered = filter_listings(&mixed_set(), &query);
        // l-3 is in Alibag but pending, so only l-1 survives
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].listing_id.as_str(), "l-1");
    }

    #[test]
    fn test_price_bucket_filter_reads_digits_from_free_text() {
        let query = ListingFilterQuery {
            price: Some("1lac-5lac".to_string()),
            ..ListingFilterQuery::default()
        };
        let filtered = filter_listings(&mixed_set(), &query);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].listing_id.as_str(), "l-2");
    }

    #[test]
    fn test_price_digits() {
        assert_eq!(price_digits("500000"), Some(500_000));
        assert_eq!(price_digits("₹5,00,000"), Some(500_000));
        assert_eq!(price_digits("50 Lakhs"), Some(50));
        assert_eq!(price_digits("negotiable"), None);
    }

    #[test]
    fn test_price_bucket_boundaries() {
        assert!(PriceBucket::Under1Lac.contains("99999"));
        assert!(!PriceBucket::Under1Lac.contains("100000"));
        assert!(PriceBucket::OneToFiveLac.contains("100000"));
        assert!(PriceBucket::OneToFiveLac.contains("500000"));
        assert!(PriceBucket::Above10Lac.contains("1000001"));
        assert!(!PriceBucket::Above10Lac.contains("negotiable"));
    }

    #[test]
    fn test_unknown_bucket_value_is_ignored() {
        let query = ListingFilterQuery {
            price: Some("everything".to_string()),
            ..ListingFilterQuery::default()
        };
        assert_eq!(filter_listings(&mixed_set(), &query).len(), 2);
    }

    #[test]
    fn test_unique_locations_skips_hidden_listings() {
        let locations = unique_locations(&mixed_set());
        assert_eq!(locations, vec!["Alibag", "Nagpur"]);
    }

    #[test]
    fn test_whatsapp_contact_url() {
        let url = whatsapp_contact_url("+91 9876543210", "5 Acre Plot", "Alibag").unwrap();
        assert!(url.starts_with("https://wa.me/919876543210?text="));
        assert!(url.contains("5%20Acre%20Plot"));

        assert!(whatsapp_contact_url("not-a-number", "t", "l").is_none());
    }

    #[test]
    fn test_card_view_surfaces_first_photo_and_counts() {
        let mut l = listing("l-1", "Plot", "Alibag", "80 Lakhs", ListingStatus::Active);
        l.photos = vec![
            MediaRef::Plain("https://cdn.example.com/a.jpg".to_string()),
            MediaRef::Plain("https://cdn.example.com/b.jpg".to_string()),
        ];

        let card = ListingCardView::from(&l);
        assert_eq!(card.photo_src.as_deref(), Some("https://cdn.example.com/a.jpg"));
        assert_eq!(card.photo_count, 2);
        assert_eq!(card.video_count, 0);
        assert!(!card.is_pending_payment);
    }
}
