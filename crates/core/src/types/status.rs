//! Status and role enums shared by both binaries.

use serde::{Deserialize, Serialize};

/// Listing lifecycle status.
///
/// A listing is created as `pending_payment` and flips to `active` when the
/// backend verifies the listing fee payment. Only `active` listings appear
/// in public and broker views; that gating is server-enforced and the client
/// filters to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    #[default]
    PendingPayment,
    Active,
    Inactive,
}

impl ListingStatus {
    /// Whether the listing should appear in public and broker views.
    #[must_use]
    pub const fn is_publicly_visible(self) -> bool {
        matches!(self, Self::Active)
    }

    /// Human-readable label for status badges.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PendingPayment => "Pending Payment",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingPayment => write!(f, "pending_payment"),
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
        }
    }
}

/// Account role carried in the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    #[default]
    Seller,
    Broker,
}

impl UserType {
    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Seller => "Seller",
            Self::Broker => "Broker",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seller => write!(f, "seller"),
            Self::Broker => write!(f, "broker"),
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seller" => Ok(Self::Seller),
            "broker" => Ok(Self::Broker),
            _ => Err(format!("invalid user type: {s}")),
        }
    }
}

/// Payment record status as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Created,
    Completed,
    Failed,
}

impl PaymentStatus {
    /// Human-readable label for the admin payments table.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&ListingStatus::PendingPayment).unwrap();
        assert_eq!(json, "\"pending_payment\"");

        let status: ListingStatus = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(status, ListingStatus::Active);
    }

    #[test]
    fn test_only_active_listings_are_publicly_visible() {
        assert!(ListingStatus::Active.is_publicly_visible());
        assert!(!ListingStatus::PendingPayment.is_publicly_visible());
        assert!(!ListingStatus::Inactive.is_publicly_visible());
    }

    #[test]
    fn test_user_type_round_trip() {
        assert_eq!("broker".parse::<UserType>().unwrap(), UserType::Broker);
        assert_eq!(UserType::Seller.to_string(), "seller");
        assert!("admin".parse::<UserType>().is_err());
    }
}
