//! Post-land form draft.
//!
//! The post-land form is the one form whose state survives reloads: field
//! values autosave into the session and are cleared on successful submit.

use serde::{Deserialize, Serialize};

/// Maximum description length, enforced in the form and again on submit.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Field values of the post-land form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostLandDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub google_maps_link: String,
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
}

impl PostLandDraft {
    /// Whether anything worth restoring has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.location.is_empty()
            && self.area.is_empty()
            && self.price.is_empty()
            && self.description.is_empty()
            && self.google_maps_link.is_empty()
            && self.latitude.is_empty()
            && self.longitude.is_empty()
    }

    /// Check the fields a submit must satisfy. The browser enforces the
    /// same constraints via native form validation; this is the backstop.
    ///
    /// # Errors
    ///
    /// Returns a user-facing message naming the first failed constraint.
    pub fn validate(&self) -> Result<(), String> {
        for (value, label) in [
            (&self.title, "Title"),
            (&self.location, "Location"),
            (&self.area, "Area"),
            (&self.price, "Price"),
            (&self.description, "Description"),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{label} is required"));
            }
        }

        if self.description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(format!(
                "Description must be at most {MAX_DESCRIPTION_CHARS} characters"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_draft() -> PostLandDraft {
        PostLandDraft {
            title: "5 Acre Plot".to_string(),
            location: "Alibag, Raigad".to_string(),
            area: "5 Acres".to_string(),
            price: "500000".to_string(),
            description: "Flat land".to_string(),
            ..PostLandDraft::default()
        }
    }

    #[test]
    fn test_default_draft_is_empty() {
        assert!(PostLandDraft::default().is_empty());
        assert!(!valid_draft().is_empty());
    }

    #[test]
    fn test_validate_accepts_complete_draft() {
        assert!(valid_draft().validate().is_ok());
    }

    #[test]
    fn test_validate_requires_each_field() {
        let mut draft = valid_draft();
        draft.price = "  ".to_string();
        assert_eq!(draft.validate().unwrap_err(), "Price is required");
    }

    #[test]
    fn test_validate_caps_description_at_500_chars() {
        let mut draft = valid_draft();
        draft.description = "x".repeat(MAX_DESCRIPTION_CHARS);
        assert!(draft.validate().is_ok());

        draft.description.push('x');
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_draft_round_trips_through_session_json() {
        let draft = valid_draft();
        let json = serde_json::to_string(&draft).unwrap();
        let back: PostLandDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }
}
