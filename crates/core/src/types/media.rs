//! Media references returned by the backend.
//!
//! Listing media arrives in three historical shapes: an object with an
//! `s3_url` (current S3 storage), an object with `content_type` + base64
//! `data` (legacy inline storage), or a bare string holding an https URL or
//! a `data:` URI. `MediaRef` models them as one tagged union resolved
//! through a single mapping function.

use serde::{Deserialize, Serialize};

/// A reference to an uploaded photo or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    /// S3-backed media with a direct URL.
    S3 {
        /// Public object URL.
        s3_url: String,
    },
    /// Legacy media stored inline as base64.
    Inline {
        /// MIME type of the encoded payload.
        content_type: String,
        /// Base64-encoded file contents.
        data: String,
    },
    /// Bare URL or `data:` URI.
    Plain(String),
}

impl MediaRef {
    /// Resolve to a source URL usable in an `img`/`video` element.
    #[must_use]
    pub fn src(&self) -> String {
        match self {
            Self::S3 { s3_url } => s3_url.clone(),
            Self::Inline { content_type, data } => {
                format!("data:{content_type};base64,{data}")
            }
            Self::Plain(url) => url.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_s3_object_form() {
        let media: MediaRef =
            serde_json::from_str(r#"{"s3_url": "https://bucket.s3.amazonaws.com/photos/a.jpg"}"#)
                .unwrap();
        assert_eq!(media.src(), "https://bucket.s3.amazonaws.com/photos/a.jpg");
    }

    #[test]
    fn test_deserialize_legacy_inline_form() {
        let media: MediaRef =
            serde_json::from_str(r#"{"content_type": "image/png", "data": "aGVsbG8="}"#).unwrap();
        assert_eq!(media.src(), "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn test_deserialize_bare_string_forms() {
        let url: MediaRef = serde_json::from_str(r#""https://cdn.example.com/x.jpg""#).unwrap();
        assert_eq!(url.src(), "https://cdn.example.com/x.jpg");

        let data_uri: MediaRef =
            serde_json::from_str(r#""data:image/jpeg;base64,aGVsbG8=""#).unwrap();
        assert_eq!(data_uri.src(), "data:image/jpeg;base64,aGVsbG8=");
    }

    #[test]
    fn test_object_forms_win_over_plain_string() {
        // An object with extra keys still decodes as the S3 variant
        let media: MediaRef = serde_json::from_str(
            r#"{"s3_url": "https://bucket.s3.amazonaws.com/a.jpg", "uploaded_at": "2025-01-01"}"#,
        )
        .unwrap();
        assert!(matches!(media, MediaRef::S3 { .. }));
    }
}
