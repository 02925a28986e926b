//! Listing read and creation endpoints.

use onlylands_core::ListingId;

use crate::media::StagedFile;
use crate::models::draft::PostLandDraft;

use super::types::{Listing, ListingsResponse, PlatformStats, PostLandResponse};
use super::{ApiError, BackendClient, decode_response};

impl BackendClient {
    /// `GET /api/listings` - active listings, public.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend is unreachable or errors.
    pub async fn listings(&self) -> Result<Vec<Listing>, ApiError> {
        let resp: ListingsResponse = self.get_json("/api/listings", None).await?;
        Ok(resp.listings)
    }

    /// `GET /api/my-listings` - the authenticated seller's listings, any
    /// status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the token has expired.
    pub async fn my_listings(&self, token: &str) -> Result<Vec<Listing>, ApiError> {
        let resp: ListingsResponse = self.get_json("/api/my-listings", Some(token)).await?;
        Ok(resp.listings)
    }

    /// `GET /api/stats` - public platform counters for the home page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the backend is unreachable or errors.
    pub async fn stats(&self) -> Result<PlatformStats, ApiError> {
        self.get_json("/api/stats", None).await
    }

    /// `POST /api/post-land` - create a listing from the form fields plus
    /// staged media, as one multipart request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the upload or creation fails; the draft and
    /// staged media stay untouched so the caller can retry.
    pub async fn post_land(
        &self,
        token: &str,
        fields: &PostLandDraft,
        photos: Vec<StagedFile>,
        videos: Vec<StagedFile>,
    ) -> Result<ListingId, ApiError> {
        let mut form = reqwest::multipart::Form::new()
            .text("title", fields.title.clone())
            .text("location", fields.location.clone())
            .text("area", fields.area.clone())
            .text("price", fields.price.clone())
            .text("description", fields.description.clone())
            .text("google_maps_link", fields.google_maps_link.clone())
            .text("latitude", fields.latitude.clone())
            .text("longitude", fields.longitude.clone());

        for photo in photos {
            form = form.part("photos", media_part(photo)?);
        }
        for video in videos {
            form = form.part("videos", media_part(video)?);
        }

        let response = self
            .http()
            .post(self.url("/api/post-land"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        let resp: PostLandResponse = decode_response(response).await?;
        Ok(resp.listing_id)
    }
}

/// Convert a staged file into a multipart part with its original filename
/// and content type.
fn media_part(file: StagedFile) -> Result<reqwest::multipart::Part, ApiError> {
    let part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
    Ok(part.mime_str(&file.content_type)?)
}
