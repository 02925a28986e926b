//! Per-session staging for listing media.
//!
//! Selected photos and videos are held server-side until the post-land form
//! submits. Each session owns one staging entry, keyed by a random staging
//! id stored in the session; previews render straight out of the entry.
//! Entries are released on removal and on submit, and carry a TTL so an
//! abandoned form cannot hold media forever.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use moka::future::Cache;
use rand::Rng as _;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum photos per listing.
pub const MAX_PHOTOS: usize = 5;

/// Maximum videos per listing.
pub const MAX_VIDEOS: usize = 2;

/// How long an abandoned staging entry survives.
const STAGING_TTL: Duration = Duration::from_secs(30 * 60);

/// Errors that can occur when staging media.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The new batch would push the kind over its cap. Nothing is staged.
    #[error("adding {added} {kind} would exceed the limit of {max} ({existing} already selected)")]
    OverCap {
        kind: MediaKind,
        added: usize,
        existing: usize,
        max: usize,
    },
    /// No staged file at the given index.
    #[error("no staged file at index {0}")]
    IndexOutOfRange(usize),
}

/// Which media slot a file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    /// Per-type staging cap.
    #[must_use]
    pub const fn cap(self) -> usize {
        match self {
            Self::Photo => MAX_PHOTOS,
            Self::Video => MAX_VIDEOS,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Photo => write!(f, "photos"),
            Self::Video => write!(f, "videos"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photos" => Ok(Self::Photo),
            "videos" => Ok(Self::Video),
            _ => Err(format!("unknown media kind: {s}")),
        }
    }
}

/// One staged upload: the bytes plus what the preview route needs.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// All media staged for one post-land form.
#[derive(Debug, Clone, Default)]
pub struct StagedMedia {
    pub photos: Vec<StagedFile>,
    pub videos: Vec<StagedFile>,
}

impl StagedMedia {
    fn files(&self, kind: MediaKind) -> &Vec<StagedFile> {
        match kind {
            MediaKind::Photo => &self.photos,
            MediaKind::Video => &self.videos,
        }
    }

    fn files_mut(&mut self, kind: MediaKind) -> &mut Vec<StagedFile> {
        match kind {
            MediaKind::Photo => &mut self.photos,
            MediaKind::Video => &mut self.videos,
        }
    }
}

/// Staging store shared through the application state.
///
/// Values are `Arc<Mutex<_>>` so concurrent requests from the same session
/// (preview fetches racing an add) see one consistent entry.
#[derive(Clone)]
pub struct MediaStaging {
    entries: Cache<String, Arc<Mutex<StagedMedia>>>,
}

impl MediaStaging {
    /// Create an empty staging store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(1024)
                .time_to_live(STAGING_TTL)
                .build(),
        }
    }

    /// Allocate a fresh staging id for a session.
    #[must_use]
    pub fn new_staging_id() -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(24)
            .map(char::from)
            .collect()
    }

    /// Stage a new batch of files.
    ///
    /// The whole batch is rejected if it would push the kind over its cap;
    /// the existing set is left unchanged in that case.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::OverCap`] when the batch does not fit.
    pub async fn add(
        &self,
        staging_id: &str,
        kind: MediaKind,
        files: Vec<StagedFile>,
    ) -> Result<(), MediaError> {
        let entry = self.entry(staging_id).await;
        let mut media = entry.lock().unwrap_or_else(PoisonError::into_inner);

        let existing = media.files(kind).len();
        if existing + files.len() > kind.cap() {
            return Err(MediaError::OverCap {
                kind,
                added: files.len(),
                existing,
                max: kind.cap(),
            });
        }

        media.files_mut(kind).extend(files);
        Ok(())
    }

    /// Remove one staged file (and thereby its preview) at the given index.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::IndexOutOfRange`] if nothing is staged there.
    pub async fn remove(
        &self,
        staging_id: &str,
        kind: MediaKind,
        index: usize,
    ) -> Result<(), MediaError> {
        let entry = self.entry(staging_id).await;
        let mut media = entry.lock().unwrap_or_else(PoisonError::into_inner);

        let files = media.files_mut(kind);
        if index >= files.len() {
            return Err(MediaError::IndexOutOfRange(index));
        }
        files.remove(index);
        Ok(())
    }

    /// Fetch one staged file for preview rendering.
    pub async fn preview(
        &self,
        staging_id: &str,
        kind: MediaKind,
        index: usize,
    ) -> Option<StagedFile> {
        let entry = self.entries.get(staging_id).await?;
        let media = entry.lock().unwrap_or_else(PoisonError::into_inner);
        media.files(kind).get(index).cloned()
    }

    /// Snapshot the staged set for rendering or submission.
    ///
    /// The entry stays in place; call [`Self::clear`] once the submit has
    /// actually succeeded.
    pub async fn snapshot(&self, staging_id: &str) -> StagedMedia {
        match self.entries.get(staging_id).await {
            Some(entry) => entry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            None => StagedMedia::default(),
        }
    }

    /// Release a staging entry and everything in it.
    pub async fn clear(&self, staging_id: &str) {
        self.entries.invalidate(staging_id).await;
    }

    async fn entry(&self, staging_id: &str) -> Arc<Mutex<StagedMedia>> {
        self.entries
            .get_with(staging_id.to_owned(), async {
                Arc::new(Mutex::new(StagedMedia::default()))
            })
            .await
    }
}

impl Default for MediaStaging {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn file(name: &str) -> StagedFile {
        StagedFile {
            file_name: name.to_owned(),
            content_type: "image/jpeg".to_owned(),
            bytes: vec![0xFF, 0xD8],
        }
    }

    fn batch(n: usize) -> Vec<StagedFile> {
        (0..n).map(|i| file(&format!("f{i}.jpg"))).collect()
    }

    #[tokio::test]
    async fn test_add_within_cap_appends() {
        let staging = MediaStaging::new();
        staging.add("s1", MediaKind::Photo, batch(3)).await.unwrap();
        staging.add("s1", MediaKind::Photo, batch(2)).await.unwrap();

        let media = staging.snapshot("s1").await;
        assert_eq!(media.photos.len(), 5);
        assert!(media.videos.is_empty());
    }

    #[tokio::test]
    async fn test_over_cap_rejects_whole_batch_and_keeps_existing() {
        let staging = MediaStaging::new();
        staging.add("s1", MediaKind::Photo, batch(4)).await.unwrap();

        let err = staging
            .add("s1", MediaKind::Photo, batch(2))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            MediaError::OverCap {
                kind: MediaKind::Photo,
                added: 2,
                existing: 4,
                max: 5
            }
        );

        // Existing set unchanged
        assert_eq!(staging.snapshot("s1").await.photos.len(), 4);
    }

    #[tokio::test]
    async fn test_video_cap_is_two() {
        let staging = MediaStaging::new();
        staging.add("s1", MediaKind::Video, batch(2)).await.unwrap();
        assert!(staging.add("s1", MediaKind::Video, batch(1)).await.is_err());
        assert_eq!(staging.snapshot("s1").await.videos.len(), 2);
    }

    #[tokio::test]
    async fn test_remove_drops_file_and_preview_at_same_index() {
        let staging = MediaStaging::new();
        staging.add("s1", MediaKind::Photo, batch(3)).await.unwrap();

        staging.remove("s1", MediaKind::Photo, 1).await.unwrap();

        let media = staging.snapshot("s1").await;
        assert_eq!(media.photos.len(), 2);
        assert_eq!(media.photos[0].file_name, "f0.jpg");
        assert_eq!(media.photos[1].file_name, "f2.jpg");

        // Preview for the removed slot now shows the shifted file
        let preview = staging.preview("s1", MediaKind::Photo, 1).await.unwrap();
        assert_eq!(preview.file_name, "f2.jpg");
        assert!(staging.preview("s1", MediaKind::Photo, 2).await.is_none());
    }

    #[tokio::test]
    async fn test_remove_out_of_range_errors() {
        let staging = MediaStaging::new();
        staging.add("s1", MediaKind::Photo, batch(1)).await.unwrap();
        assert_eq!(
            staging.remove("s1", MediaKind::Photo, 5).await.unwrap_err(),
            MediaError::IndexOutOfRange(5)
        );
    }

    #[tokio::test]
    async fn test_clear_releases_entry() {
        let staging = MediaStaging::new();
        staging.add("s1", MediaKind::Photo, batch(2)).await.unwrap();
        staging.clear("s1").await;

        assert!(staging.snapshot("s1").await.photos.is_empty());
        assert!(staging.preview("s1", MediaKind::Photo, 0).await.is_none());
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let staging = MediaStaging::new();
        staging.add("s1", MediaKind::Photo, batch(5)).await.unwrap();

        // A different session still has the full allowance
        staging.add("s2", MediaKind::Photo, batch(5)).await.unwrap();
    }

    #[test]
    fn test_staging_ids_are_distinct() {
        let a = MediaStaging::new_staging_id();
        let b = MediaStaging::new_staging_id();
        assert_eq!(a.len(), 24);
        assert_ne!(a, b);
    }
}
