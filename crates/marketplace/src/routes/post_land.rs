//! Post-land form: draft persistence, media staging, and submission.
//!
//! This is the one form whose state survives reloads. Field values
//! autosave into the session draft; selected files stage server-side with
//! per-type caps. Submit packages both into a single multipart call to the
//! backend and clears draft and staging only after it succeeds.

use askama::Template;
use askama_web::WebTemplate;
use axum::Form;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;

use crate::api::ApiError;
use crate::error::AppError;
use crate::media::{MediaKind, StagedFile, StagedMedia};
use crate::middleware::{RequireAuth, force_logout};
use crate::models::draft::{MAX_DESCRIPTION_CHARS, PostLandDraft};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Preview tile for one staged file.
#[derive(Debug, Clone)]
pub struct PreviewView {
    pub src: String,
    pub remove_url: String,
    pub file_name: String,
}

/// Post-land form template.
#[derive(Template, WebTemplate)]
#[template(path = "post_land.html")]
pub struct PostLandTemplate {
    pub draft: PostLandDraft,
    pub draft_restored: bool,
    pub photos: Vec<PreviewView>,
    pub videos: Vec<PreviewView>,
    pub photos_full: bool,
    pub videos_full: bool,
    pub max_description: usize,
    pub error: Option<String>,
}

fn preview_views(kind: MediaKind, files: &[StagedFile]) -> Vec<PreviewView> {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| PreviewView {
            src: format!("/post-land/media/{kind}/{index}"),
            remove_url: format!("/post-land/media/{kind}/{index}/remove"),
            file_name: file.file_name.clone(),
        })
        .collect()
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn load_draft(session: &Session) -> PostLandDraft {
    session
        .get::<PostLandDraft>(session_keys::POST_LAND_DRAFT)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

async fn staging_id(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::MEDIA_STAGING_ID)
        .await
        .ok()
        .flatten()
}

async fn staging_id_or_create(session: &Session, state: &AppState) -> String {
    if let Some(id) = staging_id(session).await {
        return id;
    }
    let id = crate::media::MediaStaging::new_staging_id();
    if let Err(e) = session
        .insert(session_keys::MEDIA_STAGING_ID, id.clone())
        .await
    {
        tracing::warn!("Failed to store staging id in session: {e}");
    }
    // Make sure the entry exists so previews have something to read
    let _ = state.media().snapshot(&id).await;
    id
}

async fn render_form(
    state: &AppState,
    session: &Session,
    draft: Option<PostLandDraft>,
    error: Option<String>,
) -> PostLandTemplate {
    let (draft, draft_restored) = match draft {
        Some(draft) => (draft, false),
        None => {
            let draft = load_draft(session).await;
            let restored = !draft.is_empty();
            (draft, restored)
        }
    };

    let media = match staging_id(session).await {
        Some(id) => state.media().snapshot(&id).await,
        None => StagedMedia::default(),
    };

    PostLandTemplate {
        photos: preview_views(MediaKind::Photo, &media.photos),
        videos: preview_views(MediaKind::Video, &media.videos),
        photos_full: media.photos.len() >= MediaKind::Photo.cap(),
        videos_full: media.videos.len() >= MediaKind::Video.cap(),
        max_description: MAX_DESCRIPTION_CHARS,
        draft,
        draft_restored,
        error,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the post-land form, prefilled from the session draft.
pub async fn form(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
) -> Response {
    if !user.is_seller() {
        return Redirect::to("/").into_response();
    }

    render_form(&state, &session, None, None).await.into_response()
}

/// Autosave the draft fields. Called by the form's change listener; also
/// the reason a reload restores what was typed.
pub async fn save_draft(
    session: Session,
    RequireAuth(_user): RequireAuth,
    Form(draft): Form<PostLandDraft>,
) -> Result<StatusCode, AppError> {
    session
        .insert(session_keys::POST_LAND_DRAFT, &draft)
        .await
        .map_err(|e| AppError::Internal(format!("failed to persist draft: {e}")))?;

    Ok(StatusCode::NO_CONTENT)
}

/// Stage a batch of selected files.
///
/// The whole batch is rejected when it would push the type over its cap
/// (5 photos / 2 videos); the existing selection stays untouched.
pub async fn add_media(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let kind: MediaKind = kind
        .parse()
        .map_err(|_| AppError::NotFound(format!("media kind {kind}")))?;

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("files") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_owned();
        if file_name.is_empty() {
            continue;
        }
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        if bytes.is_empty() {
            continue;
        }

        files.push(StagedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    if files.is_empty() {
        return Ok(Redirect::to("/post-land").into_response());
    }

    let id = staging_id_or_create(&session, &state).await;
    match state.media().add(&id, kind, files).await {
        Ok(()) => Ok(Redirect::to("/post-land").into_response()),
        Err(e) => Ok(render_form(&state, &session, None, Some(e.to_string()))
            .await
            .into_response()),
    }
}

/// Serve a staged file as its preview.
pub async fn preview_media(
    State(state): State<AppState>,
    session: Session,
    Path((kind, index)): Path<(String, usize)>,
) -> Result<Response, AppError> {
    let kind: MediaKind = kind
        .parse()
        .map_err(|_| AppError::NotFound(format!("media kind {kind}")))?;

    let id = staging_id(&session)
        .await
        .ok_or_else(|| AppError::NotFound("no staged media".to_string()))?;

    let file = state
        .media()
        .preview(&id, kind, index)
        .await
        .ok_or_else(|| AppError::NotFound(format!("staged {kind} at index {index}")))?;

    Ok(([(header::CONTENT_TYPE, file.content_type)], file.bytes).into_response())
}

/// Remove one staged file and its preview.
pub async fn remove_media(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(_user): RequireAuth,
    Path((kind, index)): Path<(String, usize)>,
) -> Result<Redirect, AppError> {
    let kind: MediaKind = kind
        .parse()
        .map_err(|_| AppError::NotFound(format!("media kind {kind}")))?;

    if let Some(id) = staging_id(&session).await
        && let Err(e) = state.media().remove(&id, kind, index).await
    {
        // A stale form can point at an index that is already gone
        tracing::debug!("Remove ignored: {e}");
    }

    Ok(Redirect::to("/post-land"))
}

/// Submit the listing: fields plus staged media, one multipart call.
///
/// Draft and staged media are only released once the backend confirms the
/// listing, so a failed submit loses nothing.
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(user): RequireAuth,
    Form(draft): Form<PostLandDraft>,
) -> Response {
    if let Err(message) = draft.validate() {
        return render_form(&state, &session, Some(draft), Some(message))
            .await
            .into_response();
    }

    // Keep the latest field values; they are the draft to restore on failure
    if let Err(e) = session
        .insert(session_keys::POST_LAND_DRAFT, &draft)
        .await
    {
        tracing::warn!("Failed to persist draft before submit: {e}");
    }

    let id = staging_id(&session).await;
    let media = match &id {
        Some(id) => state.media().snapshot(id).await,
        None => StagedMedia::default(),
    };

    match state
        .backend()
        .post_land(&user.token, &draft, media.photos, media.videos)
        .await
    {
        Ok(listing_id) => {
            // Success releases the draft and the staged previews
            if let Err(e) = session
                .remove::<PostLandDraft>(session_keys::POST_LAND_DRAFT)
                .await
            {
                tracing::warn!("Failed to clear draft: {e}");
            }
            if let Some(id) = id {
                state.media().clear(&id).await;
                if let Err(e) = session
                    .remove::<String>(session_keys::MEDIA_STAGING_ID)
                    .await
                {
                    tracing::warn!("Failed to clear staging id: {e}");
                }
            }

            Redirect::to(&format!("/pay/{listing_id}")).into_response()
        }
        Err(ApiError::Unauthorized) => force_logout(&session).await,
        Err(e) => {
            tracing::warn!("Failed to submit listing: {e}");
            render_form(&state, &session, Some(draft), Some(e.user_message()))
                .await
                .into_response()
        }
    }
}
