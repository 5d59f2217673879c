use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::post;
use axum::Router;

use crate::error::{AppError, AppResult};
use crate::extractors::CurrentUser;
use crate::profile::{Notice, PhotoFile, ProfileView, MAX_PHOTO_BYTES};
use crate::state::AppState;

/// Request bodies may run a little past the photo limit so that most
/// oversized files still reach the size check and get a friendly notice.
pub const UPLOAD_BODY_LIMIT: usize = MAX_PHOTO_BYTES + 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile/photo", post(upload_photo))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

fn notice_redirect(notice: Notice) -> Response {
    Redirect::to(&format!("/?notice={}", notice.code())).into_response()
}

/// POST /profile/photo — replace the signed-in user's profile photo
async fn upload_photo(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let file = match read_photo_field(&mut multipart).await {
        Ok(Some(file)) => file,
        Ok(None) => return Ok(Redirect::to("/").into_response()),
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!("Rejected photo for {}: body over limit", user.username);
            return Ok(notice_redirect(Notice::PhotoSize));
        }
        Err(e) => return Err(AppError::BadRequest(e.body_text())),
    };

    let mut view = ProfileView::load(user, state.photos.clone())?;
    match view.select_photo(file).await {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(e) => match e.notice() {
            Some(notice) => Ok(notice_redirect(notice)),
            None => Err(e.into()),
        },
    }
}

/// The `photo` part of the form, or `None` when no file was chosen.
async fn read_photo_field(multipart: &mut Multipart) -> Result<Option<PhotoFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("photo") {
            continue;
        }

        let chosen = field.file_name().is_some_and(|name| !name.is_empty());
        let content_type = field.content_type().unwrap_or_default().to_owned();
        let bytes = field.bytes().await?;

        if !chosen && bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some(PhotoFile::new(content_type, bytes.to_vec())));
    }

    Ok(None)
}
