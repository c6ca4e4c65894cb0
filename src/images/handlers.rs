use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Redirect,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::auth::extractors::CurrentTeacher;
use crate::error::ApiError;
use crate::images::dto::{ImageResponse, MessageResponse};
use crate::images::services::{self, UploadedImage};
use crate::state::AppState;

pub fn image_routes() -> Router<AppState> {
    Router::new()
        .route("/upload-image", post(upload_image))
        .route("/update-image", put(update_image))
        .route("/delete-image", delete(delete_image))
        .route("/image", get(get_image))
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB
}

/// Pull the `image` field out of the multipart body.
async fn read_image_field(mp: &mut Multipart) -> Result<UploadedImage, ApiError> {
    while let Ok(Some(field)) = mp.next_field().await {
        if field.name() == Some("image") {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".into());
            let body = field
                .bytes()
                .await
                .map_err(|e| ApiError::Internal(anyhow::anyhow!("read multipart field: {e}")))?;
            return Ok(UploadedImage { body, content_type });
        }
    }
    Err(ApiError::Validation("No image file provided".into()))
}

#[instrument(skip_all)]
pub async fn upload_image(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    mut mp: Multipart,
) -> Result<Json<ImageResponse>, ApiError> {
    let image = read_image_field(&mut mp).await?;
    let image_path = services::store_image(&state, &teacher, image).await?;
    Ok(Json(ImageResponse {
        status: true,
        message: "Image uploaded successfully",
        image_path,
    }))
}

#[instrument(skip_all)]
pub async fn update_image(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    mut mp: Multipart,
) -> Result<Json<ImageResponse>, ApiError> {
    let image = read_image_field(&mut mp).await?;
    let image_path = services::store_image(&state, &teacher, image).await?;
    Ok(Json(ImageResponse {
        status: true,
        message: "Image updated successfully",
        image_path,
    }))
}

#[instrument(skip_all)]
pub async fn delete_image(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
) -> Result<Json<MessageResponse>, ApiError> {
    services::remove_image(&state, &teacher).await?;
    Ok(Json(MessageResponse {
        status: true,
        message: "Image deleted successfully",
    }))
}

/// 302 to a presigned URL for the stored image.
#[instrument(skip_all)]
pub async fn get_image(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
) -> Result<Redirect, ApiError> {
    let url = services::image_url(&state, &teacher).await?;
    Ok(Redirect::temporary(&url))
}
