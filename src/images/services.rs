use anyhow::Context;
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::auth::repo_types::{Teacher, TeacherProfile};
use crate::error::ApiError;
use crate::state::AppState;

pub struct UploadedImage {
    pub body: Bytes,
    pub content_type: String,
}

fn ext_from_mime(ct: &str) -> Option<&'static str> {
    match ct {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/heic" => Some("heic"),
        _ => None,
    }
}

fn image_key(teacher_id: Uuid, content_type: &str) -> String {
    let ext = ext_from_mime(content_type).unwrap_or("bin");
    format!("teachers/{}/{}.{}", teacher_id, Uuid::new_v4(), ext)
}

/// Store the image, point the account at it, then drop the superseded
/// object. Cleanup of the old object is best-effort: the account already
/// references the new key, so a failed delete only leaks an orphan.
pub async fn store_image(
    state: &AppState,
    teacher: &TeacherProfile,
    image: UploadedImage,
) -> Result<String, ApiError> {
    let key = image_key(teacher.id, &image.content_type);
    state
        .storage
        .put_object(&key, image.body, &image.content_type)
        .await
        .with_context(|| format!("put_object {}", key))
        .map_err(ApiError::Internal)?;

    Teacher::set_image_path(&state.db, teacher.id, &key)
        .await
        .map_err(ApiError::Internal)?;

    if let Some(old_key) = teacher.image_path.as_deref() {
        if old_key != key {
            if let Err(e) = state.storage.delete_object(old_key).await {
                warn!(error = %e, key = %old_key, "failed to delete superseded image");
            }
        }
    }

    Ok(key)
}

/// Clear the account's image. Idempotent: succeeds whether or not an image
/// was set.
pub async fn remove_image(state: &AppState, teacher: &TeacherProfile) -> Result<(), ApiError> {
    Teacher::clear_image_path(&state.db, teacher.id)
        .await
        .map_err(ApiError::Internal)?;

    if let Some(old_key) = teacher.image_path.as_deref() {
        if let Err(e) = state.storage.delete_object(old_key).await {
            warn!(error = %e, key = %old_key, "failed to delete removed image");
        }
    }

    Ok(())
}

/// Presigned GET for the account's current image.
pub async fn image_url(state: &AppState, teacher: &TeacherProfile) -> Result<String, ApiError> {
    const TTL_SECS: u64 = 10 * 60;
    let key = teacher.image_path.as_deref().ok_or(ApiError::NotFound)?;
    state
        .storage
        .presign_get(key, TTL_SECS)
        .await
        .map_err(ApiError::Internal)
}
