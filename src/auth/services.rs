use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::dto::{LoginRequest, RegisterRequest, UpdatePasswordRequest};
use crate::auth::repo::is_unique_violation;
use crate::auth::repo_types::Teacher;
use crate::error::ApiError;
use crate::state::AppState;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Registration: validate, reject a taken email, hash, insert, issue a
/// token for the new account. A concurrent insert for the same email loses
/// on the unique constraint and maps to the same conflict.
pub async fn register_teacher(state: &AppState, req: RegisterRequest) -> Result<String, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("All fields are required".into()));
    }
    if !is_valid_email(&req.email) {
        warn!(email = %req.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    if Teacher::find_by_email(&state.db, &req.email)
        .await
        .map_err(ApiError::Internal)?
        .is_some()
    {
        warn!(email = %req.email, "email already registered");
        return Err(ApiError::EmailTaken);
    }

    let hash = state.hasher.hash(&req.password).map_err(ApiError::Internal)?;

    let teacher = match Teacher::create(&state.db, &req.email, &hash).await {
        Ok(t) => t,
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %req.email, "lost registration race");
            return Err(ApiError::EmailTaken);
        }
        Err(e) => return Err(ApiError::Internal(e.into())),
    };

    let token = state.jwt.sign(teacher.id).map_err(ApiError::Internal)?;
    info!(teacher_id = %teacher.id, email = %teacher.email, "teacher registered");
    Ok(token)
}

pub async fn login_teacher(state: &AppState, req: LoginRequest) -> Result<String, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation("All fields are required".into()));
    }
    if !is_valid_email(&req.email) {
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let teacher = Teacher::find_by_email(&state.db, &req.email)
        .await
        .map_err(ApiError::Internal)?
        .ok_or_else(|| {
            warn!(email = %req.email, "login unknown email");
            ApiError::InvalidCredentials
        })?;

    let ok = state
        .hasher
        .verify(&req.password, &teacher.password_hash)
        .map_err(ApiError::Internal)?;
    if !ok {
        warn!(email = %req.email, teacher_id = %teacher.id, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let token = state.jwt.sign(teacher.id).map_err(ApiError::Internal)?;
    info!(teacher_id = %teacher.id, email = %teacher.email, "teacher logged in");
    Ok(token)
}

/// Password change for an already-authenticated account. Tokens issued
/// before the change stay valid until their natural expiry; validity is
/// signature + expiry only, nothing here is revoked.
pub async fn change_password(
    state: &AppState,
    teacher_id: Uuid,
    req: UpdatePasswordRequest,
) -> Result<(), ApiError> {
    if req.old_password.is_empty() || req.new_password.is_empty() {
        return Err(ApiError::Validation(
            "Both old and new passwords are required".into(),
        ));
    }

    // Reload the full record: the gate's projection has no hash.
    let teacher = Teacher::find_by_id(&state.db, teacher_id)
        .await
        .map_err(ApiError::Internal)?
        .ok_or(ApiError::NotFound)?;

    let ok = state
        .hasher
        .verify(&req.old_password, &teacher.password_hash)
        .map_err(ApiError::Internal)?;
    if !ok {
        warn!(teacher_id = %teacher.id, "password change with wrong old password");
        return Err(ApiError::BadCredential);
    }

    let hash = state
        .hasher
        .hash(&req.new_password)
        .map_err(ApiError::Internal)?;
    Teacher::update_password_hash(&state.db, teacher.id, &hash)
        .await
        .map_err(ApiError::Internal)?;

    info!(teacher_id = %teacher.id, "password updated");
    Ok(())
}
