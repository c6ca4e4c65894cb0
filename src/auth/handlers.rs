use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::auth::dto::{
    AuthResponse, LoginRequest, MessageResponse, ProfileResponse, RegisterRequest,
    UpdatePasswordRequest, UserResponse,
};
use crate::auth::extractors::CurrentTeacher;
use crate::auth::services;
use crate::error::ApiError;
use crate::state::AppState;

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/checkAuth", post(check_auth))
        .route("/profile", get(profile))
        .route("/update-password", put(update_password))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let auth_token = services::register_teacher(&state, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            status: true,
            auth_token,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let auth_token = services::login_teacher(&state, payload).await?;
    Ok(Json(AuthResponse {
        status: true,
        auth_token,
    }))
}

/// The extractor is the whole operation: a success response here means the
/// token verified and resolved to a live account.
#[instrument(skip_all)]
pub async fn check_auth(CurrentTeacher(user): CurrentTeacher) -> Json<UserResponse> {
    Json(UserResponse { status: true, user })
}

#[instrument(skip_all)]
pub async fn profile(CurrentTeacher(profile): CurrentTeacher) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        status: true,
        profile,
    })
}

#[instrument(skip(state, payload))]
pub async fn update_password(
    State(state): State<AppState>,
    CurrentTeacher(teacher): CurrentTeacher,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    services::change_password(&state, teacher.id, payload).await?;
    Ok(Json(MessageResponse {
        status: true,
        message: "Password updated successfully",
    }))
}
