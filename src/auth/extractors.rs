use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use tracing::warn;

use crate::auth::jwt::TokenError;
use crate::auth::repo_types::{Teacher, TeacherProfile};
use crate::error::ApiError;
use crate::state::AppState;

/// The auth gate: validates the bearer token and resolves it to the stored
/// account before any handler logic runs. A bad token and a valid token
/// whose account has disappeared reject with distinct errors.
pub struct CurrentTeacher(pub TeacherProfile);

#[async_trait]
impl FromRequestParts<AppState> for CurrentTeacher {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Read Authorization header
        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or(ApiError::MissingToken)?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or(ApiError::InvalidToken)?;

        let claims = state.jwt.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            match e {
                TokenError::Expired => ApiError::TokenExpired,
                TokenError::Invalid => ApiError::InvalidToken,
            }
        })?;

        let profile = Teacher::profile_by_id(&state.db, claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(ApiError::AccountGone)?;

        Ok(CurrentTeacher(profile))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/user/profile");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[tokio::test]
    async fn missing_header_is_rejected() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(None);
        let err = CurrentTeacher::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::MissingToken));
    }

    #[tokio::test]
    async fn wrong_scheme_is_rejected() {
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Basic dXNlcjpwYXNz"));
        let err = CurrentTeacher::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_before_any_db_access() {
        // The fake state's pool connects lazily, so reaching the DB would
        // error differently; a malformed token must fail at verification.
        let state = AppState::fake();
        let mut parts = parts_with_auth(Some("Bearer not.a.jwt"));
        let err = CurrentTeacher::from_request_parts(&mut parts, &state)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::InvalidToken));
    }
}
