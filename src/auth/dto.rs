use serde::{Deserialize, Serialize};

use crate::auth::repo_types::TeacherProfile;

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for a password change.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Response returned after register or login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub status: bool,
    pub auth_token: String,
}

/// Response for checkAuth: the resolved account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub status: bool,
    pub user: TeacherProfile,
}

/// Response for the profile read.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub status: bool,
    pub profile: TeacherProfile,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: bool,
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_password_request_uses_camel_case() {
        let req: UpdatePasswordRequest = serde_json::from_str(
            r#"{"oldPassword": "old-secret", "newPassword": "new-secret"}"#,
        )
        .unwrap();
        assert_eq!(req.old_password, "old-secret");
        assert_eq!(req.new_password, "new-secret");
    }

    #[test]
    fn auth_response_shape() {
        let json = serde_json::to_string(&AuthResponse {
            status: true,
            auth_token: "abc.def.ghi".into(),
        })
        .unwrap();
        assert!(json.contains(r#""status":true"#));
        assert!(json.contains(r#""auth_token":"abc.def.ghi""#));
    }
}
