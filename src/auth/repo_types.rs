use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Teacher record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // Argon2 hash, not exposed in JSON
    pub image_path: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Teacher row without the credential column. This is what token
/// verification resolves to and what profile reads return.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TeacherProfile {
    pub id: Uuid,
    pub email: String,
    pub image_path: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn teacher_serialization_skips_password_hash() {
        let t = Teacher {
            id: Uuid::new_v4(),
            email: "t@example.com".into(),
            password_hash: "$argon2id$...".into(),
            image_path: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&t).unwrap();
        assert!(!json.contains("password_hash"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn profile_serializes_camel_case() {
        let p = TeacherProfile {
            id: Uuid::new_v4(),
            email: "t@example.com".into(),
            image_path: Some("teachers/x/y.jpg".into()),
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("imagePath"));
        assert!(json.contains("createdAt"));
        assert!(json.contains("teachers/x/y.jpg"));
    }
}
