use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::repo_types::{Teacher, TeacherProfile};

/// True when the error is the unique-constraint violation raised by a
/// concurrent insert for the same email.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|d| d.is_unique_violation())
        .unwrap_or(false)
}

impl Teacher {
    /// Find a teacher by email, credential column included.
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            SELECT id, email, password_hash, image_path, created_at, updated_at
            FROM teachers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(teacher)
    }

    /// Find a teacher by id, credential column included.
    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Teacher>> {
        let teacher = sqlx::query_as::<_, Teacher>(
            r#"
            SELECT id, email, password_hash, image_path, created_at, updated_at
            FROM teachers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(teacher)
    }

    /// Projection used by the auth gate: never selects the hash.
    pub async fn profile_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<TeacherProfile>> {
        let profile = sqlx::query_as::<_, TeacherProfile>(
            r#"
            SELECT id, email, image_path, created_at, updated_at
            FROM teachers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    /// Create a new teacher with a hashed password. Returns the raw sqlx
    /// error so the caller can map a unique violation to a conflict.
    pub async fn create(
        db: &PgPool,
        email: &str,
        password_hash: &str,
    ) -> Result<Teacher, sqlx::Error> {
        sqlx::query_as::<_, Teacher>(
            r#"
            INSERT INTO teachers (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, image_path, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(db)
        .await
    }

    /// Replace the stored hash wholesale.
    pub async fn update_password_hash(
        db: &PgPool,
        id: Uuid,
        password_hash: &str,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE teachers
            SET password_hash = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn set_image_path(db: &PgPool, id: Uuid, image_path: &str) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE teachers
            SET image_path = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(image_path)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn clear_image_path(db: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE teachers
            SET image_path = NULL, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(db)
        .await?;
        Ok(())
    }
}
