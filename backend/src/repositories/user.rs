//! User repository for database operations

use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a user, returning its id
    pub async fn create(pool: &PgPool, email: &str, name: Option<&str>) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(email)
        .bind(name)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    pub async fn exists(pool: &PgPool, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;

        Ok(exists)
    }
}
