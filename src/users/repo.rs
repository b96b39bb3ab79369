use async_trait::async_trait;
use sqlx::PgPool;

use crate::users::{
    dto::UserPayload,
    repo_types::{User, UserSummary},
};

/// Data access for the `"user"` table. Every method issues exactly one statement.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, sqlx::Error>;
    async fn create(&self, payload: &UserPayload) -> Result<User, sqlx::Error>;
    async fn find(&self, id: i64) -> Result<Option<UserSummary>, sqlx::Error>;
    /// Returns the number of rows updated.
    async fn update(&self, id: i64, payload: &UserPayload) -> Result<u64, sqlx::Error>;
    /// Marks the row deleted; returns the number of rows affected.
    async fn soft_delete(&self, id: i64) -> Result<u64, sqlx::Error>;
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_at, updated_at
            FROM "user"
            WHERE deleted_at IS NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
    }

    async fn create(&self, payload: &UserPayload) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO "user" (username, email)
            VALUES ($1, $2)
            RETURNING id, username, email, created_at, updated_at
            "#,
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .fetch_one(&self.db)
        .await
    }

    async fn find(&self, id: i64) -> Result<Option<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            r#"
            SELECT id, username, email
            FROM "user"
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    async fn update(&self, id: i64, payload: &UserPayload) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE "user"
            SET username = $1, email = $2, updated_at = now()
            WHERE id = $3 AND deleted_at IS NULL
            "#,
        )
        .bind(&payload.username)
        .bind(&payload.email)
        .bind(id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn soft_delete(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE "user"
            SET deleted_at = now(), updated_at = now()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .execute(&self.db)
        .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::db::ping(&self.db).await
    }
}
