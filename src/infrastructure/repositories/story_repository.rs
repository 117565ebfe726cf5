use crate::domain::story::StoryDocument;
use crate::infrastructure::db::{check_connection, DbPool};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

/// Create-only document store for finished stories
#[async_trait]
pub trait StoryRepository: Send + Sync {
    /// Insert a new record into `collection` and return its path (`<collection>/<id>`)
    async fn create(&self, collection: &str, document: &StoryDocument) -> Result<String, String>;

    /// Check that the store is reachable
    async fn ping(&self) -> Result<(), String>;
}

/// Postgres-backed document store; each story is one JSONB row
pub struct PgStoryRepository {
    pool: Arc<DbPool>,
}

impl PgStoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StoryRepository for PgStoryRepository {
    async fn create(&self, collection: &str, document: &StoryDocument) -> Result<String, String> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO documents (id, collection, body, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(collection)
        .bind(Json(document))
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, collection, "Failed to insert story document");
            format!("Database error: {}", e)
        })?;

        Ok(format!("{}/{}", collection, id))
    }

    async fn ping(&self) -> Result<(), String> {
        check_connection(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
