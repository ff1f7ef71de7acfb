//! PostgreSQL-backed store for wellness-service.

use crate::models::{CachedResponse, ChatMessage, ChatRole};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::Store;
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Database connection pool wrapper implementing [`Store`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "wellness-service"))]
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        info!(max_connections = max_connections, "Connecting to PostgreSQL");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl Store for PgStore {
    #[instrument(skip(self))]
    async fn get_cached(
        &self,
        user_id: &str,
        bucket_key: &str,
    ) -> Result<Option<CachedResponse>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_cached"])
            .start_timer();

        let cached = sqlx::query_as::<_, CachedResponse>(
            r#"
            SELECT user_id, bucket_key, payload, updated_at
            FROM cached_responses
            WHERE user_id = $1 AND bucket_key = $2
            "#,
        )
        .bind(user_id)
        .bind(bucket_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to read cache: {}", e)))?;

        timer.observe_duration();

        Ok(cached)
    }

    #[instrument(skip(self, payload))]
    async fn put_cached(
        &self,
        user_id: &str,
        bucket_key: &str,
        payload: &str,
    ) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["put_cached"])
            .start_timer();

        sqlx::query(
            r#"
            INSERT INTO cached_responses (user_id, bucket_key, payload, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (user_id, bucket_key)
            DO UPDATE SET payload = EXCLUDED.payload, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(bucket_key)
        .bind(payload)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to write cache: {}", e)))?;

        timer.observe_duration();

        Ok(())
    }

    #[instrument(skip(self, content))]
    async fn append_chat_message(
        &self,
        user_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<(), AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["append_chat_message"])
            .start_timer();

        sqlx::query(
            r#"
            INSERT INTO chat_messages (user_id, role, content)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(user_id)
        .bind(role.as_str())
        .bind(content)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to append chat message: {}", e))
        })?;

        timer.observe_duration();

        Ok(())
    }

    #[instrument(skip(self))]
    async fn chat_history(&self, user_id: &str) -> Result<Vec<ChatMessage>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["chat_history"])
            .start_timer();

        let messages = sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT message_id, user_id, role, content, created_at
            FROM chat_messages
            WHERE user_id = $1
            ORDER BY created_at ASC, message_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to load chat history: {}", e))
        })?;

        timer.observe_duration();

        Ok(messages)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }
}
