//! Persistence abstraction for cached responses and chat history.

use crate::models::{CachedResponse, ChatMessage, ChatRole};
use async_trait::async_trait;
use chrono::Utc;
use service_core::error::AppError;
use std::collections::HashMap;
use std::sync::Mutex;

/// Backing store for cached AI responses and per-user chat transcripts.
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up a cached payload; absence is a normal outcome, not an error.
    async fn get_cached(
        &self,
        user_id: &str,
        bucket_key: &str,
    ) -> Result<Option<CachedResponse>, AppError>;

    /// Insert or replace the cached payload for a (user, bucket) pair.
    async fn put_cached(
        &self,
        user_id: &str,
        bucket_key: &str,
        payload: &str,
    ) -> Result<(), AppError>;

    /// Append one message to the user's transcript.
    async fn append_chat_message(
        &self,
        user_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<(), AppError>;

    /// Full transcript for a user, oldest first.
    async fn chat_history(&self, user_id: &str) -> Result<Vec<ChatMessage>, AppError>;

    /// Check store health.
    async fn health_check(&self) -> Result<(), AppError>;
}

/// In-memory store used by tests and database-less local runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    cached: HashMap<(String, String), CachedResponse>,
    messages: Vec<ChatMessage>,
    next_message_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_cached(
        &self,
        user_id: &str,
        bucket_key: &str,
    ) -> Result<Option<CachedResponse>, AppError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .cached
            .get(&(user_id.to_string(), bucket_key.to_string()))
            .cloned())
    }

    async fn put_cached(
        &self,
        user_id: &str,
        bucket_key: &str,
        payload: &str,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.cached.insert(
            (user_id.to_string(), bucket_key.to_string()),
            CachedResponse {
                user_id: user_id.to_string(),
                bucket_key: bucket_key.to_string(),
                payload: payload.to_string(),
                updated_at: Utc::now(),
            },
        );
        Ok(())
    }

    async fn append_chat_message(
        &self,
        user_id: &str,
        role: ChatRole,
        content: &str,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.lock().expect("memory store poisoned");
        inner.next_message_id += 1;
        let message = ChatMessage {
            message_id: inner.next_message_id,
            user_id: user_id.to_string(),
            role: role.as_str().to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        inner.messages.push(message);
        Ok(())
    }

    async fn chat_history(&self, user_id: &str) -> Result<Vec<ChatMessage>, AppError> {
        let inner = self.inner.lock().expect("memory store poisoned");
        Ok(inner
            .messages
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
