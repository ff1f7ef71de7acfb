use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One cached AI response for a (user, bucket) pair.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CachedResponse {
    pub user_id: String,
    pub bucket_key: String,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}
