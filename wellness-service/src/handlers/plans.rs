//! Cached plan endpoints: daily plan and weekly summary.
//!
//! Both endpoints share one cache-or-generate routine; they differ only in
//! bucket key family and prompt. A generated response is cached under the
//! (user, bucket) pair so repeat requests within the same period are served
//! from the store without another completion call.

use crate::dtos::{PlanResponse, ResponseSource};
use crate::models::{bucket, ChatRole};
use crate::services::metrics::{CACHE_LOOKUPS_TOTAL, COMPLETIONS_TOTAL, COMPLETION_DURATION};
use crate::services::providers::PromptMessage;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use service_core::error::AppError;

/// GET /daily-plan/:user_id
pub async fn daily_plan(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bucket_key = bucket::daily_key(Utc::now());
    let prompt = format!(
        "Create a personalized daily health plan for user {} with meals, workouts, and hydration tips.",
        user_id
    );

    match cached_completion(&state, &user_id, &bucket_key, "daily", &prompt).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Daily plan request failed");
            Err(AppError::InternalError(anyhow::anyhow!(
                "Failed to generate daily plan"
            )))
        }
    }
}

/// GET /weekly-summary/:user_id
pub async fn weekly_summary(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bucket_key = bucket::weekly_key(Utc::now());
    let prompt = format!(
        "Create a one-week health summary and improvement tips for user {}.",
        user_id
    );

    match cached_completion(&state, &user_id, &bucket_key, "weekly", &prompt).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!(user_id = %user_id, error = %e, "Weekly summary request failed");
            Err(AppError::InternalError(anyhow::anyhow!(
                "Failed to generate weekly summary"
            )))
        }
    }
}

/// Serve from the cache, or generate via the provider and write back.
///
/// A write-back failure is logged and the generated content is still
/// returned; the entry is regenerated on the next request.
async fn cached_completion(
    state: &AppState,
    user_id: &str,
    bucket_key: &str,
    kind: &str,
    prompt: &str,
) -> Result<PlanResponse, AppError> {
    if let Some(cached) = state.store.get_cached(user_id, bucket_key).await? {
        CACHE_LOOKUPS_TOTAL.with_label_values(&[kind, "hit"]).inc();
        tracing::info!(user_id = %user_id, bucket_key = %bucket_key, "Cache hit");
        return Ok(PlanResponse {
            source: ResponseSource::Cache,
            data: cached.payload,
        });
    }

    CACHE_LOOKUPS_TOTAL.with_label_values(&[kind, "miss"]).inc();
    tracing::info!(user_id = %user_id, bucket_key = %bucket_key, "Cache miss, generating");

    let messages = vec![PromptMessage::text(ChatRole::User, prompt)];

    let timer = COMPLETION_DURATION.with_label_values(&[kind]).start_timer();
    let generated = state
        .provider
        .complete(&state.config.provider.model, &messages)
        .await;
    timer.observe_duration();

    let data = match generated {
        Ok(text) => {
            COMPLETIONS_TOTAL.with_label_values(&[kind, "ok"]).inc();
            text
        }
        Err(e) => {
            COMPLETIONS_TOTAL.with_label_values(&[kind, "error"]).inc();
            return Err(AppError::InternalError(anyhow::Error::new(e)));
        }
    };

    if let Err(e) = state.store.put_cached(user_id, bucket_key, &data).await {
        tracing::error!(
            user_id = %user_id,
            bucket_key = %bucket_key,
            error = %e,
            "Failed to cache generated response"
        );
    }

    Ok(PlanResponse {
        source: ResponseSource::Api,
        data,
    })
}
