//! One-off image analysis endpoint. No caching, no persistence.

use crate::dtos::AnalysisResponse;
use crate::models::ChatRole;
use crate::services::metrics::{COMPLETIONS_TOTAL, COMPLETION_DURATION};
use crate::services::providers::{ContentPart, MessageContent, PromptMessage};
use crate::startup::AppState;
use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use service_core::error::AppError;

/// POST /image-analysis
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("Failed to read multipart field: {}", e))
    })? {
        if field.name() == Some("image") {
            let mime_type = field.content_type().unwrap_or("image/jpeg").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| {
                    AppError::BadRequest(anyhow::anyhow!("Failed to read image bytes: {}", e))
                })?
                .to_vec();
            image = Some((mime_type, data));
            break;
        }
    }

    let (mime_type, data) =
        image.ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("No image uploaded")))?;

    tracing::info!(mime_type = %mime_type, size = data.len(), "Analyzing uploaded image");

    let data_url = format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(&data)
    );

    let messages = vec![PromptMessage {
        role: ChatRole::User,
        content: MessageContent::Parts(vec![
            ContentPart::Text {
                text: "Analyze this health-related image and give advice.".to_string(),
            },
            ContentPart::ImageUrl {
                image_url: data_url,
            },
        ]),
    }];

    let timer = COMPLETION_DURATION
        .with_label_values(&["image_analysis"])
        .start_timer();
    let generated = state
        .provider
        .complete(&state.config.provider.model, &messages)
        .await;
    timer.observe_duration();

    match generated {
        Ok(analysis) => {
            COMPLETIONS_TOTAL
                .with_label_values(&["image_analysis", "ok"])
                .inc();
            Ok(Json(AnalysisResponse { analysis }))
        }
        Err(e) => {
            COMPLETIONS_TOTAL
                .with_label_values(&["image_analysis", "error"])
                .inc();
            tracing::error!(error = %e, "Image analysis failed");
            Err(AppError::InternalError(anyhow::anyhow!(
                "Failed to analyze image"
            )))
        }
    }
}
