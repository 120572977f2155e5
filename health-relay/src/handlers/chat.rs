use crate::models::{ChatRequest, ChatResponse};
use crate::services::metrics::record_upstream;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;
use validator::Validate;

/// `POST /chat`: relay a message to the completion provider.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!(
            "Request must be JSON with a string 'message' field: {}",
            e.body_text()
        ))
    })?;
    request.validate()?;

    if request.message.trim().is_empty() {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "message must not be empty"
        )));
    }

    let result = state
        .completion_provider
        .complete(&request.message, request.context.as_deref())
        .await;
    record_upstream("completion", result.is_ok());
    let completion = result?;

    tracing::info!(
        input_tokens = completion.input_tokens,
        output_tokens = completion.output_tokens,
        finish_reason = ?completion.finish_reason,
        "Completion relayed"
    );

    Ok(Json(ChatResponse {
        response: completion.text,
    }))
}
