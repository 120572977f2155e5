use crate::models::{Assessment, SymptomsRequest};
use crate::services::metrics::record_assessment;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;
use validator::Validate;

/// `POST /symptoms-analysis`: classify free-text symptoms.
pub async fn analyze_symptoms(
    State(state): State<AppState>,
    payload: Result<Json<SymptomsRequest>, JsonRejection>,
) -> Result<Json<Assessment>, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!(
            "Request must be JSON with a string 'symptoms' field: {}",
            e.body_text()
        ))
    })?;
    request.validate()?;

    let assessment = state.classifier.classify(&request.symptoms);
    record_assessment(assessment.severity);

    tracing::info!(
        severity = %assessment.severity,
        needs_medical_attention = assessment.needs_medical_attention,
        condition_count = assessment.possible_conditions.len(),
        "Symptoms analyzed"
    );

    Ok(Json(assessment))
}
