use crate::models::SearchQuery;
use crate::services::metrics::record_upstream;
use crate::services::MedicalDatabase;
use crate::startup::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde_json::Value;
use service_core::error::AppError;

/// `GET /medical/conditions?query=`: condition lookup.
pub async fn search_conditions(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    relay_search(state.conditions_db.as_ref(), params).await
}

/// `GET /medical/drugs?query=`: drug label lookup.
pub async fn search_drugs(
    State(state): State<AppState>,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    relay_search(state.drugs_db.as_ref(), params).await
}

async fn relay_search(
    database: &dyn MedicalDatabase,
    params: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Value>, AppError> {
    let Query(params) = params.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!(
            "Invalid query string: {}",
            e.body_text()
        ))
    })?;
    let query = params
        .term()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("query parameter is required")))?;

    let result = database.search(query).await;
    record_upstream(database.name(), result.is_ok());

    Ok(Json(result?))
}
