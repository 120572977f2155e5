//! Medical-database lookups.
//!
//! Each client performs one free-text search and hands back the provider's
//! JSON untouched. Failures of any kind surface as [`ProviderError`].

pub mod clinical_tables;
pub mod mock;
pub mod openfda;

pub use clinical_tables::ClinicalTablesClient;
pub use openfda::OpenFdaClient;

use crate::services::providers::ProviderError;
use async_trait::async_trait;
use serde_json::Value;

/// An external medical reference searchable by free text.
#[async_trait]
pub trait MedicalDatabase: Send + Sync {
    /// Short stable name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Run `query` against the provider, returning its JSON body verbatim.
    async fn search(&self, query: &str) -> Result<Value, ProviderError>;
}

/// Send `request` once and decode the body as JSON.
pub(crate) async fn fetch_json(
    upstream: &str,
    request: reqwest::RequestBuilder,
) -> Result<Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| {
            ProviderError::NetworkError(format!("{}: {}", upstream, e.without_url()))
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::ApiError(format!(
            "{} returned {}: {}",
            upstream, status, body
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| {
            ProviderError::InvalidResponse(format!("{}: {}", upstream, e.without_url()))
        })
}

pub(crate) fn build_client(timeout: std::time::Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))
}
