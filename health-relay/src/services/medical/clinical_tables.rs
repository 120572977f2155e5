//! NLM Clinical Tables condition search.

use super::{MedicalDatabase, build_client, fetch_json};
use crate::services::providers::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const CONDITIONS_PATH: &str = "/api/conditions/v3/search";

/// Display fields requested from the conditions table.
const DISPLAY_FIELDS: &str = "primary_name,consumer_name";

pub struct ClinicalTablesClient {
    base_url: String,
    client: Client,
}

impl ClinicalTablesClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl MedicalDatabase for ClinicalTablesClient {
    fn name(&self) -> &'static str {
        "clinical_tables"
    }

    async fn search(&self, query: &str) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.base_url, CONDITIONS_PATH);
        tracing::debug!(upstream = self.name(), query_len = query.len(), "Searching conditions");

        fetch_json(
            self.name(),
            self.client
                .get(url)
                .query(&[("terms", query), ("df", DISPLAY_FIELDS)]),
        )
        .await
    }
}
