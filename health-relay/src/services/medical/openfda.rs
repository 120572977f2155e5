//! openFDA drug label search.

use super::{MedicalDatabase, build_client, fetch_json};
use crate::services::providers::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const DRUG_LABEL_PATH: &str = "/drug/label.json";

pub struct OpenFdaClient {
    base_url: String,
    result_limit: u32,
    client: Client,
}

impl OpenFdaClient {
    pub fn new(base_url: &str, result_limit: u32, timeout: Duration) -> Result<Self, ProviderError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            result_limit,
            client: build_client(timeout)?,
        })
    }
}

#[async_trait]
impl MedicalDatabase for OpenFdaClient {
    fn name(&self) -> &'static str {
        "openfda"
    }

    async fn search(&self, query: &str) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.base_url, DRUG_LABEL_PATH);
        let limit = self.result_limit.to_string();
        tracing::debug!(upstream = self.name(), query_len = query.len(), "Searching drug labels");

        fetch_json(
            self.name(),
            self.client
                .get(url)
                .query(&[("search", query), ("limit", limit.as_str())]),
        )
        .await
    }
}
