//! Mock medical database for testing.

use super::MedicalDatabase;
use crate::services::providers::ProviderError;
use async_trait::async_trait;
use serde_json::{json, Value};

/// Echoes the query inside a fixed envelope, or fails when disabled.
pub struct MockMedicalDatabase {
    name: &'static str,
    enabled: bool,
}

impl MockMedicalDatabase {
    pub fn new(name: &'static str, enabled: bool) -> Self {
        Self { name, enabled }
    }
}

#[async_trait]
impl MedicalDatabase for MockMedicalDatabase {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn search(&self, query: &str) -> Result<Value, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NetworkError(format!(
                "{}: connection refused",
                self.name
            )));
        }

        Ok(json!({
            "source": self.name,
            "query": query,
            "results": [],
        }))
    }
}
