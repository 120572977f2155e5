//! Mock provider implementation for testing.

use super::{Completion, CompletionProvider, FinishReason, ProviderError};
use async_trait::async_trait;

/// Mock completion provider: echoes the prompt, or fails when disabled.
pub struct MockCompletionProvider {
    enabled: bool,
}

impl MockCompletionProvider {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        prompt: &str,
        context: Option<&str>,
    ) -> Result<Completion, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock completion provider not enabled".to_string(),
            ));
        }

        let text = match context {
            Some(context) => format!("Mock response for: {} (context: {})", prompt, context),
            None => format!("Mock response for: {}", prompt),
        };

        Ok(Completion {
            text,
            input_tokens: i32::try_from(prompt.len() / 4).unwrap_or(i32::MAX),
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if self.enabled {
            Ok(())
        } else {
            Err(ProviderError::NotConfigured(
                "Mock completion provider not enabled".to_string(),
            ))
        }
    }
}
