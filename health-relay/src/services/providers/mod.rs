//! AI completion provider abstractions and implementations.
//!
//! The relay forwards a prompt and returns the model's text unmodified.
//! Handler tests run against the mock provider.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for upstream collaborator calls.
///
/// Shared by the completion provider and the medical-database clients.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        AppError::UpstreamError(err.to_string())
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Text returned by a completion provider.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: i32,

    /// Output tokens generated.
    pub output_tokens: i32,

    pub finish_reason: FinishReason,
}

/// Remote large-language-model completion service.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete `prompt`, with optional `context` placed ahead of it.
    async fn complete(
        &self,
        prompt: &str,
        context: Option<&str>,
    ) -> Result<Completion, ProviderError>;

    /// Local readiness check; must not call the remote service.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
