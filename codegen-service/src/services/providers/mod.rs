//! Inference provider abstractions and implementations.
//!
//! This module provides a trait-based abstraction for inference runtimes,
//! allowing easy swapping between different backends (Ollama, mock).

pub mod mock;
pub mod ollama;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Inference timed out after {0}s")]
    Timeout(u64),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A role-tagged chat message, in the shape the Ollama chat endpoint expects.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// Result of a provider call.
pub struct ProviderResponse {
    /// Generated text, verbatim.
    pub text: String,

    /// Input tokens consumed, when the runtime reports them.
    pub input_tokens: Option<i64>,

    /// Output tokens generated, when the runtime reports them.
    pub output_tokens: Option<i64>,
}

/// Trait for text generation providers (e.g., Ollama).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a completion for an ordered message list.
    ///
    /// The call runs to completion; a slow model holds the request open for
    /// as long as the provider's own timeout allows.
    async fn generate(&self, messages: &[ChatMessage]) -> Result<ProviderResponse, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
