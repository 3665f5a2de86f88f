//! Ollama provider implementation.
//!
//! Talks to a locally running Ollama server over its HTTP chat API.
//! The model itself is assumed to be pulled and loaded out of band.

use super::{ChatMessage, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama provider configuration.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
    pub request_timeout_secs: u64,
}

/// Ollama text provider.
pub struct OllamaTextProvider {
    config: OllamaConfig,
    client: Client,
}

impl OllamaTextProvider {
    pub fn new(config: OllamaConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn map_request_error(&self, err: reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.config.request_timeout_secs)
        } else {
            ProviderError::NetworkError(err.to_string())
        }
    }
}

#[async_trait]
impl TextProvider for OllamaTextProvider {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<ProviderResponse, ProviderError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            stream: false,
        };

        tracing::debug!(
            model = %self.config.model,
            message_count = messages.len(),
            "Sending chat request to Ollama"
        );

        let response = self
            .client
            .post(self.api_url("api/chat"))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            // Ollama reports failures as {"error": "..."}
            let message = serde_json::from_str::<ErrorBody>(&error_text)
                .map(|body| body.error)
                .unwrap_or(error_text);

            return Err(ProviderError::ApiError(format!(
                "Ollama API error {}: {}",
                status, message
            )));
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let message = api_response
            .message
            .ok_or_else(|| ProviderError::InvalidResponse("Response has no message".to_string()))?;

        Ok(ProviderResponse {
            text: message.content,
            input_tokens: api_response.prompt_eval_count,
            output_tokens: api_response.eval_count,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        let response = self
            .client
            .get(self.api_url("api/tags"))
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError(format!(
                "Health check failed: {}",
                response.status()
            )))
        }
    }
}

// ============================================================================
// Ollama API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ResponseMessage>,
    #[serde(default)]
    prompt_eval_count: Option<i64>,
    #[serde(default)]
    eval_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[allow(dead_code)]
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> OllamaTextProvider {
        OllamaTextProvider::new(OllamaConfig {
            base_url: base_url.to_string(),
            model: "qwen2.5-coder:7b".to_string(),
            request_timeout_secs: 300,
        })
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        assert_eq!(
            provider("http://localhost:11434/").api_url("api/chat"),
            "http://localhost:11434/api/chat"
        );
        assert_eq!(
            provider("http://localhost:11434").api_url("api/tags"),
            "http://localhost:11434/api/tags"
        );
    }

    #[test]
    fn chat_request_serializes_in_message_order() {
        let messages = vec![ChatMessage::system("rules"), ChatMessage::user("a red button")];
        let request = ChatRequest {
            model: "qwen2.5-coder:7b",
            messages: &messages,
            stream: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["stream"], false);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "a red button");
    }

    #[test]
    fn chat_response_parses_token_counts() {
        let raw = r#"{
            "model": "qwen2.5-coder:7b",
            "message": {"role": "assistant", "content": "export default function App() {}"},
            "done": true,
            "prompt_eval_count": 42,
            "eval_count": 17
        }"#;

        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.message.unwrap().content, "export default function App() {}");
        assert_eq!(parsed.prompt_eval_count, Some(42));
        assert_eq!(parsed.eval_count, Some(17));
    }
}
