//! Mock provider implementation for testing.

use super::{ChatMessage, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the mock should do on each call.
enum MockBehavior {
    Reply(String),
    Fail(ProviderError),
}

/// Mock text provider for testing.
///
/// Records every message list it receives and counts invocations so tests can
/// assert both the outgoing exchange and that rejected requests never reach
/// the provider.
pub struct MockTextProvider {
    behavior: MockBehavior,
    calls: AtomicUsize,
    received: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockTextProvider {
    /// A mock that replies with `text` on every call.
    pub fn replying(text: &str) -> Self {
        Self {
            behavior: MockBehavior::Reply(text.to_string()),
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// A mock that fails every call with a network error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            behavior: MockBehavior::Fail(ProviderError::NetworkError(message.to_string())),
            calls: AtomicUsize::new(0),
            received: Mutex::new(Vec::new()),
        }
    }

    /// Number of `generate` calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The message list of the most recent `generate` call.
    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.received.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.received.lock().unwrap().push(messages.to_vec());

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(ProviderResponse {
                text: text.clone(),
                input_tokens: Some(messages.iter().map(|m| m.content.len() as i64).sum::<i64>() / 4),
                output_tokens: Some(text.len() as i64 / 4),
            }),
            MockBehavior::Fail(err) => Err(err.clone()),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.behavior {
            MockBehavior::Reply(_) => Ok(()),
            MockBehavior::Fail(_) => Err(ProviderError::NotConfigured(
                "Mock text provider set to fail".to_string(),
            )),
        }
    }
}
