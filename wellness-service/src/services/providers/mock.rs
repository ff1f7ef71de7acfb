//! Mock provider implementation for testing.

use super::{CompletionProvider, MessageContent, PromptMessage, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock completion provider for testing.
///
/// Records every received message list so tests can assert on prompt
/// construction and transcript ordering.
pub struct MockCompletionProvider {
    enabled: bool,
    calls: Mutex<Vec<Vec<PromptMessage>>>,
}

impl MockCompletionProvider {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Message lists received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<PromptMessage>> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        _model: &str,
        messages: &[PromptMessage],
    ) -> Result<String, ProviderError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push(messages.to_vec());

        if !self.enabled {
            return Err(ProviderError::NotConfigured(
                "Mock completion provider not enabled".to_string(),
            ));
        }

        let last = messages
            .last()
            .map(|m| match &m.content {
                MessageContent::Text(text) => text.clone(),
                MessageContent::Parts(_) => "multimodal input".to_string(),
            })
            .unwrap_or_default();

        Ok(format!("Mock response for: {}", last))
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
