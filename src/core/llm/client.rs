//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::core::error::{Error, Result};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Fixed sampling parameters for one completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// The remote LLM collaborator: `(messages, params) -> text`.
///
/// Services depend on this trait so tests can substitute a mock and the
/// production client can be swapped for any OpenAI-compatible endpoint.
#[async_trait]
pub trait ChatCompletions: Send + Sync {
    /// Issue one chat-completion call and return the first choice's
    /// message content. No retry, no caching.
    async fn complete(&self, messages: Vec<ChatMessage>, params: SamplingParams) -> Result<String>;
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
///
/// Defaults to Groq (`https://api.groq.com/openai/v1`); the base URL is
/// injectable so tests can point it at a local mock server.
pub struct OpenAiCompatClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompatClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            config.model.clone(),
            config.api_key.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatCompletions for OpenAiCompatClient {
    async fn complete(&self, messages: Vec<ChatMessage>, params: SamplingParams) -> Result<String> {
        // Checked before any request is built so a missing key never
        // reaches the network.
        let api_key = self.api_key.as_deref().ok_or(Error::MissingCredential)?;

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::debug!(model = %self.model, temperature = params.temperature, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::RemoteCall(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::RemoteCall(format!("HTTP {status}: {detail}")));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::RemoteCall(format!("malformed response body: {e}")))?;

        if let Some(usage) = &completion.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion finished"
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::RemoteCall("response contained no choices".to_string()))?;

        Ok(choice.message.content)
    }
}
