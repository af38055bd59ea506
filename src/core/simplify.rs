//! Document simplification service.

use std::sync::Arc;

use crate::core::error::{Error, Result};
use crate::core::llm::{ChatCompletions, ChatMessage, SamplingParams};
use crate::core::markdown;
use crate::core::prompts::SimplificationLevel;

/// Fixed system instruction for every simplification call.
const SIMPLIFIER_SYSTEM_PROMPT: &str =
    "You are a world-class legal document simplifier. You follow instructions precisely.";

/// Low temperature biases toward faithful, deterministic output.
const SIMPLIFY_PARAMS: SamplingParams = SamplingParams {
    temperature: 0.2,
    max_tokens: 2000,
};

/// Result of one simplification call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplification {
    /// Raw markdown text. This is the grounding context for follow-up
    /// questions, not the rendered HTML.
    pub summary: String,
    /// The summary rendered to HTML.
    pub html: String,
    /// Whether the document was cut to the configured character cap
    /// before being sent to the model.
    pub truncated: bool,
}

/// Simplifies legal text at one of the three fixed levels with a single
/// remote chat-completion call. No caching: identical inputs re-invoke
/// the remote service.
pub struct SimplificationService {
    client: Arc<dyn ChatCompletions>,
    max_document_chars: usize,
}

impl SimplificationService {
    pub fn new(client: Arc<dyn ChatCompletions>, max_document_chars: usize) -> Self {
        Self {
            client,
            max_document_chars,
        }
    }

    pub async fn simplify(
        &self,
        text: &str,
        level: SimplificationLevel,
    ) -> Result<Simplification> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyDocument);
        }

        let (document, truncated) = cap_chars(trimmed, self.max_document_chars);
        if truncated {
            tracing::warn!(
                max_chars = self.max_document_chars,
                "document exceeds character cap; truncating before simplification"
            );
        }

        let messages = vec![
            ChatMessage::system(SIMPLIFIER_SYSTEM_PROMPT),
            ChatMessage::user(level.resolve(document)),
        ];

        tracing::info!(level = %level, chars = document.len(), "simplifying document");
        let raw = self.client.complete(messages, SIMPLIFY_PARAMS).await?;

        let summary = raw.trim().to_string();
        let html = markdown::render_html(&summary);

        Ok(Simplification {
            summary,
            html,
            truncated,
        })
    }
}

/// Cut `text` to at most `max_chars` characters, at a char boundary.
fn cap_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}
