//! Summary-grounded conversation service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::llm::{ChatCompletions, ChatMessage, SamplingParams};

/// Slightly higher temperature than simplification: conversational tone
/// may vary, correctness is enforced by the grounding instruction.
const CHAT_PARAMS: SamplingParams = SamplingParams {
    temperature: 0.5,
    max_tokens: 1000,
};

/// Role of one conversation turn. The canonical vocabulary is
/// `user`/`assistant`; `"ai"` is accepted on the wire and normalized
/// here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    #[serde(alias = "ai")]
    Assistant,
}

/// One prior exchange in the conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

fn grounding_prompt(summary: &str) -> String {
    format!(
        "You are a helpful legal assistant. A user has received a simplified summary of a legal document.\n\
         Your job is to answer their questions based ONLY on the provided summary.\n\
         Do not invent information or use external knowledge. If the answer is not in the summary, say so.\n\
         Be friendly, clear, and concise.\n\
         \n\
         Provided Summary:\n\
         ---\n\
         {summary}\n\
         ---\n\
         Now, answer the user's question."
    )
}

/// Build the message sequence for one question: the grounding system
/// prompt, the prior turns in original order, then the question as the
/// final user message. If the history tail already holds the question as
/// a user turn it is dropped, so the question appears exactly once.
pub fn build_messages(
    question: &str,
    history: &[ConversationTurn],
    summary: &str,
) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(grounding_prompt(summary))];

    let mut turns = history;
    if let Some(last) = turns.last() {
        if last.role == TurnRole::User && last.content == question {
            turns = &turns[..turns.len() - 1];
        }
    }

    for turn in turns {
        messages.push(match turn.role {
            TurnRole::User => ChatMessage::user(turn.content.clone()),
            TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
        });
    }

    messages.push(ChatMessage::user(question));
    messages
}

/// Answers questions restricted to a previously generated summary with a
/// single remote chat-completion call per question. Never mutates
/// session state; history is owned and threaded by the caller.
pub struct ConversationService {
    client: Arc<dyn ChatCompletions>,
}

impl ConversationService {
    pub fn new(client: Arc<dyn ChatCompletions>) -> Self {
        Self { client }
    }

    pub async fn ask(
        &self,
        question: &str,
        history: &[ConversationTurn],
        summary: &str,
    ) -> Result<String> {
        if summary.trim().is_empty() {
            return Err(Error::NoContext);
        }
        let question = question.trim();
        if question.is_empty() {
            return Err(Error::EmptyQuestion);
        }

        let messages = build_messages(question, history, summary);

        tracing::info!(turns = history.len(), "answering question about summary");
        let answer = self.client.complete(messages, CHAT_PARAMS).await?;

        Ok(answer.trim().to_string())
    }
}
