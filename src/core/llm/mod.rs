//! Remote chat-completions collaborator.
//!
//! The provider seam is the [`ChatCompletions`] trait; the single
//! production implementation is [`OpenAiCompatClient`], an
//! OpenAI-compatible client pointed at Groq by default.

pub mod client;
pub mod types;

pub use client::{ChatCompletions, OpenAiCompatClient, SamplingParams};
pub use types::{ChatMessage, MessageRole};
