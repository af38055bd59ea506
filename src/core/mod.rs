//! Core services: extraction, prompt templates, simplification, and
//! summary-grounded conversation.

pub mod chat;
pub mod error;
pub mod extract;
pub mod llm;
pub mod logging;
pub mod markdown;
pub mod prompts;
pub mod session;
pub mod simplify;

pub use error::{Error, Result};
