//! Error taxonomy shared by all core services.
//!
//! Presentation adapters decide how each variant is surfaced: the REST
//! facade maps them to HTTP status codes, the CLI prints them to stderr.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read PDF: {0}")]
    Extraction(String),

    #[error("unknown simplification level: {0}")]
    InvalidLevel(String),

    #[error("document text is empty")]
    EmptyDocument,

    #[error("question is empty")]
    EmptyQuestion,

    #[error("no summary available yet; simplify a document first")]
    NoContext,

    #[error("no API key configured; set GROQ_API_KEY or api.api_key in the config file")]
    MissingCredential,

    #[error("chat completion request failed: {0}")]
    RemoteCall(String),

    #[error("unknown session: {0}")]
    SessionNotFound(String),
}
