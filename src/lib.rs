/// plainbrief - Legal Document Simplifier
///
/// Core library providing PDF text extraction, LLM-backed document
/// simplification at three fixed levels, and a chatbot that answers
/// questions grounded strictly in the generated summary.

pub mod cli;
pub mod config;
pub mod core;
pub mod server;


pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
