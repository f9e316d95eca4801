//! Chat-completion client used to structure card text.
//!
//! - `LlmProvider` picks an OpenAI-compatible backend from `LlmConfig` and
//!   reports itself unavailable when no usable key or endpoint is configured
//! - `LlmApiClient` wraps `async-openai` with retries and error mapping
//! - `prompts` holds the card structuring prompt

mod api;
pub mod prompts;
mod provider;

pub use api::LlmApiClient;
pub use provider::{CompletionOptions, LlmBackend, LlmProvider};
