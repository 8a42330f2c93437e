//! Provider abstraction layer for prism
//!
//! Provides one canonical request/response vocabulary over multiple LLM
//! backends (Gemini, `OpenAI`-compatible, Anthropic, Ollama) with
//! per-backend translators, runtime provider selection, and a bounded
//! connectivity probe for validating credentials before they are saved.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod factory;
pub mod probe;
pub mod protocol;
pub mod provider;
pub mod types;

pub use error::{LlmError, Operation};
pub use factory::select;
pub use probe::{ProbeResult, probe};
pub use provider::{LlmProvider, ProviderCapabilities};
pub use types::{GenerateContentRequest, GenerateContentResponse};
