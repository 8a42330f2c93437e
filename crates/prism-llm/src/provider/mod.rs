//! Provider trait and translator implementations for LLM backends

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

use async_trait::async_trait;
use prism_config::ProviderSettings;

use crate::error::LlmError;
use crate::types::{
    CountTokensRequest, CountTokensResponse, EmbedContentRequest, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse,
};

pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Capabilities advertised by a provider
///
/// Content generation is universal; the other two operations vary per
/// backend and fail with [`LlmError::Unsupported`] where absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// Whether the backend can count tokens (natively or via a local
    /// approximation)
    pub token_counting: bool,
    /// Whether the backend can embed content
    pub embedding: bool,
}

/// Trait implemented by each LLM provider backend
///
/// Implementations hold no cross-request state; every call is
/// independent. A translator is constructed once per provider
/// selection and owns its backend client for its lifetime; switch
/// providers by constructing a new translator, never by mutating an
/// existing one.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider identifier, as used in settings and log output
    fn name(&self) -> &'static str;

    /// Advertised capabilities
    fn capabilities(&self) -> ProviderCapabilities;

    /// Send a content generation request
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError>;

    /// Count the tokens in a request
    async fn count_tokens(&self, request: &CountTokensRequest) -> Result<CountTokensResponse, LlmError>;

    /// Generate an embedding for a single turn
    async fn embed_content(&self, request: &EmbedContentRequest) -> Result<EmbedContentResponse, LlmError>;
}

/// Look up a non-empty setting value
///
/// The settings UI persists empty strings for unedited fields; those
/// count as absent.
pub(crate) fn setting<'a>(settings: Option<&'a ProviderSettings>, key: &str) -> Option<&'a str> {
    settings
        .and_then(|s| s.get(key))
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}
