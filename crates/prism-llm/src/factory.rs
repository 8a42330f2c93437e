//! Provider selection

use prism_config::{Config, ProviderId};

use crate::error::LlmError;
use crate::provider::{AnthropicProvider, GeminiProvider, LlmProvider, OllamaProvider, OpenAiProvider};

/// Construct the translator for the configured provider
///
/// An absent or unrecognized provider identifier selects the
/// first-party Gemini translator. Exactly one translator is constructed
/// per call and handed its own provider sub-configuration; call again
/// after a configuration change rather than mutating the returned
/// instance.
pub fn select(config: &Config) -> Result<Box<dyn LlmProvider>, LlmError> {
    let provider: Box<dyn LlmProvider> = match config.provider() {
        ProviderId::OpenAi => Box::new(OpenAiProvider::new(config)?),
        ProviderId::Anthropic => Box::new(AnthropicProvider::new(config)?),
        ProviderId::Ollama => Box::new(OllamaProvider::new(config)),
        ProviderId::Gemini => Box::new(GeminiProvider::new(config)?),
    };

    Ok(provider)
}
