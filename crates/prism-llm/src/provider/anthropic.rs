//! Anthropic Messages API provider implementation

use async_trait::async_trait;
use prism_config::{Config, ProviderId, ProviderSettings};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use super::{LlmProvider, ProviderCapabilities, setting};
use crate::convert::anthropic::{from_anthropic_response, to_anthropic_request};
use crate::error::{LlmError, Operation};
use crate::protocol::anthropic::AnthropicResponse;
use crate::types::{
    CountTokensRequest, CountTokensResponse, EmbedContentRequest, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse,
};

/// Default Anthropic API base URL
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Anthropic API version header value
pub(crate) const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Fallback generation model when settings omit one
pub(crate) const DEFAULT_MODEL: &str = "claude-3-opus-20240229";

/// Anthropic Messages API provider
///
/// The backend has neither a token-accounting nor an embedding API, so
/// both operations fail with [`LlmError::Unsupported`].
pub struct AnthropicProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

impl AnthropicProvider {
    /// Create from the active configuration
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Self::from_settings(config.provider_config(ProviderId::Anthropic))
    }

    /// Create from raw provider settings
    pub(crate) fn from_settings(settings: Option<&ProviderSettings>) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::new(),
            base_url: setting(settings, "base_url").unwrap_or(DEFAULT_BASE_URL).to_owned(),
            api_key: setting(settings, "api_key").map(SecretString::from),
            model: setting(settings, "model").unwrap_or(DEFAULT_MODEL).to_owned(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        ProviderId::Anthropic.as_str()
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            token_counting: false,
            embedding: false,
        }
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let model = request.model().unwrap_or(&self.model);
        // Fails on unsupported content before anything goes on the wire
        let wire_request = to_anthropic_request(request, model)?;

        let mut builder = self
            .client
            .post(self.messages_url())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&wire_request);

        if let Some(key) = &self.api_key {
            builder = builder.header("x-api-key", key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(provider = %self.name(), error = %e, "upstream request failed");
            LlmError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = %self.name(), status = %status, "upstream returned error");
            return Err(LlmError::Upstream(format!("provider returned {status}: {body}")));
        }

        let wire_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        Ok(from_anthropic_response(wire_response))
    }

    async fn count_tokens(&self, _request: &CountTokensRequest) -> Result<CountTokensResponse, LlmError> {
        Err(LlmError::Unsupported {
            provider: ProviderId::Anthropic,
            operation: Operation::CountTokens,
        })
    }

    async fn embed_content(&self, _request: &EmbedContentRequest) -> Result<EmbedContentResponse, LlmError> {
        Err(LlmError::Unsupported {
            provider: ProviderId::Anthropic,
            operation: Operation::Embed,
        })
    }
}
