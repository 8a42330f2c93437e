//! Ollama local inference server provider implementation

use async_trait::async_trait;
use prism_config::{Config, ProviderId, ProviderSettings};
use reqwest::Client;

use super::{LlmProvider, ProviderCapabilities, setting};
use crate::convert::ollama::{from_ollama_response, to_ollama_request};
use crate::error::{LlmError, Operation};
use crate::protocol::ollama::{OllamaChatResponse, OllamaEmbeddingsRequest, OllamaEmbeddingsResponse, OllamaTagList};
use crate::types::{
    ContentEmbedding, CountTokensRequest, CountTokensResponse, EmbedContentRequest, EmbedContentResponse,
    GenerateContentRequest, GenerateContentResponse,
};

/// Default Ollama host
pub(crate) const DEFAULT_HOST: &str = "http://localhost:11434";

/// Fallback model when settings omit one
pub(crate) const DEFAULT_MODEL: &str = "llama3";

/// Ollama local inference server provider
///
/// The server has no token-accounting API; that operation fails with
/// [`LlmError::Unsupported`].
pub struct OllamaProvider {
    client: Client,
    host: String,
    model: String,
}

impl OllamaProvider {
    /// Create from the active configuration
    pub fn new(config: &Config) -> Self {
        Self::from_settings(config.provider_config(ProviderId::Ollama))
    }

    /// Create from raw provider settings
    pub(crate) fn from_settings(settings: Option<&ProviderSettings>) -> Self {
        Self {
            client: Client::new(),
            host: setting(settings, "base_url").unwrap_or(DEFAULT_HOST).to_owned(),
            model: setting(settings, "model").unwrap_or(DEFAULT_MODEL).to_owned(),
        }
    }

    /// The configured host this provider talks to
    pub fn host(&self) -> &str {
        &self.host
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.host.trim_end_matches('/'))
    }

    /// List the models available on the local server
    ///
    /// Used by the configuration UI to offer a model picker.
    pub async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let response = self
            .client
            .get(self.endpoint("api/tags"))
            .send()
            .await
            .map_err(|e| LlmError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream(format!("provider returned {status}: {body}")));
        }

        let tags: OllamaTagList = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        ProviderId::Ollama.as_str()
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            token_counting: false,
            embedding: true,
        }
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let model = request.model().unwrap_or(&self.model);
        let wire_request = to_ollama_request(request, model);

        let response = self
            .client
            .post(self.endpoint("api/chat"))
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name(), error = %e, "upstream request failed");
                LlmError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = %self.name(), status = %status, "upstream returned error");
            return Err(LlmError::Upstream(format!("provider returned {status}: {body}")));
        }

        let wire_response: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        Ok(from_ollama_response(wire_response))
    }

    async fn count_tokens(&self, _request: &CountTokensRequest) -> Result<CountTokensResponse, LlmError> {
        Err(LlmError::Unsupported {
            provider: ProviderId::Ollama,
            operation: Operation::CountTokens,
        })
    }

    async fn embed_content(&self, request: &EmbedContentRequest) -> Result<EmbedContentResponse, LlmError> {
        let wire_request = OllamaEmbeddingsRequest {
            model: self.model.clone(),
            prompt: request.content.as_text(),
        };

        let response = self
            .client
            .post(self.endpoint("api/embeddings"))
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = %self.name(), error = %e, "embeddings request failed");
                LlmError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Upstream(format!("provider returned {status}: {body}")));
        }

        let wire_response: OllamaEmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        Ok(EmbedContentResponse {
            embedding: ContentEmbedding {
                values: wire_response.embedding,
            },
        })
    }
}
