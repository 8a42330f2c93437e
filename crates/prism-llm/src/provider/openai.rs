//! `OpenAI`-compatible chat completion API provider implementation

use async_trait::async_trait;
use prism_config::{Config, ProviderId, ProviderSettings};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tiktoken_rs::CoreBPE;

use super::{LlmProvider, ProviderCapabilities, setting};
use crate::convert::openai::{from_openai_response, to_openai_request};
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiEmbeddingRequest, OpenAiEmbeddingResponse, OpenAiResponse};
use crate::types::{
    ContentEmbedding, CountTokensRequest, CountTokensResponse, EmbedContentRequest, EmbedContentResponse,
    GenerateContentRequest, GenerateContentResponse,
};

/// Default `OpenAI` API base URL
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Fallback generation model when settings omit one
pub(crate) const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Embedding model; not configurable
const EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// `OpenAI`-compatible chat completion API provider
///
/// The backend has no token-accounting endpoint, so token counts are a
/// local approximation computed with the `cl100k_base` tokenizer.
pub struct OpenAiProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
    tokenizer: CoreBPE,
}

impl OpenAiProvider {
    /// Create from the active configuration
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Self::from_settings(config.provider_config(ProviderId::OpenAi))
    }

    /// Create from raw provider settings
    pub(crate) fn from_settings(settings: Option<&ProviderSettings>) -> Result<Self, LlmError> {
        let tokenizer = tiktoken_rs::cl100k_base().map_err(LlmError::Internal)?;

        Ok(Self {
            client: Client::new(),
            base_url: setting(settings, "base_url").unwrap_or(DEFAULT_BASE_URL).to_owned(),
            api_key: setting(settings, "api_key").map(SecretString::from),
            model: setting(settings, "model").unwrap_or(DEFAULT_MODEL).to_owned(),
            tokenizer,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key.expose_secret()),
            None => builder,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        ProviderId::OpenAi.as_str()
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities {
            token_counting: true,
            embedding: true,
        }
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, LlmError> {
        let model = request.model().unwrap_or(&self.model);
        let wire_request = to_openai_request(request, model);

        let response = self
            .authorized(self.client.post(self.endpoint("chat/completions")))
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

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        from_openai_response(wire_response)
    }

    /// Local approximation; never touches the network
    async fn count_tokens(&self, request: &CountTokensRequest) -> Result<CountTokensResponse, LlmError> {
        let text: String = request.contents.iter().map(|content| content.as_text()).collect();
        let tokens = self.tokenizer.encode_with_special_tokens(&text);

        Ok(CountTokensResponse {
            total_tokens: u32::try_from(tokens.len()).unwrap_or(u32::MAX),
        })
    }

    async fn embed_content(&self, request: &EmbedContentRequest) -> Result<EmbedContentResponse, LlmError> {
        let wire_request = OpenAiEmbeddingRequest {
            input: request.content.as_text(),
            model: EMBEDDING_MODEL.to_owned(),
        };

        let response = self
            .authorized(self.client.post(self.endpoint("embeddings")))
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

        let wire_response: OpenAiEmbeddingResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        let values = wire_response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| LlmError::Upstream("provider returned no embedding data".to_owned()))?;

        Ok(EmbedContentResponse {
            embedding: ContentEmbedding { values },
        })
    }
}
