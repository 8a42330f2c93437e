//! Gemini Generative Language API provider implementation
//!
//! The first-party backend already speaks the canonical shape, so this
//! translator passes requests and responses through with only thin wire
//! wrappers around them.

use async_trait::async_trait;
use prism_config::{Config, ProviderId, ProviderSettings};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{LlmProvider, ProviderCapabilities, setting};
use crate::error::LlmError;
use crate::protocol::gemini::{GeminiCountRequest, GeminiEmbedRequest, GeminiGenerateRequest, GeminiGenerationConfig};
use crate::types::{
    CountTokensRequest, CountTokensResponse, EmbedContentRequest, EmbedContentResponse, GenerateContentRequest,
    GenerateContentResponse,
};

/// Default Generative Language API base URL
pub(crate) const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Fallback generation model when settings omit one
pub(crate) const DEFAULT_MODEL: &str = "gemini-2.5-pro";

/// Embedding model; not configurable
const EMBEDDING_MODEL: &str = "text-embedding-004";

/// Gemini Generative Language API provider
pub struct GeminiProvider {
    client: Client,
    base_url: Url,
    api_key: Option<SecretString>,
    model: String,
}

impl GeminiProvider {
    /// Create from the active configuration
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Self::from_settings(config.provider_config(ProviderId::Gemini))
    }

    /// Create from raw provider settings
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded default base URL is invalid (should never happen).
    pub(crate) fn from_settings(settings: Option<&ProviderSettings>) -> Result<Self, LlmError> {
        let base_url = match setting(settings, "base_url") {
            Some(raw) => Url::parse(raw).map_err(|e| anyhow::anyhow!("invalid gemini base URL: {e}"))?,
            None => Url::parse(DEFAULT_BASE_URL).expect("valid default URL"),
        };

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: setting(settings, "api_key").map(SecretString::from),
            model: setting(settings, "model").unwrap_or(DEFAULT_MODEL).to_owned(),
        })
    }

    /// Build the URL for a model-scoped API method
    fn method_url(&self, model: &str, method: &str) -> String {
        use std::fmt::Write;

        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = format!("{base}/models/{model}:{method}");
        if let Some(key) = &self.api_key {
            let _ = write!(url, "?key={}", key.expose_secret());
        }
        url
    }

    fn resolve_model<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested.unwrap_or(&self.model)
    }

    async fn post_json<T, R>(&self, url: String, body: &T) -> Result<R, LlmError>
    where
        T: serde::Serialize + Sync,
        R: serde::de::DeserializeOwned,
    {
        let response = self.client.post(&url).json(body).send().await.map_err(|e| {
            tracing::error!(provider = "gemini", error = %e, "upstream request failed");
            LlmError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(provider = "gemini", status = %status, "upstream returned error");
            return Err(LlmError::Upstream(format!("provider returned {status}: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        ProviderId::Gemini.as_str()
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
        let model = self.resolve_model(request.model());
        let wire_request = GeminiGenerateRequest {
            contents: &request.contents,
            tools: request.tools.as_deref(),
            generation_config: request.generation_config.as_ref().map(|c| GeminiGenerationConfig {
                max_output_tokens: c.max_output_tokens,
            }),
        };

        self.post_json(self.method_url(model, "generateContent"), &wire_request)
            .await
    }

    async fn count_tokens(&self, request: &CountTokensRequest) -> Result<CountTokensResponse, LlmError> {
        let wire_request = GeminiCountRequest {
            contents: &request.contents,
        };

        self.post_json(self.method_url(&self.model, "countTokens"), &wire_request)
            .await
    }

    async fn embed_content(&self, request: &EmbedContentRequest) -> Result<EmbedContentResponse, LlmError> {
        let wire_request = GeminiEmbedRequest {
            model: format!("models/{EMBEDDING_MODEL}"),
            content: &request.content,
        };

        self.post_json(self.method_url(EMBEDDING_MODEL, "embedContent"), &wire_request)
            .await
    }
}
