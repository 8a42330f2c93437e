//! Bounded connectivity probe
//!
//! Fires one cheap request against a provider backend to validate
//! credentials and reachability before settings are saved. Every probe
//! is bounded by a hard timeout so a wedged backend cannot hang the
//! caller.

use std::time::Duration;

use prism_config::{ProviderId, ProviderSettings};
use reqwest::Client;

use crate::protocol::anthropic::{AnthropicMessage, AnthropicRequest};
use crate::provider::{anthropic, ollama, openai, setting};

/// Hard upper bound on a single probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Message reported when the probe deadline elapses
const TIMEOUT_MESSAGE: &str = "Connection timed out after 5 seconds";

/// Outcome of a connectivity probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The backend answered and accepted the credentials
    Ok,
    /// The backend could not be reached or rejected the request
    Failed {
        /// Human-readable reason, suitable for display in a settings UI
        message: String,
    },
}

impl ProbeResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    fn failed(message: impl Into<String>) -> Self {
        Self::Failed { message: message.into() }
    }
}

/// Probe the given provider with the given settings
///
/// Settings are taken directly rather than through a full configuration
/// so the caller can probe values the user has typed but not yet saved.
pub async fn probe(id: ProviderId, settings: Option<&ProviderSettings>) -> ProbeResult {
    tracing::debug!(provider = %id, "probing provider connectivity");

    let result = match id {
        // The first-party backend is assumed reachable; its credentials
        // are validated lazily on first real request.
        ProviderId::Gemini => ProbeResult::Ok,
        ProviderId::OpenAi => bounded(probe_openai(settings)).await,
        ProviderId::Anthropic => bounded(probe_anthropic(settings)).await,
        ProviderId::Ollama => bounded(probe_ollama(settings)).await,
    };

    if let ProbeResult::Failed { message } = &result {
        tracing::warn!(provider = %id, message = %message, "provider probe failed");
    }

    result
}

/// Race a probe against the hard deadline
///
/// On timeout the in-flight request future is dropped, which aborts the
/// underlying connection.
async fn bounded(fut: impl Future<Output = ProbeResult>) -> ProbeResult {
    match tokio::time::timeout(PROBE_TIMEOUT, fut).await {
        Ok(result) => result,
        Err(_) => ProbeResult::failed(TIMEOUT_MESSAGE),
    }
}

/// List models, the cheapest authenticated endpoint
async fn probe_openai(settings: Option<&ProviderSettings>) -> ProbeResult {
    let base_url = setting(settings, "base_url").unwrap_or(openai::DEFAULT_BASE_URL);
    let url = format!("{}/models", base_url.trim_end_matches('/'));

    let mut builder = Client::new().get(url);
    if let Some(key) = setting(settings, "api_key") {
        builder = builder.bearer_auth(key);
    }

    match builder.send().await {
        Ok(response) if response.status().is_success() => ProbeResult::Ok,
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            ProbeResult::failed(format!("provider returned {status}: {body}"))
        }
        Err(e) => ProbeResult::failed(e.to_string()),
    }
}

/// Send a minimal one-token generation request
///
/// Anthropic exposes no listing endpoint, so the probe asks for a single
/// token of output instead.
async fn probe_anthropic(settings: Option<&ProviderSettings>) -> ProbeResult {
    let base_url = setting(settings, "base_url").unwrap_or(anthropic::DEFAULT_BASE_URL);
    let url = format!("{}/messages", base_url.trim_end_matches('/'));

    let request = AnthropicRequest {
        model: setting(settings, "model").unwrap_or(anthropic::DEFAULT_MODEL).to_owned(),
        max_tokens: 1,
        messages: vec![AnthropicMessage {
            role: "user".to_owned(),
            content: "test".to_owned(),
        }],
    };

    let mut builder = Client::new()
        .post(url)
        .header("anthropic-version", anthropic::ANTHROPIC_VERSION)
        .json(&request);
    if let Some(key) = setting(settings, "api_key") {
        builder = builder.header("x-api-key", key);
    }

    match builder.send().await {
        Ok(response) if response.status().is_success() => ProbeResult::Ok,
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            ProbeResult::failed(format!("provider returned {status}: {body}"))
        }
        Err(e) => ProbeResult::failed(e.to_string()),
    }
}

/// Hit the local tag listing endpoint
async fn probe_ollama(settings: Option<&ProviderSettings>) -> ProbeResult {
    let host = setting(settings, "base_url").unwrap_or(ollama::DEFAULT_HOST);
    let url = format!("{}/api/tags", host.trim_end_matches('/'));

    match Client::new().get(url).send().await {
        Ok(response) if response.status().is_success() => ProbeResult::Ok,
        Ok(response) => {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            ProbeResult::failed(format!("provider returned {status}: {body}"))
        }
        Err(e) if e.is_connect() => ProbeResult::failed(format!(
            "Could not connect to Ollama at {host}. Is the Ollama service running?"
        )),
        Err(e) => ProbeResult::failed(e.to_string()),
    }
}
