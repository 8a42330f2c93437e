//! Ollama HTTP API wire format types

use serde::{Deserialize, Serialize};

// -- Chat types --

/// Ollama chat request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OllamaMessage>,
    /// Whether to stream the response; always false here
    pub stream: bool,
}

/// Ollama chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaMessage {
    /// Role ("user", "assistant" or "system")
    pub role: String,
    /// Message text
    pub content: String,
}

/// Ollama chat response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaChatResponse {
    /// Model used
    #[serde(default)]
    pub model: String,
    /// The generated message
    pub message: OllamaMessage,
}

// -- Embeddings types --

/// Ollama embeddings request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaEmbeddingsRequest {
    /// Model identifier
    pub model: String,
    /// Text to embed
    pub prompt: String,
}

/// Ollama embeddings response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaEmbeddingsResponse {
    /// The embedding vector
    pub embedding: Vec<f32>,
}

// -- Model listing types --

/// Ollama local model list (`/api/tags`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaTagList {
    /// Locally available models
    pub models: Vec<OllamaModel>,
}

/// Ollama local model entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaModel {
    /// Model name, e.g. `llama3:latest`
    pub name: String,
}
