//! Gemini Generative Language API request wrappers
//!
//! The first-party backend already speaks the canonical shape, so its
//! responses deserialize straight into [`crate::types`]. Only the
//! request bodies need thin wrappers: the wire format carries the model
//! in the URL rather than in the body.

use serde::Serialize;

use crate::types::{Content, Tool};

/// Gemini `generateContent` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerateRequest<'a> {
    /// Ordered conversation turns (canonical passthrough)
    pub contents: &'a [Content],
    /// Tool declarations (canonical passthrough)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<&'a [Tool]>,
    /// Generation parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiGenerationConfig>,
}

/// Gemini generation parameters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Gemini `countTokens` request body
#[derive(Debug, Serialize)]
pub struct GeminiCountRequest<'a> {
    /// Turns to count tokens over (canonical passthrough)
    pub contents: &'a [Content],
}

/// Gemini `embedContent` request body
#[derive(Debug, Serialize)]
pub struct GeminiEmbedRequest<'a> {
    /// Embedding model resource name, e.g. `models/text-embedding-004`
    pub model: String,
    /// The turn to embed (canonical passthrough)
    pub content: &'a Content,
}
