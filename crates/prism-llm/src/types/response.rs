use serde::{Deserialize, Serialize};

use super::message::Content;

/// Canonical content generation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate outputs; translators produce at least one for a
    /// non-empty backend response
    pub candidates: Vec<Candidate>,
}

/// One candidate output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// The generated turn; role is always [`Role::Model`](super::Role::Model)
    pub content: Content,
}

/// Canonical token count result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    /// Total tokens across the request contents
    pub total_tokens: u32,
}

/// Canonical embedding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedContentResponse {
    /// The embedding vector
    pub embedding: ContentEmbedding,
}

/// Fixed-length numeric embedding vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEmbedding {
    /// Vector components
    pub values: Vec<f32>,
}
