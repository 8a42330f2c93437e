use serde::{Deserialize, Serialize};

use super::message::Content;
use super::tool::Tool;

/// Parameters controlling generation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Model identifier override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// Canonical content generation request
///
/// Immutable once constructed; every translator receives this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Ordered conversation turns
    pub contents: Vec<Content>,
    /// Tool declarations available to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    /// Generation parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single-turn request with no tools or parameters
    pub fn from_contents(contents: Vec<Content>) -> Self {
        Self {
            contents,
            tools: None,
            generation_config: None,
        }
    }

    /// Requested model identifier, if any
    pub fn model(&self) -> Option<&str> {
        self.generation_config.as_ref().and_then(|c| c.model.as_deref())
    }

    /// Requested output-size cap, if any
    pub fn max_output_tokens(&self) -> Option<u32> {
        self.generation_config.as_ref().and_then(|c| c.max_output_tokens)
    }
}

/// Canonical token counting request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountTokensRequest {
    /// Turns to count tokens over
    pub contents: Vec<Content>,
}

/// Canonical embedding request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbedContentRequest {
    /// The single turn to embed
    pub content: Content,
}
