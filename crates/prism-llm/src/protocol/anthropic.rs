//! Anthropic Messages API wire format types

use serde::{Deserialize, Serialize};

// -- Request types --

/// Anthropic messages API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicRequest {
    /// Model identifier
    pub model: String,
    /// Maximum tokens to generate (required by Anthropic)
    pub max_tokens: u32,
    /// Conversation messages
    pub messages: Vec<AnthropicMessage>,
}

/// Anthropic message
///
/// Content is the plain-string shorthand; this translator only sends
/// text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicMessage {
    /// Role ("user" or "assistant")
    pub role: String,
    /// Message text
    pub content: String,
}

// -- Response types --

/// Anthropic messages API response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicResponse {
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Model used
    #[serde(default)]
    pub model: String,
    /// Response content blocks
    pub content: Vec<AnthropicResponseBlock>,
    /// Why generation stopped
    #[serde(default)]
    pub stop_reason: Option<String>,
}

/// Content block in an Anthropic response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicResponseBlock {
    /// Text content
    Text {
        /// The text string
        text: String,
    },
    /// Tool use request from the assistant
    ToolUse {
        /// Tool use identifier
        id: String,
        /// Tool name
        name: String,
        /// Tool input as JSON
        input: serde_json::Value,
    },
}
