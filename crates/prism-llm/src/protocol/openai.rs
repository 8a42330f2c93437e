//! `OpenAI` chat completion API wire format types

use serde::{Deserialize, Serialize};

// -- Request types --

/// `OpenAI` chat completion request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OpenAiMessage>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Tool definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OpenAiTool>>,
}

/// `OpenAI` message within a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiMessage {
    /// Message role
    pub role: String,
    /// Content (string or array of content parts)
    pub content: OpenAiContent,
}

/// `OpenAI` content can be a string or array of content parts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpenAiContent {
    /// Plain text content
    Text(String),
    /// Array of content parts
    Parts(Vec<OpenAiContentPart>),
}

/// Individual content part in an `OpenAI` message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAiContentPart {
    /// Text content
    Text {
        /// The text string
        text: String,
    },
    /// Image content via URL
    ImageUrl {
        /// Image URL specification
        image_url: OpenAiImageUrl,
    },
}

/// Image URL specification for `OpenAI`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiImageUrl {
    /// Image URL or base64 data URI
    pub url: String,
}

/// `OpenAI` tool definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiTool {
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function specification
    pub function: OpenAiFunction,
}

/// `OpenAI` function specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiFunction {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

/// `OpenAI` tool call within a response message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiToolCall {
    /// Unique tool call identifier
    pub id: String,
    /// Tool type (always "function")
    #[serde(rename = "type")]
    pub tool_type: String,
    /// Function call details
    pub function: OpenAiFunctionCall,
}

/// Function call details within an `OpenAI` tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiFunctionCall {
    /// Function name
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

// -- Response types --

/// `OpenAI` chat completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiResponse {
    /// Response identifier
    #[serde(default)]
    pub id: String,
    /// Model used
    #[serde(default)]
    pub model: String,
    /// Generated choices
    pub choices: Vec<OpenAiChoice>,
}

/// Choice within an `OpenAI` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChoice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: OpenAiChoiceMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Message within an `OpenAI` response choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiChoiceMessage {
    /// Role (always "assistant")
    pub role: String,
    /// Text content
    #[serde(default)]
    pub content: Option<String>,
    /// Tool calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAiToolCall>>,
}

// -- Embeddings types --

/// `OpenAI` embeddings request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiEmbeddingRequest {
    /// Text to embed
    pub input: String,
    /// Embedding model identifier
    pub model: String,
}

/// `OpenAI` embeddings response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiEmbeddingResponse {
    /// Embedding data, one entry per input
    pub data: Vec<OpenAiEmbeddingData>,
}

/// Single embedding vector within an embeddings response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiEmbeddingData {
    /// The embedding vector
    pub embedding: Vec<f32>,
    /// Position of the corresponding input
    #[serde(default)]
    pub index: usize,
}
