use std::fmt;

use prism_config::ProviderId;
use thiserror::Error;

/// Operations exposed by the provider contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Content generation
    Generate,
    /// Token counting
    CountTokens,
    /// Content embedding
    Embed,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Generate => "content generation",
            Self::CountTokens => "token counting",
            Self::Embed => "embedding",
        })
    }
}

/// Errors that can occur during LLM operations
///
/// All variants are terminal for the call that raised them: no retries
/// and no fallback to another provider happen at this layer.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Backend has no equivalent capability
    #[error("{operation} is not supported by the {provider} provider")]
    Unsupported {
        provider: ProviderId,
        operation: Operation,
    },

    /// Input uses a content kind the selected backend cannot represent
    #[error("unsupported content: {0}")]
    UnsupportedContent(String),

    /// Backend returned a tool call whose arguments are not valid JSON
    #[error("failed to parse tool arguments for tool {tool}: {reason}")]
    MalformedToolCall { tool: String, reason: String },

    /// Transport, authentication or quota failure surfaced by the backend
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
