//! Conversion between canonical types and the Anthropic wire format

use crate::error::LlmError;
use crate::protocol::anthropic::{AnthropicMessage, AnthropicRequest, AnthropicResponse, AnthropicResponseBlock};
use crate::types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, Role};

/// Default max tokens when not specified (Anthropic requires this field)
const DEFAULT_MAX_TOKENS: u32 = 4096;

// -- Outbound: canonical request -> Anthropic wire request --

/// Map a canonical role onto the Anthropic role vocabulary
///
/// Anthropic only knows "user" and "assistant"; every non-assistant
/// role maps to "user".
pub fn to_anthropic_role(role: Role) -> &'static str {
    match role {
        Role::Model => "assistant",
        Role::User | Role::System | Role::Tool => "user",
    }
}

/// Concatenate canonical parts into a single message string
///
/// This translator does not support image input: any inline-data part
/// is rejected here, before a request is issued.
fn to_anthropic_content(parts: &[Part]) -> Result<String, LlmError> {
    if parts.iter().any(|p| matches!(p, Part::InlineData { .. })) {
        return Err(LlmError::UnsupportedContent(
            "the anthropic provider does not support image input".to_owned(),
        ));
    }

    Ok(parts
        .iter()
        .filter_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        })
        .collect())
}

/// Build the Anthropic wire request for a canonical generation request
pub fn to_anthropic_request(request: &GenerateContentRequest, model: &str) -> Result<AnthropicRequest, LlmError> {
    let messages = request
        .contents
        .iter()
        .map(|content| {
            Ok(AnthropicMessage {
                role: to_anthropic_role(content.role).to_owned(),
                content: to_anthropic_content(&content.parts)?,
            })
        })
        .collect::<Result<Vec<_>, LlmError>>()?;

    Ok(AnthropicRequest {
        model: model.to_owned(),
        max_tokens: request.max_output_tokens().unwrap_or(DEFAULT_MAX_TOKENS),
        messages,
    })
}

// -- Inbound: Anthropic wire response -> canonical response --

/// Map an Anthropic response onto a single canonical text candidate
pub fn from_anthropic_response(response: AnthropicResponse) -> GenerateContentResponse {
    let text: String = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            AnthropicResponseBlock::Text { text } => Some(text),
            AnthropicResponseBlock::ToolUse { .. } => None,
        })
        .collect();

    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content::new(Role::Model, vec![Part::text(text)]),
        }],
    }
}
