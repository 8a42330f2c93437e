//! Conversion between canonical types and the `OpenAI` wire format

use crate::error::LlmError;
use crate::protocol::openai::{
    OpenAiContent, OpenAiContentPart, OpenAiFunction, OpenAiImageUrl, OpenAiMessage, OpenAiRequest, OpenAiResponse,
    OpenAiTool,
};
use crate::types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, Role};

// -- Outbound: canonical request -> OpenAI wire request --

/// Map a canonical role onto the `OpenAI` role vocabulary
///
/// Total and deterministic; there is no failing case.
pub fn to_openai_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Model => "assistant",
        Role::System => "system",
        Role::Tool => "tool",
    }
}

/// Map canonical parts onto `OpenAI` message content
///
/// A single text part uses the plain-string shorthand. Otherwise text
/// parts become text blocks and inline data becomes a base64 data-URI
/// image block; ordering is preserved. Function-call parts have no
/// request-side representation and are skipped.
fn to_openai_content(parts: &[Part]) -> OpenAiContent {
    if let [Part::Text { text }] = parts {
        return OpenAiContent::Text(text.clone());
    }

    let content_parts = parts
        .iter()
        .filter_map(|part| match part {
            Part::Text { text } => Some(OpenAiContentPart::Text { text: text.clone() }),
            Part::InlineData { inline_data } => Some(OpenAiContentPart::ImageUrl {
                image_url: OpenAiImageUrl {
                    url: format!("data:{};base64,{}", inline_data.mime_type, inline_data.data),
                },
            }),
            Part::FunctionCall { .. } => None,
        })
        .collect();

    OpenAiContent::Parts(content_parts)
}

/// Build the `OpenAI` wire request for a canonical generation request
///
/// Only the first declared function of each canonical tool group is
/// forwarded; the `OpenAI` tool schema has no grouping concept.
pub fn to_openai_request(request: &GenerateContentRequest, model: &str) -> OpenAiRequest {
    let messages = request
        .contents
        .iter()
        .map(|content| OpenAiMessage {
            role: to_openai_role(content.role).to_owned(),
            content: to_openai_content(&content.parts),
        })
        .collect();

    let tools = request.tools.as_ref().map(|tools| {
        tools
            .iter()
            .map(|tool| {
                let declaration = tool.function_declarations.first();
                OpenAiTool {
                    tool_type: "function".to_owned(),
                    function: OpenAiFunction {
                        name: declaration.map(|d| d.name.clone()).unwrap_or_default(),
                        description: declaration.and_then(|d| d.description.clone()),
                        parameters: declaration.and_then(|d| d.parameters.clone()),
                    },
                }
            })
            .collect()
    });

    OpenAiRequest {
        model: model.to_owned(),
        messages,
        max_tokens: request.max_output_tokens(),
        tools,
    }
}

// -- Inbound: OpenAI wire response -> canonical response --

/// Map an `OpenAI` response onto a single canonical candidate
///
/// Tool-call arguments arrive JSON-encoded; a parse failure fails the
/// whole call rather than letting a garbled tool call through.
pub fn from_openai_response(response: OpenAiResponse) -> Result<GenerateContentResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Upstream("provider returned no choices".to_owned()))?;

    let mut parts = vec![Part::text(choice.message.content.unwrap_or_default())];

    if let Some(tool_calls) = choice.message.tool_calls {
        for tool_call in tool_calls {
            let args = serde_json::from_str(&tool_call.function.arguments).map_err(|e| {
                LlmError::MalformedToolCall {
                    tool: tool_call.function.name.clone(),
                    reason: e.to_string(),
                }
            })?;
            parts.push(Part::function_call(tool_call.function.name, args));
        }
    }

    Ok(GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content::new(Role::Model, parts),
        }],
    })
}
