//! Conversion between canonical types and the Ollama wire format

use crate::protocol::ollama::{OllamaChatRequest, OllamaChatResponse, OllamaMessage};
use crate::types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part, Role};

// -- Outbound: canonical request -> Ollama wire request --

/// Map a canonical role onto the Ollama role vocabulary
pub fn to_ollama_role(role: Role) -> &'static str {
    match role {
        Role::User | Role::Tool => "user",
        Role::Model => "assistant",
        Role::System => "system",
    }
}

/// Concatenate canonical parts into a single message string
///
/// Inline-data parts are intentionally dropped rather than rejected:
/// the chat endpoint takes plain text, and a local model that cannot
/// see an image should still answer the textual portion of the turn.
fn to_ollama_content(parts: &[Part]) -> String {
    parts
        .iter()
        .filter_map(|p| match p {
            Part::Text { text } => Some(text.as_str()),
            Part::InlineData { .. } | Part::FunctionCall { .. } => None,
        })
        .collect()
}

/// Build the Ollama wire request for a canonical generation request
pub fn to_ollama_request(request: &GenerateContentRequest, model: &str) -> OllamaChatRequest {
    let messages = request
        .contents
        .iter()
        .map(|content| OllamaMessage {
            role: to_ollama_role(content.role).to_owned(),
            content: to_ollama_content(&content.parts),
        })
        .collect();

    OllamaChatRequest {
        model: model.to_owned(),
        messages,
        stream: false,
    }
}

// -- Inbound: Ollama wire response -> canonical response --

/// Map an Ollama chat response onto a single canonical text candidate
pub fn from_ollama_response(response: OllamaChatResponse) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Content::new(Role::Model, vec![Part::text(response.message.content)]),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_mapping_is_total() {
        assert_eq!(to_ollama_role(Role::User), "user");
        assert_eq!(to_ollama_role(Role::Model), "assistant");
        assert_eq!(to_ollama_role(Role::System), "system");
        assert_eq!(to_ollama_role(Role::Tool), "user");
    }

    #[test]
    fn inline_data_is_dropped_not_rejected() {
        let request = GenerateContentRequest::from_contents(vec![Content::new(
            Role::User,
            vec![Part::text("hello"), Part::inline_data("image/png", "aGk=")],
        )]);

        let wire = to_ollama_request(&request, "llama3");
        assert_eq!(wire.messages[0].content, "hello");
        assert!(!wire.stream);
    }

    #[test]
    fn response_message_becomes_model_candidate() {
        let response = OllamaChatResponse {
            model: "llama3".to_owned(),
            message: OllamaMessage {
                role: "assistant".to_owned(),
                content: "hey".to_owned(),
            },
        };

        let canonical = from_ollama_response(response);
        assert_eq!(canonical.candidates[0].content.role, Role::Model);
        assert_eq!(canonical.candidates[0].content.as_text(), "hey");
    }
}
