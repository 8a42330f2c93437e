use base64::Engine as _;
use serde::{Deserialize, Serialize};

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Caller-authored message
    User,
    /// Model-assistant response
    Model,
    /// System instruction
    System,
    /// Tool result
    Tool,
}

/// One conversation turn: a role plus an ordered sequence of parts
///
/// Role alternation is not enforced at this layer; callers own turn
/// ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Role of the turn author
    pub role: Role,
    /// Ordered content parts
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self { role, parts }
    }

    /// A single-text user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Part::text(text)])
    }

    /// Concatenate the text parts, ignoring every other part kind
    pub fn as_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::Text { text } => Some(text.as_str()),
                Part::InlineData { .. } | Part::FunctionCall { .. } => None,
            })
            .collect()
    }
}

/// Individual part within a turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    /// Text content
    Text {
        /// The text string
        text: String,
    },
    /// Inline binary data (images and other media)
    InlineData {
        /// Payload with its mime type
        #[serde(rename = "inlineData")]
        inline_data: Blob,
    },
    /// A tool call requested by the model
    FunctionCall {
        /// Function name and structured arguments
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self::InlineData {
            inline_data: Blob {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    pub fn function_call(name: impl Into<String>, args: serde_json::Value) -> Self {
        Self::FunctionCall {
            function_call: FunctionCall {
                name: name.into(),
                args,
            },
        }
    }
}

/// Binary payload carried inline as base64 with its mime type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    /// IANA mime type, e.g. `image/png`
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    /// Base64-encoded payload
    pub data: String,
}

impl Blob {
    /// Encode raw bytes into an inline blob
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }
}

/// A model-requested invocation of a caller-supplied function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Function name
    pub name: String,
    /// Structured arguments
    #[serde(default)]
    pub args: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_text_skips_non_text_parts() {
        let content = Content::new(
            Role::User,
            vec![
                Part::text("describe "),
                Part::inline_data("image/png", "aGk="),
                Part::text("this"),
            ],
        );
        assert_eq!(content.as_text(), "describe this");
    }

    #[test]
    fn parts_serialize_with_first_party_wire_names() {
        let part = Part::inline_data("image/png", "aGk=");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"inlineData": {"mimeType": "image/png", "data": "aGk="}})
        );

        let call = Part::function_call("lookup", serde_json::json!({"q": "rust"}));
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"functionCall": {"name": "lookup", "args": {"q": "rust"}}})
        );
    }

    #[test]
    fn blob_from_bytes_encodes_base64() {
        let blob = Blob::from_bytes("image/png", b"hi");
        assert_eq!(blob.data, "aGk=");
    }
}
