use std::fmt;

use serde::{Deserialize, Serialize};

/// The set of supported provider backends
///
/// Closed per build: selection happens over this enum, not over
/// dynamically discovered plugins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    /// First-party multimodal API (the default)
    Gemini,
    /// `OpenAI`-compatible chat completion API
    OpenAi,
    /// Anthropic Messages API
    Anthropic,
    /// Locally hosted Ollama inference server
    Ollama,
}

impl ProviderId {
    /// Parse a settings-file identifier, `None` for unrecognized values
    pub fn from_identifier(s: &str) -> Option<Self> {
        match s {
            "gemini" => Some(Self::Gemini),
            "openai" => Some(Self::OpenAi),
            "anthropic" => Some(Self::Anthropic),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    /// The identifier used in settings files and log output
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for id in [
            ProviderId::Gemini,
            ProviderId::OpenAi,
            ProviderId::Anthropic,
            ProviderId::Ollama,
        ] {
            assert_eq!(ProviderId::from_identifier(id.as_str()), Some(id));
        }
    }

    #[test]
    fn unknown_identifier_is_none() {
        assert_eq!(ProviderId::from_identifier("bedrock"), None);
        assert_eq!(ProviderId::from_identifier(""), None);
    }
}
