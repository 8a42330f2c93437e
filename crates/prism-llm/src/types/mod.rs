//! Canonical request/response vocabulary shared by all translators
//!
//! Pure value types; translators are the only code that interprets the
//! variant tags. The wire names follow the first-party camelCase
//! vocabulary so the Gemini translator can pass them through unchanged.

mod message;
mod request;
mod response;
mod tool;

pub use message::{Blob, Content, FunctionCall, Part, Role};
pub use request::{CountTokensRequest, EmbedContentRequest, GenerateContentRequest, GenerationConfig};
pub use response::{Candidate, ContentEmbedding, CountTokensResponse, EmbedContentResponse, GenerateContentResponse};
pub use tool::{FunctionDeclaration, Tool};
