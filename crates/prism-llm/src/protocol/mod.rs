//! Backend-native wire format types
//!
//! One module per backend family. These structs mirror each backend's
//! HTTP API exactly; all canonical↔wire mapping lives in
//! [`crate::convert`].

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;
