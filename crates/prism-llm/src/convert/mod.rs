//! Conversion between the canonical vocabulary and backend wire formats
//!
//! Pure functions only; no I/O. Each module maps canonical requests out
//! to one backend's wire format and backend responses back to a
//! canonical [`GenerateContentResponse`](crate::types::GenerateContentResponse)
//! whose candidate role is always the model-assistant role. The
//! first-party backend needs no conversion.

pub mod anthropic;
pub mod ollama;
pub mod openai;
