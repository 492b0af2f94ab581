//! The hosted model provider.
pub mod gemini;
