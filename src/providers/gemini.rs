//! Gemini client construction. Every agent and guardrail judge is built from the one
//! client returned here, so provider settings live in [`BankConfig`] only.
use rig::providers::gemini;

use crate::config::BankConfig;

pub type CompletionModel = gemini::completion::CompletionModel;

pub fn client(config: &BankConfig) -> gemini::Client {
    let api_key = config.api_key.as_deref().unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("No model API key configured, remote calls will fail");
    }

    match &config.base_url {
        Some(url) => gemini::Client::from_url(api_key, url),
        None => gemini::Client::new(api_key),
    }
}
