//! The assistant's personas: the front-desk dispatcher and the three specialist desks.
pub mod personas;

pub use personas::Persona;

use std::future::Future;

use rig::{
    agent::Agent,
    completion::{CompletionModel, Prompt, PromptError},
};

/// Anything that can answer a rendered prompt.
pub trait Responder: Send + Sync {
    fn respond(&self, prompt: &str) -> impl Future<Output = Result<String, PromptError>> + Send;
}

impl<M> Responder for Agent<M>
where
    M: CompletionModel,
{
    async fn respond(&self, prompt: &str) -> Result<String, PromptError> {
        self.prompt(prompt).await
    }
}
