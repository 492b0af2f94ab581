//! Wires the configured provider into a ready-to-use [`Dispatcher`].
use rig::agent::Agent;

use crate::{
    agents::personas::{self, Persona},
    config::BankConfig,
    guardrails::{
        ExtractorJudge, INPUT_GUARDRAIL_INSTRUCTIONS, OUTPUT_GUARDRAIL_INSTRUCTIONS, SlangCheck,
        TopicCheck,
    },
    providers::gemini::{self, CompletionModel},
    routing::{Dispatcher, DispatcherError},
    tools::{ServiceKind, TokenIssuer},
};

pub type BankAgent = Agent<CompletionModel>;
pub type InputJudge = ExtractorJudge<CompletionModel, SlangCheck>;
pub type OutputJudge = ExtractorJudge<CompletionModel, TopicCheck>;

/// The assistant as run by the binary.
pub type BankWise = Dispatcher<BankAgent, InputJudge, OutputJudge>;

pub fn build(config: &BankConfig) -> Result<BankWise, DispatcherError> {
    let client = gemini::client(config);

    let agent = |persona: Persona| -> BankAgent {
        tracing::debug!(persona = persona.name, model = %config.model, "Building agent");
        client.agent(&config.model).preamble(&persona.preamble()).build()
    };

    let input_judge = client
        .extractor::<SlangCheck>(&config.model)
        .preamble(INPUT_GUARDRAIL_INSTRUCTIONS)
        .build();

    let output_judge = client
        .extractor::<TopicCheck>(&config.model)
        .preamble(OUTPUT_GUARDRAIL_INSTRUCTIONS)
        .build();

    let mut builder = Dispatcher::builder()
        .front_desk(agent(personas::DISPATCHER))
        .input_guardrail(ExtractorJudge::new(input_judge))
        .output_guardrail(ExtractorJudge::new(output_judge))
        .token_issuer(TokenIssuer::new())
        .threshold(config.handoff_threshold);

    for kind in ServiceKind::SPECIALISTS {
        if let Some(persona) = personas::specialist_for(kind) {
            builder = builder.specialist(kind, agent(persona));
        }
    }

    builder.build()
}
