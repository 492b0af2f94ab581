//! Input and output guardrails.
//!
//! A guardrail hands a piece of text to a [`Judge`] and trips when the judge flags it.
//! The remote judge is a `rig` extractor that fills in a small typed schema, but anything
//! implementing [`Judge`] can stand in for it (tests use canned verdicts).
use std::future::Future;

use rig::{
    completion::CompletionModel,
    extractor::{ExtractionError, Extractor},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Shown to the customer when the input guardrail trips.
pub const INPUT_REFUSAL: &str =
    "⚠️ We apologize, but your input contains inappropriate language. Please rephrase your request.";

/// Shown to the customer when the output guardrail trips.
pub const OUTPUT_REFUSAL: &str = "⚠️ We apologize, but we cannot process this request. Please contact our support team for assistance.";

pub const INPUT_GUARDRAIL_INSTRUCTIONS: &str = "Always check user queries for abusive or slang words to ensure appropriate communication.";

pub const OUTPUT_GUARDRAIL_INSTRUCTIONS: &str = "Ensure LLM responses are strictly related to banking. Set is_not_banking_related to True for non-banking topics, such as Hollywood or unrelated subjects.";

/// A judge's decision about one piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub flagged: bool,
    pub reasoning: String,
}

impl Judgment {
    pub fn flagged(reasoning: impl Into<String>) -> Self {
        Self {
            flagged: true,
            reasoning: reasoning.into(),
        }
    }

    pub fn clear(reasoning: impl Into<String>) -> Self {
        Self {
            flagged: false,
            reasoning: reasoning.into(),
        }
    }
}

/// Schema the input judge fills in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SlangCheck {
    /// Set to true if the user query contains slang or abusive language
    pub is_abusive: bool,
    /// Explanation of the validation decision
    pub reasoning: String,
}

impl From<SlangCheck> for Judgment {
    fn from(check: SlangCheck) -> Self {
        Self {
            flagged: check.is_abusive,
            reasoning: check.reasoning,
        }
    }
}

/// Schema the output judge fills in.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TopicCheck {
    /// Set to true if the LLM response is unrelated to banking topics
    pub is_not_banking_related: bool,
    /// Explanation of the validation decision
    pub reasoning: String,
}

impl From<TopicCheck> for Judgment {
    fn from(check: TopicCheck) -> Self {
        Self {
            flagged: check.is_not_banking_related,
            reasoning: check.reasoning,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum GuardrailError {
    #[error("Guardrail judgment failed: {0}")]
    Extraction(#[from] ExtractionError),
}

/// Something that can flag a piece of text.
pub trait Judge: Send + Sync {
    fn judge(&self, text: &str) -> impl Future<Output = Result<Judgment, GuardrailError>> + Send;
}

/// A [`Judge`] backed by a `rig` extractor. `T` is the schema the model is asked to fill in.
pub struct ExtractorJudge<M, T>
where
    M: CompletionModel,
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync,
{
    extractor: Extractor<M, T>,
}

impl<M, T> ExtractorJudge<M, T>
where
    M: CompletionModel,
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync,
{
    pub fn new(extractor: Extractor<M, T>) -> Self {
        Self { extractor }
    }
}

impl<M, T> Judge for ExtractorJudge<M, T>
where
    M: CompletionModel,
    T: JsonSchema + for<'a> Deserialize<'a> + Serialize + Send + Sync + Into<Judgment>,
{
    async fn judge(&self, text: &str) -> Result<Judgment, GuardrailError> {
        let check: T = self.extractor.extract(text).await?;
        Ok(check.into())
    }
}

/// Which side of a turn a guardrail watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardrailKind {
    Input,
    Output,
}

impl GuardrailKind {
    /// The fixed message that replaces the reply when this guardrail trips.
    pub fn refusal(&self) -> &'static str {
        match self {
            Self::Input => INPUT_REFUSAL,
            Self::Output => OUTPUT_REFUSAL,
        }
    }
}

/// The outcome of one guardrail check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardrailVerdict {
    pub kind: GuardrailKind,
    pub tripped: bool,
    pub info: Judgment,
    pub reasoning: String,
}

pub struct Guardrail<J> {
    kind: GuardrailKind,
    judge: J,
}

impl<J> Guardrail<J> {
    pub fn input(judge: J) -> Self {
        Self {
            kind: GuardrailKind::Input,
            judge,
        }
    }

    pub fn output(judge: J) -> Self {
        Self {
            kind: GuardrailKind::Output,
            judge,
        }
    }

    pub fn kind(&self) -> GuardrailKind {
        self.kind
    }

    #[cfg(test)]
    pub(crate) fn judge(&self) -> &J {
        &self.judge
    }
}

impl<J> Guardrail<J>
where
    J: Judge,
{
    /// Judge `text` once. Judge failures are returned as-is, there is no retry.
    pub async fn check(&self, text: &str) -> Result<GuardrailVerdict, GuardrailError> {
        let judgment = self.judge.judge(text).await?;

        tracing::info!(
            guardrail = ?self.kind,
            tripped = judgment.flagged,
            reasoning = %judgment.reasoning,
            "Guardrail evaluated"
        );

        Ok(GuardrailVerdict {
            kind: self.kind,
            tripped: judgment.flagged,
            reasoning: judgment.reasoning.clone(),
            info: judgment,
        })
    }
}
