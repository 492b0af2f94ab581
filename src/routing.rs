//! Turn handling for the front desk.
//!
//! Every turn runs the same fixed sequence: input guardrail, keyword classification,
//! handoff to a specialist when the classification is confident enough, queue token,
//! reply from whichever persona holds the turn, output guardrail.
//! The handoff threshold is enforced here rather than left to the model.
use std::collections::HashMap;
use std::fmt;

use rig::completion::PromptError;

use crate::{
    agents::Responder,
    guardrails::{Guardrail, GuardrailError, GuardrailVerdict, Judge},
    prompt_templating::render_turn,
    tools::{QueueToken, ServiceClassification, ServiceKind, TokenIssuer, classify},
};

/// Default minimum confidence (exclusive) for a handoff to a specialist.
pub const DEFAULT_HANDOFF_THRESHOLD: f64 = 0.8;

/// Which persona answered a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    FrontDesk,
    Specialist(ServiceKind),
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontDesk => f.write_str("front_desk"),
            Self::Specialist(kind) => write!(f, "{kind}"),
        }
    }
}

/// A reply that passed both guardrails.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub route: Route,
    pub classification: ServiceClassification,
    pub token: QueueToken,
}

#[derive(thiserror::Error, Debug)]
pub enum TurnError {
    #[error("Input guardrail tripped: {}", .0.reasoning)]
    InputTripwire(GuardrailVerdict),
    #[error("Output guardrail tripped: {}", .0.reasoning)]
    OutputTripwire(GuardrailVerdict),
    #[error(transparent)]
    Guardrail(#[from] GuardrailError),
    #[error("Reply generation failed: {0}")]
    Prompt(#[from] PromptError),
    #[error("Failed to render turn prompt: {0}")]
    Template(#[from] tera::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TurnError {
    /// The fixed customer-facing message for a tripwire, `None` for anything fatal.
    pub fn refusal(&self) -> Option<&'static str> {
        match self {
            Self::InputTripwire(verdict) | Self::OutputTripwire(verdict) => {
                Some(verdict.kind.refusal())
            }
            _ => None,
        }
    }
}

/// The front-desk dispatcher. `R` answers prompts, `I` and `O` judge input and output.
pub struct Dispatcher<R, I, O> {
    front_desk: R,
    specialists: HashMap<ServiceKind, R>,
    input_guardrail: Guardrail<I>,
    output_guardrail: Guardrail<O>,
    token_issuer: TokenIssuer,
    threshold: f64,
}

impl<R, I, O> Dispatcher<R, I, O> {
    /// Create an instance of [`DispatcherBuilder`].
    pub fn builder() -> DispatcherBuilder<R, I, O> {
        DispatcherBuilder::new()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Where a classification sends the turn.
    pub fn route(&self, classification: &ServiceClassification) -> Route {
        if classification.confidence > self.threshold
            && classification.service != ServiceKind::GeneralBanking
        {
            Route::Specialist(classification.service)
        } else {
            Route::FrontDesk
        }
    }
}

impl<R, I, O> Dispatcher<R, I, O>
where
    R: Responder,
    I: Judge,
    O: Judge,
{
    /// Handle one customer turn.
    ///
    /// Guardrail trips come back as [`TurnError::InputTripwire`] / [`TurnError::OutputTripwire`].
    /// An input trip ends the turn before classification or token issuance.
    pub async fn handle(&self, input: &str) -> Result<Reply, TurnError> {
        let verdict = self.input_guardrail.check(input).await?;
        if verdict.tripped {
            return Err(TurnError::InputTripwire(verdict));
        }

        let classification = classify(input);
        tracing::debug!(
            service = %classification.service,
            confidence = classification.confidence,
            "Classified request"
        );

        let (route, responder) = match self.route(&classification) {
            Route::Specialist(kind) => match self.specialists.get(&kind) {
                Some(specialist) => {
                    tracing::info!(specialist = %kind, "Handing off to specialist");
                    (Route::Specialist(kind), specialist)
                }
                None => {
                    tracing::warn!(specialist = %kind, "No specialist registered, staying at front desk");
                    (Route::FrontDesk, &self.front_desk)
                }
            },
            Route::FrontDesk => (Route::FrontDesk, &self.front_desk),
        };

        let token = self.token_issuer.issue(classification.service.as_str());

        let prompt = render_turn(input, &classification, &token)?;
        let draft = responder.respond(&prompt).await?;

        let verdict = self.output_guardrail.check(&draft).await?;
        if verdict.tripped {
            return Err(TurnError::OutputTripwire(verdict));
        }

        Ok(Reply {
            text: draft,
            route,
            classification,
            token,
        })
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DispatcherError {
    #[error("Front desk responder not found")]
    FrontDeskNotFound,
    #[error("Input guardrail not found")]
    InputGuardrailNotFound,
    #[error("Output guardrail not found")]
    OutputGuardrailNotFound,
    #[error("Handoff threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
}

pub struct DispatcherBuilder<R, I, O> {
    front_desk: Option<R>,
    specialists: HashMap<ServiceKind, R>,
    input_judge: Option<I>,
    output_judge: Option<O>,
    token_issuer: Option<TokenIssuer>,
    threshold: Option<f64>,
}

impl<R, I, O> Default for DispatcherBuilder<R, I, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, I, O> DispatcherBuilder<R, I, O> {
    pub fn new() -> Self {
        Self {
            front_desk: None,
            specialists: HashMap::new(),
            input_judge: None,
            output_judge: None,
            token_issuer: None,
            threshold: None,
        }
    }

    pub fn front_desk(mut self, responder: R) -> Self {
        self.front_desk = Some(responder);

        self
    }

    /// Register the specialist for a desk. General banking is always answered by the front desk.
    pub fn specialist(mut self, service: ServiceKind, responder: R) -> Self {
        self.specialists.insert(service, responder);

        self
    }

    pub fn input_guardrail(mut self, judge: I) -> Self {
        self.input_judge = Some(judge);

        self
    }

    pub fn output_guardrail(mut self, judge: O) -> Self {
        self.output_judge = Some(judge);

        self
    }

    pub fn token_issuer(mut self, issuer: TokenIssuer) -> Self {
        self.token_issuer = Some(issuer);

        self
    }

    pub fn threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);

        self
    }

    pub fn build(self) -> Result<Dispatcher<R, I, O>, DispatcherError> {
        let Some(front_desk) = self.front_desk else {
            return Err(DispatcherError::FrontDeskNotFound);
        };
        let Some(input_judge) = self.input_judge else {
            return Err(DispatcherError::InputGuardrailNotFound);
        };
        let Some(output_judge) = self.output_judge else {
            return Err(DispatcherError::OutputGuardrailNotFound);
        };

        let threshold = self.threshold.unwrap_or(DEFAULT_HANDOFF_THRESHOLD);
        if !(0.0..=1.0).contains(&threshold) {
            return Err(DispatcherError::InvalidThreshold(threshold));
        }

        Ok(Dispatcher {
            front_desk,
            specialists: self.specialists,
            input_guardrail: Guardrail::input(input_judge),
            output_guardrail: Guardrail::output(output_judge),
            token_issuer: self.token_issuer.unwrap_or_default(),
            threshold,
        })
    }
}
