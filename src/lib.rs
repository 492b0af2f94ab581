pub mod agents;
pub mod assistant;
pub mod config;
pub mod console;
pub mod guardrails;
pub mod prompt_templating;
pub mod providers;
pub mod routing;
pub mod tools;

pub use agents::Responder;
pub use config::BankConfig;
pub use guardrails::{Guardrail, GuardrailVerdict, Judge, Judgment};
pub use routing::{Dispatcher, Reply, Route, TurnError};
pub use tools::{QueueToken, ServiceClassification, ServiceKind};
