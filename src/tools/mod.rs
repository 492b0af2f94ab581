//! The dispatcher's local tools.
pub mod classifier;
pub mod token;

pub use classifier::{ServiceClassification, ServiceKind, classify};
pub use token::{QueueToken, TokenIssuer};
