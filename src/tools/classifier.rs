//! Keyword classification of a customer's request into one of the bank's service desks.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Confidence reported whenever one of the desk keyword sets matches.
pub const KEYWORD_CONFIDENCE: f64 = 0.9;

/// Confidence reported for requests that match no keyword set.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// The service categories a request can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    AccountService,
    TransferService,
    LoanService,
    GeneralBanking,
}

impl ServiceKind {
    /// The specialist desks, in the order requests are matched against them.
    pub const SPECIALISTS: [ServiceKind; 3] = [
        ServiceKind::AccountService,
        ServiceKind::TransferService,
        ServiceKind::LoanService,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountService => "account_service",
            Self::TransferService => "transfer_service",
            Self::LoanService => "loan_service",
            Self::GeneralBanking => "general_banking",
        }
    }

    /// Keywords that send a request to this desk. Empty for general banking.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::AccountService => &["balance", "account", "statement"],
            Self::TransferService => &["transfer", "send", "payment"],
            Self::LoanService => &["loan", "mortgage", "borrow"],
            Self::GeneralBanking => &[],
        }
    }

    fn reasoning(&self) -> &'static str {
        match self {
            Self::AccountService => "Customer wants to check their account.",
            Self::TransferService => "Customer wants to send money or make payment.",
            Self::LoanService => "Customer needs help with a loan.",
            Self::GeneralBanking => "Customer needs general banking assistance.",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of classifying a single request. Built fresh for every turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceClassification {
    pub service: ServiceKind,
    pub confidence: f64,
    pub keywords_detected: Vec<String>,
    pub reasoning: String,
}

/// Classify a request by case-insensitive substring match.
///
/// Desks are checked account, transfer, loan, in that order, and the first hit wins.
/// A hit reports the desk's whole keyword list, not just the words that matched.
pub fn classify(request: &str) -> ServiceClassification {
    let request = request.to_lowercase();

    let matched = ServiceKind::SPECIALISTS.into_iter().find(|kind| {
        kind.keywords()
            .iter()
            .any(|keyword| request.contains(keyword))
    });

    match matched {
        Some(service) => ServiceClassification {
            service,
            confidence: KEYWORD_CONFIDENCE,
            keywords_detected: service.keywords().iter().map(|k| k.to_string()).collect(),
            reasoning: service.reasoning().to_string(),
        },
        None => ServiceClassification {
            service: ServiceKind::GeneralBanking,
            confidence: FALLBACK_CONFIDENCE,
            keywords_detected: vec!["general".to_string()],
            reasoning: ServiceKind::GeneralBanking.reasoning().to_string(),
        },
    }
}
