//! Mock queue tokens for the branch waiting area.
use std::sync::Mutex;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

/// A queue token handed to the customer. Token numbers are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueToken {
    pub token_number: String,
    pub wait_time: String,
    pub message: String,
    pub service_type: String,
}

/// Prefix letter and expected wait for a service label.
/// Anything that is not one of the three desks gets the general counter.
pub fn desk_for(service_type: &str) -> (char, &'static str) {
    match service_type {
        "account_service" => ('A', "5-10 minutes"),
        "transfer_service" => ('T', "2-5 minutes"),
        "loan_service" => ('L', "15-20 minutes"),
        _ => ('G', "8-10 minutes"),
    }
}

/// Compose a token from an already drawn number. `number` is expected in `100..=999`.
pub fn compose_token(service_type: &str, number: u16) -> QueueToken {
    let (prefix, wait_time) = desk_for(service_type);
    let token_number = format!("{prefix}{number}");

    QueueToken {
        message: format!(
            "Please take token {token_number} and wait for {wait_time}. Have a seat, and we will call you shortly!"
        ),
        token_number,
        wait_time: wait_time.to_string(),
        service_type: service_type.to_string(),
    }
}

/// Issues queue tokens. Holds its own random source so tests can seed it.
#[derive(Debug)]
pub struct TokenIssuer {
    rng: Mutex<StdRng>,
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn issue(&self, service_type: &str) -> QueueToken {
        let number = {
            // a poisoned lock still holds a usable rng
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            rng.gen_range(100..=999)
        };

        let token = compose_token(service_type, number);
        tracing::info!(
            token = %token.token_number,
            service_type,
            "Issued queue token"
        );
        token
    }
}
