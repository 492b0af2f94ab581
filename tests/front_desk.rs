use std::sync::atomic::{AtomicUsize, Ordering};

use bankwise::{
    Dispatcher, Judge, Judgment, Responder, Route, ServiceKind, TurnError,
    console,
    guardrails::{GuardrailError, INPUT_REFUSAL, OUTPUT_REFUSAL},
    tools::TokenIssuer,
};
use rig::completion::PromptError;

/// Flags text containing `needle`.
struct Contains(&'static str);

impl Judge for Contains {
    async fn judge(&self, text: &str) -> Result<Judgment, GuardrailError> {
        Ok(if text.to_lowercase().contains(self.0) {
            Judgment::flagged(format!("mentions {}", self.0))
        } else {
            Judgment::clear("fine")
        })
    }
}

/// Echoes the prompt back so tests can see what the persona was given.
struct Echo {
    name: &'static str,
    calls: AtomicUsize,
}

impl Echo {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Responder for &Echo {
    async fn respond(&self, prompt: &str) -> Result<String, PromptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{} says:\n{prompt}", self.name))
    }
}

struct Branch {
    front: Echo,
    account: Echo,
    transfer: Echo,
    loan: Echo,
}

impl Branch {
    fn new() -> Self {
        Self {
            front: Echo::new("front"),
            account: Echo::new("account"),
            transfer: Echo::new("transfer"),
            loan: Echo::new("loan"),
        }
    }

    fn dispatcher(&self) -> Dispatcher<&Echo, Contains, Contains> {
        Dispatcher::builder()
            .front_desk(&self.front)
            .specialist(ServiceKind::AccountService, &self.account)
            .specialist(ServiceKind::TransferService, &self.transfer)
            .specialist(ServiceKind::LoanService, &self.loan)
            .input_guardrail(Contains("abusive"))
            .output_guardrail(Contains("weather"))
            .token_issuer(TokenIssuer::seeded(99))
            .build()
            .unwrap()
    }
}

#[tokio::test]
async fn balance_check_goes_to_account_desk_with_a_token() {
    let branch = Branch::new();
    let reply = branch
        .dispatcher()
        .handle("I want to check my account balance")
        .await
        .unwrap();

    assert_eq!(reply.route, Route::Specialist(ServiceKind::AccountService));
    assert_eq!(reply.token.token_number.chars().next(), Some('A'));
    assert!(reply.text.starts_with("account says:"));
    assert!(reply.text.contains(&reply.token.message));
    assert_eq!(branch.account.calls.load(Ordering::SeqCst), 1);
    assert_eq!(branch.front.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn every_desk_is_reachable() {
    let branch = Branch::new();
    let dispatcher = branch.dispatcher();

    for (request, desk, prefix) in [
        ("transfer 50 to my landlord", ServiceKind::TransferService, 'T'),
        ("tell me about mortgage rates", ServiceKind::LoanService, 'L'),
    ] {
        let reply = dispatcher.handle(request).await.unwrap();
        assert_eq!(reply.route, Route::Specialist(desk));
        assert!(reply.token.token_number.starts_with(prefix));
    }

    let reply = dispatcher.handle("hello there").await.unwrap();
    assert_eq!(reply.route, Route::FrontDesk);
    assert!(reply.token.token_number.starts_with('G'));
}

#[tokio::test]
async fn weather_question_is_refused_on_the_way_out() {
    let branch = Branch::new();
    let err = branch
        .dispatcher()
        .handle("What's the weather today?")
        .await
        .unwrap_err();

    assert!(matches!(err, TurnError::OutputTripwire(_)));
    assert_eq!(err.refusal(), Some(OUTPUT_REFUSAL));
}

#[tokio::test]
async fn console_session_end_to_end() {
    let branch = Branch::new();
    let dispatcher = branch.dispatcher();
    let script = "I abusively insult you\nWhat's the weather today?\nI need a loan\nquit\n";

    let mut out = Vec::new();
    console::run(&dispatcher, script.as_bytes(), &mut out)
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    let apology = out.find(INPUT_REFUSAL).unwrap();
    let support = out.find(OUTPUT_REFUSAL).unwrap();
    let loan = out.find("loan says:").unwrap();
    assert!(apology < support && support < loan);
    assert_eq!(branch.front.calls.load(Ordering::SeqCst), 1);
}
