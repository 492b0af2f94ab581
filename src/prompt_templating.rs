use serde::Serialize;
use tera::Context;

use crate::tools::{QueueToken, ServiceClassification};

/// Prompting templates.
/// Write the template using Jinja formatting, then use the fluent builder to set variables.
///
/// Usage:
/// ```rust
/// use bankwise::prompt_templating::PromptTemplate;
///
/// let template = PromptTemplate::new("Hello {{ user }}!")
///     .with_variable("user", "BankWise");
///
/// let res = template.render_to_string().unwrap();
/// assert_eq!(res, "Hello BankWise!".to_string());
/// ```
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    variables: Context,
}

impl PromptTemplate {
    pub fn new(str: &str) -> Self {
        Self {
            template: str.to_string(),
            variables: Context::new(),
        }
    }

    /// Set a variable for use in the prompt template.
    pub fn with_variable<V>(mut self, k: &str, v: V) -> Self
    where
        V: Serialize,
    {
        self.variables.insert(k, &v);
        self
    }

    pub fn render_to_string(&self) -> Result<String, tera::Error> {
        tera::Tera::one_off(&self.template, &self.variables, false)
    }
}

/// What the answering persona sees for a single turn.
pub const TURN_TEMPLATE: &str = "Customer request: {{ request }}

Service desk: {{ classification.service }} (confidence {{ classification.confidence }})
Why: {{ classification.reasoning }}

Issued queue token: {{ token.token_number }}
Expected wait: {{ token.wait_time }}
Token notice: {{ token.message }}";

/// Render [`TURN_TEMPLATE`] for one request.
pub fn render_turn(
    request: &str,
    classification: &ServiceClassification,
    token: &QueueToken,
) -> Result<String, tera::Error> {
    PromptTemplate::new(TURN_TEMPLATE)
        .with_variable("request", request)
        .with_variable("classification", classification)
        .with_variable("token", token)
        .render_to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{classify, token::compose_token};

    #[test]
    fn prompt_template_works() {
        let res = PromptTemplate::new("Hello, {{user}}!")
            .with_variable("user", "world")
            .render_to_string()
            .unwrap();
        assert_eq!(res, "Hello, world!");
    }

    #[test]
    fn missing_variable_is_an_error() {
        assert!(PromptTemplate::new("{{ nope }}").render_to_string().is_err());
    }

    #[test]
    fn turn_carries_classification_and_token() {
        let classification = classify("check my balance");
        let token = compose_token("account_service", 512);

        let res = render_turn("check my balance", &classification, &token).unwrap();

        assert!(res.starts_with("Customer request: check my balance"));
        assert!(res.contains("Service desk: account_service (confidence 0.9)"));
        assert!(res.contains("Issued queue token: A512"));
        assert!(res.contains("Expected wait: 5-10 minutes"));
    }

    #[test]
    fn request_text_is_not_escaped() {
        let classification = classify("Tom & Jerry's <loan>");
        let token = compose_token("loan_service", 100);

        let res = render_turn("Tom & Jerry's <loan>", &classification, &token).unwrap();
        assert!(res.contains("Tom & Jerry's <loan>"));
    }
}
