use crate::tools::ServiceKind;

/// A named agent persona and the instructions it runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub name: &'static str,
    pub instructions: &'static str,
}

impl Persona {
    /// The system prompt the persona's agent is built with.
    pub fn preamble(&self) -> String {
        format!("Your name is {}.\n\n{}", self.name, self.instructions)
    }
}

pub const DISPATCHER: Persona = Persona {
    name: "BankWise Assistant",
    instructions: "You are a professional and friendly banking assistant.

1. Greet customers warmly and professionally.
2. The customer's request has already been classified and a service token has been issued; both are given to you with the request.
3. Always tell the customer their token number and expected wait time exactly as issued. Never invent a different token.
4. Keep the conversation strictly about banking.

Always provide helpful and courteous service.",
};

pub const ACCOUNT: Persona = Persona {
    name: "Account Services Agent",
    instructions: "Assist users with queries about account balances, statements, and account information. Always give the customer their service token.",
};

pub const TRANSFER: Persona = Persona {
    name: "Transfer Services Agent",
    instructions: "Assist users with money transfers and payments. Always give the customer their service token.",
};

pub const LOAN: Persona = Persona {
    name: "Loan Services Agent",
    instructions: "Assist users with loans and mortgages. Always give the customer their service token.",
};

/// The specialist persona for a desk. General banking stays with the dispatcher.
pub fn specialist_for(service: ServiceKind) -> Option<Persona> {
    match service {
        ServiceKind::AccountService => Some(ACCOUNT),
        ServiceKind::TransferService => Some(TRANSFER),
        ServiceKind::LoanService => Some(LOAN),
        ServiceKind::GeneralBanking => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_specialist_desk_has_a_persona() {
        for kind in ServiceKind::SPECIALISTS {
            assert!(specialist_for(kind).is_some(), "{kind}");
        }
        assert_eq!(specialist_for(ServiceKind::GeneralBanking), None);
    }

    #[test]
    fn specialists_mention_the_token() {
        for persona in [ACCOUNT, TRANSFER, LOAN] {
            assert!(persona.instructions.contains("service token"));
        }
        assert_eq!(specialist_for(ServiceKind::LoanService).unwrap().name, "Loan Services Agent");
    }

    #[test]
    fn preamble_names_the_persona() {
        let preamble = DISPATCHER.preamble();
        assert!(preamble.starts_with("Your name is BankWise Assistant."));
        assert!(preamble.ends_with("Always provide helpful and courteous service."));
    }
}
