//! The interactive prompt loop.
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    agents::Responder,
    guardrails::Judge,
    routing::{Dispatcher, TurnError},
};

pub const WELCOME_PROMPT: &str = "\n💼 Welcome to BankWise Assistant. How may I assist you today? ";

/// True for the words that end the session.
pub fn is_exit(line: &str) -> bool {
    let line = line.trim();
    line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit")
}

/// Run the prompt loop until an exit keyword or end of input.
///
/// Guardrail trips print their fixed message and the loop carries on.
/// Any other turn failure ends the loop and is returned.
pub async fn run<R, I, O, In, Out>(
    dispatcher: &Dispatcher<R, I, O>,
    input: In,
    output: &mut Out,
) -> Result<(), TurnError>
where
    R: Responder,
    I: Judge,
    O: Judge,
    In: AsyncBufRead + Unpin,
    Out: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(WELCOME_PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            tracing::debug!("End of input");
            break;
        };

        if is_exit(&line) {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let text = match dispatcher.handle(line).await {
            Ok(reply) => {
                tracing::debug!(route = %reply.route, token = %reply.token.token_number, "Turn complete");
                reply.text
            }
            Err(err) => match err.refusal() {
                Some(refusal) => refusal.to_string(),
                None => return Err(err),
            },
        };

        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }

    output.flush().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guardrails::{INPUT_REFUSAL, OUTPUT_REFUSAL};
    use crate::routing::tests::{Desk, ScriptedResponder};

    async fn session(desk: &Desk, script: &str) -> String {
        let dispatcher = desk.dispatcher();
        let mut out = Vec::new();
        run(&dispatcher, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn exit_words_ignore_case_and_padding() {
        assert!(is_exit("quit"));
        assert!(is_exit("  EXIT "));
        assert!(is_exit("Quit\r"));
        assert!(!is_exit("quit now"));
        assert!(!is_exit("exits"));
    }

    #[tokio::test]
    async fn stops_at_exit_keyword() {
        let desk = Desk::new();
        let out = session(&desk, "check my balance\nEXIT\nsend money\n").await;

        assert!(out.contains("[account] Your token is ready."));
        assert!(!out.contains("[transfer]"));
        assert_eq!(out.matches(WELCOME_PROMPT).count(), 2);
    }

    #[tokio::test]
    async fn abusive_input_prints_apology_and_continues() {
        let desk = Desk::new();
        let out = session(&desk, "I abusively insult you\nI need a loan\nquit\n").await;

        assert!(out.contains(INPUT_REFUSAL));
        assert!(out.contains("[loan] Let's look at loan options."));
        assert!(desk.front.prompts().is_empty());
    }

    #[tokio::test]
    async fn off_topic_reply_prints_support_message() {
        let desk = Desk {
            front: ScriptedResponder::new("front", "Lovely weather for a picnic."),
            ..Desk::new()
        };
        let out = session(&desk, "What's the weather today?\n").await;

        assert!(out.contains(OUTPUT_REFUSAL));
        assert!(!out.contains("picnic"));
    }

    #[tokio::test]
    async fn blank_lines_and_eof_end_quietly() {
        let desk = Desk::new();
        let out = session(&desk, "\n   \n").await;

        assert_eq!(out.matches(WELCOME_PROMPT).count(), 3);
        assert!(desk.front.prompts().is_empty());
    }
}
