//! BankWise front desk.
//!
//! Startup:
//!   1. Load .env (if present) and read config from the environment
//!   2. Init logging to stderr
//!   3. Build the dispatcher against the configured model
//!   4. Run the prompt loop on stdin/stdout
use anyhow::Context;
use tokio::io::{BufReader, stdin, stdout};
use tracing_subscriber::EnvFilter;

use bankwise::{BankConfig, assistant, console};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let config = BankConfig::from_env()?;

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(bankwise::config::DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        model = %config.model,
        threshold = config.handoff_threshold,
        "Starting BankWise"
    );

    let dispatcher = assistant::build(&config).context("failed to build the assistant")?;

    let mut out = stdout();
    console::run(&dispatcher, BufReader::new(stdin()), &mut out).await?;

    Ok(())
}
