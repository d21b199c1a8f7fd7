//! Interactive chat command.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::session::Session;
use anyhow::Result;
use console::style;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE_HINT: &str = "Ask me a question about movies! For example:
  - What are movies directed by Christopher Nolan?
  - What are movies with Brad Pitt?";

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, settings: Settings) -> Result<()> {
    let credentials = match preflight::require_credentials(&settings) {
        Ok(credentials) => credentials,
        Err(e) => {
            Output::error(&format!("{}", e));
            Output::info("Run 'marquee doctor' for detailed diagnostics.");
            return Err(e.into());
        }
    };

    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Loading movies into the index...");
    let components = orchestrator
        .set_up_components(&credentials, model.as_deref())
        .await;
    spinner.finish_and_clear();
    let components = components?;

    let mut session = Session::new(components.engine(None));

    println!("\n{}", style("Marquee Chat").bold().cyan());
    println!("{}", USAGE_HINT);
    println!("{}\n", style("Type 'exit' to quit.").dim());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let Some(input) = lines.next_line().await? else {
            // EOF
            println!();
            break;
        };

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        let spinner = Output::spinner("Thinking...");
        let result = session.turn(input).await;
        spinner.finish_and_clear();

        match result {
            Ok(answer) => {
                println!("\n{} {}\n", style("Marquee:").cyan().bold(), answer);
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
