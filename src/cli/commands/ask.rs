//! Ask command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(
    question: &str,
    model: Option<String>,
    top_k: Option<usize>,
    show_sources: bool,
    settings: Settings,
) -> Result<()> {
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
    let components = match orchestrator
        .set_up_components(&credentials, model.as_deref())
        .await
    {
        Ok(components) => components,
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to load index: {}", e));
            return Err(e.into());
        }
    };

    spinner.set_message("Thinking...");
    let engine = components.engine(top_k);

    match engine.ask(question).await {
        Ok(response) => {
            spinner.finish_and_clear();

            println!("\n{}\n", response.answer);

            if show_sources && !response.sources.is_empty() {
                Output::header("Sources");
                for (i, source) in response.sources.iter().enumerate() {
                    println!("  [{}] {}", i + 1, source);
                }
            }
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Failed to generate answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
