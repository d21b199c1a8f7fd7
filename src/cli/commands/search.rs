//! Search command implementation.

use crate::cli::preflight;
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the search command.
pub async fn run_search(query: &str, limit: usize, settings: Settings) -> Result<()> {
    let credentials = preflight::require_credentials(&settings)?;
    let orchestrator = Orchestrator::new(settings)?;

    let spinner = Output::spinner("Searching...");

    let results = match orchestrator.set_up_components(&credentials, None).await {
        Ok(components) => components.retriever(Some(limit)).search(query).await,
        Err(e) => Err(e),
    };
    spinner.finish_and_clear();

    match results {
        Ok(results) => {
            if results.is_empty() {
                Output::warning("No movies found matching your query.");
            } else {
                Output::success(&format!("Found {} results", results.len()));

                for (i, result) in results.iter().enumerate() {
                    Output::search_result(i + 1, result.score, &result.document.content);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Search failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
