//! Scrape command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::scrape::ScrapeSource;
use anyhow::Result;

/// Run the scrape command.
pub async fn run_scrape(
    source: Option<String>,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Scrape, &settings)?;

    let source: ScrapeSource = source
        .as_deref()
        .unwrap_or(&settings.scraper.listing_url)
        .parse()?;
    let output = output
        .map(|o| Settings::expand_path(&o))
        .unwrap_or_else(|| settings.csv_path());

    let orchestrator = Orchestrator::new(settings)?;

    Output::info(&format!("Scraping {}", source));

    match orchestrator.build_dataset(&source, &output).await {
        Ok(report) => {
            Output::success(&format!(
                "Wrote {} movies to {}",
                report.movies,
                report.path.display()
            ));
            Output::kv("With critic score", &report.with_meta_score.to_string());
            Output::kv(
                "Without critic score",
                &(report.movies - report.with_meta_score).to_string(),
            );
        }
        Err(e) => {
            Output::error(&format!("Scrape failed: {}", e));
            Output::info("No dataset was written.");
            return Err(e.into());
        }
    }

    Ok(())
}
