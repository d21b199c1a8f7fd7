//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::dataset::read_csv;
use anyhow::Result;

/// Run the list command.
pub fn run_list(limit: Option<usize>, settings: Settings) -> Result<()> {
    let path = settings.csv_path();

    let movies = match read_csv(&path) {
        Ok(movies) => movies,
        Err(e) => {
            Output::error(&format!("Failed to read dataset: {}", e));
            Output::info("Use 'marquee scrape' to build it.");
            return Err(e.into());
        }
    };

    if movies.is_empty() {
        Output::info("The dataset is empty. Use 'marquee scrape' to rebuild it.");
        return Ok(());
    }

    Output::header(&format!("Movies ({})", movies.len()));
    println!();

    let shown = limit.unwrap_or(movies.len()).min(movies.len());
    for movie in &movies[..shown] {
        Output::movie(movie);
    }

    let average_rating = movies.iter().map(|m| m.rating).sum::<f64>() / movies.len() as f64;
    let with_meta_score = movies.iter().filter(|m| m.meta_score.is_some()).count();

    println!();
    if shown < movies.len() {
        Output::kv("Shown", &format!("{} of {}", shown, movies.len()));
    }
    Output::kv("Total movies", &movies.len().to_string());
    Output::kv("Average rating", &format!("{:.2}", average_rating));
    Output::kv("With critic score", &with_meta_score.to_string());
    Output::kv("Dataset", &path.display().to_string());

    Ok(())
}
