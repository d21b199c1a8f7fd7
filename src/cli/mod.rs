//! CLI module for Marquee.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Marquee - ask questions about the top movies
///
/// Scrapes a top-movies listing into a CSV dataset, then answers questions
/// about it with retrieval-augmented generation.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scrape the listing page and write the cleaned movies CSV
    Scrape {
        /// Listing URL or saved HTML file (defaults to scraper.listing_url)
        source: Option<String>,

        /// Output CSV path (defaults to dataset.csv_path)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Ask a single question about the movies
    Ask {
        /// The question to ask
        question: String,

        /// LLM model to use for response generation
        #[arg(short, long)]
        model: Option<String>,

        /// Number of movies retrieved as context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Print the retrieved movies after the answer
        #[arg(long)]
        show_sources: bool,
    },

    /// Show the movies most similar to a query
    Search {
        /// Search query
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },

    /// Start an interactive chat session
    Chat {
        /// LLM model to use
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List the movies in the dataset
    List {
        /// Show at most this many movies
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Check configuration, credentials and dataset
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask_with_options() {
        let cli = Cli::parse_from(["marquee", "-v", "ask", "best heist movie?", "-k", "3"]);
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Ask { question, top_k, model, show_sources } => {
                assert_eq!(question, "best heist movie?");
                assert_eq!(top_k, Some(3));
                assert!(model.is_none());
                assert!(!show_sources);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_scrape_defaults() {
        let cli = Cli::parse_from(["marquee", "scrape"]);
        assert!(matches!(cli.command, Commands::Scrape { source: None, output: None }));
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
