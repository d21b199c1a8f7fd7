//! Error types for Marquee.

use thiserror::Error;

/// Library-level error type for Marquee operations.
#[derive(Error, Debug)]
pub enum MarqueeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scrape failed: {0}")]
    Scrape(String),

    #[error("Listing item {item} is missing required field '{field}'")]
    MissingField { item: usize, field: &'static str },

    #[error("Listing item {item} is malformed: {reason}")]
    MalformedRow { item: usize, reason: String },

    #[error("Could not parse {column} from {value:?}")]
    Parse { column: &'static str, value: String },

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Embedding generation failed: {0}")]
    Embedding(String),

    #[error("Vector store error: {0}")]
    VectorStore(String),

    #[error("RAG error: {0}")]
    Rag(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl MarqueeError {
    pub(crate) fn parse(column: &'static str, value: &str) -> Self {
        MarqueeError::Parse {
            column,
            value: value.to_string(),
        }
    }
}

/// Result type alias for Marquee operations.
pub type Result<T> = std::result::Result<T, MarqueeError>;
