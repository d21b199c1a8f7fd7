//! Marquee - ask questions about the top movies
//!
//! A CLI tool that scrapes a top-movies listing into a typed dataset and
//! answers natural-language questions about it with retrieval-augmented
//! generation.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `scrape` - Listing page loading and per-item field extraction
//! - `dataset` - Typed movie records, column cleaning and CSV persistence
//! - `embedding` - Embedding generation
//! - `vector_store` - In-process vector collections
//! - `index` - Loading the dataset into a collection
//! - `rag` - Retrieval and answer composition
//! - `session` - Conversational transcript over the RAG engine
//! - `orchestrator` - Pipeline coordination
//! - `config` - Settings, prompts and credentials
//!
//! # Example
//!
//! ```rust,no_run
//! use marquee::config::{Credentials, Settings};
//! use marquee::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let credentials = Credentials::resolve(&settings)?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let components = orchestrator.set_up_components(&credentials, None).await?;
//!     let response = components.engine(None).ask("Movies directed by Christopher Nolan?").await?;
//!     println!("{}", response.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod dataset;
pub mod embedding;
pub mod error;
pub mod index;
pub mod openai;
pub mod orchestrator;
pub mod rag;
pub mod scrape;
pub mod session;
pub mod vector_store;

pub use error::{MarqueeError, Result};
