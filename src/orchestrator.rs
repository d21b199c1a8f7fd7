//! Pipeline orchestrator for Marquee.
//!
//! Coordinates the offline scrape-and-build pipeline and wires the
//! question-answering components together from settings.

use crate::config::{Credentials, Prompts, Settings};
use crate::dataset::{write_csv, MovieRecord, RowCleaner};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{MarqueeError, Result};
use crate::index::load_index;
use crate::rag::{AnswerComposer, ChatModel, OpenAIChatModel, RagEngine, Retriever};
use crate::scrape::{extract_rows, fetch_html, ListingPage, RawMovieRow, ScrapeSource};
use crate::vector_store::{VectorClient, VectorStore};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Outcome of a scrape-and-build run.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub path: PathBuf,
    pub movies: usize,
    pub with_meta_score: usize,
}

/// Question-answering components built once per process.
pub struct Components {
    pub collection: Arc<dyn VectorStore>,
    pub embedder: Arc<dyn Embedder>,
    pub llm: Arc<dyn ChatModel>,
    prompts: Prompts,
    top_k: usize,
}

impl Components {
    /// Retriever over the loaded collection.
    pub fn retriever(&self, top_k: Option<usize>) -> Retriever {
        Retriever::new(self.collection.clone(), self.embedder.clone())
            .with_top_k(top_k.unwrap_or(self.top_k))
    }

    /// Retrieval plus answer composition.
    pub fn engine(&self, top_k: Option<usize>) -> RagEngine {
        let composer = AnswerComposer::new(self.llm.clone()).with_prompts(self.prompts.rag.clone());
        RagEngine::new(self.retriever(top_k), composer)
    }
}

/// The main orchestrator for the Marquee pipeline.
pub struct Orchestrator {
    settings: Settings,
    prompts: Prompts,
    /// Process-scoped; collections never outlive the process.
    client: VectorClient,
}

impl Orchestrator {
    pub fn new(settings: Settings) -> Result<Self> {
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
        Ok(Self {
            settings,
            prompts,
            client: VectorClient::new(),
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.settings.openai.timeout_secs)
    }

    /// Scrape the listing, clean it and write the dataset to `output`.
    #[instrument(skip(self), fields(source = %source))]
    pub async fn build_dataset(&self, source: &ScrapeSource, output: &Path) -> Result<BuildReport> {
        let html = fetch_html(source, &self.settings.scraper.user_agent, self.timeout()).await?;

        let rows = rows_from_html(&html)?;
        if rows.is_empty() {
            return Err(MarqueeError::Scrape(format!(
                "No movie entries found at {}",
                source
            )));
        }

        let records = RowCleaner::new().clean_rows(&rows)?;
        write_csv(output, &records)?;

        Ok(report(output, &records))
    }

    /// Load the dataset into a fresh collection and build the model clients.
    ///
    /// The dataset is loaded once per orchestrator; later calls reuse the
    /// populated collection. Fails if the dataset file is missing or unreadable.
    #[instrument(skip(self, credentials))]
    pub async fn set_up_components(
        &self,
        credentials: &Credentials,
        model: Option<&str>,
    ) -> Result<Components> {
        let embedder: Arc<dyn Embedder> = Arc::new(OpenAIEmbedder::new(
            credentials,
            &self.settings.embedding,
            self.timeout(),
        )?);

        let llm: Arc<dyn ChatModel> = Arc::new(OpenAIChatModel::new(
            credentials,
            model.unwrap_or(&self.settings.rag.model),
            self.settings.rag.temperature,
            self.timeout(),
        )?);

        let name = &self.settings.vector_store.collection;
        let existing = self.client.get_or_create_collection(name)?;
        let collection = if existing.count().await? > 0 {
            debug!("Reusing loaded collection '{}'", name);
            existing
        } else {
            load_index(&self.settings.csv_path(), embedder.as_ref(), &self.client, name).await?
        };

        Ok(Components {
            collection,
            embedder,
            llm,
            prompts: self.prompts.clone(),
            top_k: self.settings.rag.top_k,
        })
    }
}

/// Parse the listing and extract every entry, failing on the first bad one.
fn rows_from_html(html: &str) -> Result<Vec<RawMovieRow>> {
    let page = ListingPage::parse(html)?;
    let items = page.items();
    info!("Found {} listing entries", items.len());

    let pb = ProgressBar::new(items.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {spinner:.green} Extracting [{bar:30.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    let rows = extract_rows(&items, || pb.inc(1));
    pb.finish_and_clear();

    rows
}

fn report(path: &Path, records: &[MovieRecord]) -> BuildReport {
    BuildReport {
        path: path.to_path_buf(),
        movies: records.len(),
        with_meta_score: records.iter().filter(|r| r.meta_score.is_some()).count(),
    }
}
