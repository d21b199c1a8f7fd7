//! Query-time retrieval.

use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{SearchResult, VectorStore};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Number of documents returned per query unless configured otherwise.
pub const DEFAULT_TOP_K: usize = 10;

/// Embeds queries and looks them up in a collection.
///
/// The embedder must be the one the collection was built with.
pub struct Retriever {
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    top_k: usize,
}

impl Retriever {
    pub fn new(vector_store: Arc<dyn VectorStore>, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            vector_store,
            embedder,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the number of documents returned per query.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Top-k documents with their scores, best first.
    #[instrument(skip(self), fields(collection = self.vector_store.name(), k = self.top_k))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await?;
        let results = self.vector_store.query(&query_embedding, self.top_k).await?;
        debug!("Retrieved {} documents", results.len());
        Ok(results)
    }

    /// Top-k document texts, best first.
    pub async fn retrieve(&self, query: &str) -> Result<Vec<String>> {
        Ok(self
            .search(query)
            .await?
            .into_iter()
            .map(|r| r.document.content)
            .collect())
    }
}
