//! In-process vector collections.

use super::{cosine_similarity, Document, SearchResult, VectorStore};
use crate::error::{MarqueeError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

#[derive(Debug, Default)]
struct Collection {
    /// Insertion order is kept for tie-breaking.
    documents: Vec<Document>,
    /// Fixed by the first insert.
    dimensions: Option<usize>,
}

/// In-memory collection with brute-force cosine search.
#[derive(Debug)]
pub struct MemoryVectorStore {
    name: String,
    inner: RwLock<Collection>,
}

impl MemoryVectorStore {
    /// Create a new empty collection.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inner: RwLock::new(Collection::default()),
        }
    }

    fn poisoned(&self) -> MarqueeError {
        MarqueeError::VectorStore(format!("Collection '{}' lock poisoned", self.name))
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    fn name(&self) -> &str {
        &self.name
    }

    async fn insert_batch(&self, docs: Vec<Document>) -> Result<usize> {
        let mut collection = self.inner.write().map_err(|_| self.poisoned())?;

        let expected = collection
            .dimensions
            .or_else(|| docs.first().map(|d| d.embedding.len()));

        if let Some(expected) = expected {
            if let Some(bad) = docs.iter().find(|d| d.embedding.len() != expected) {
                return Err(MarqueeError::VectorStore(format!(
                    "Collection '{}' holds {}-dimensional embeddings, got {}",
                    self.name,
                    expected,
                    bad.embedding.len()
                )));
            }
        }

        let inserted = docs.len();
        collection.dimensions = expected;
        collection.documents.extend(docs);

        debug!("Inserted {} documents into '{}'", inserted, self.name);
        Ok(inserted)
    }

    async fn query(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        let collection = self.inner.read().map_err(|_| self.poisoned())?;

        if collection.documents.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        if let Some(expected) = collection.dimensions {
            if expected != query_embedding.len() {
                return Err(MarqueeError::VectorStore(format!(
                    "Query embedding has {} dimensions, collection '{}' has {}",
                    query_embedding.len(),
                    self.name,
                    expected
                )));
            }
        }

        let mut scored: Vec<(usize, f32)> = collection
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| (i, cosine_similarity(query_embedding, &doc.embedding)))
            .collect();

        // Stable sort: equal scores stay in insertion order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(i, score)| SearchResult {
                document: collection.documents[i].clone(),
                score,
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        let collection = self.inner.read().map_err(|_| self.poisoned())?;
        Ok(collection.documents.len())
    }
}

/// Process-scoped registry of named collections.
#[derive(Default)]
pub struct VectorClient {
    collections: RwLock<HashMap<String, Arc<MemoryVectorStore>>>,
}

impl VectorClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the named collection, creating it empty if needed.
    pub fn get_or_create_collection(&self, name: &str) -> Result<Arc<MemoryVectorStore>> {
        let mut collections = self.collections.write().map_err(|_| registry_poisoned())?;
        Ok(collections
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(MemoryVectorStore::new(name)))
            .clone())
    }

    /// Replace the named collection with a fresh, empty one.
    pub fn recreate_collection(&self, name: &str) -> Result<Arc<MemoryVectorStore>> {
        let mut collections = self.collections.write().map_err(|_| registry_poisoned())?;
        let collection = Arc::new(MemoryVectorStore::new(name));
        if collections.insert(name.to_string(), collection.clone()).is_some() {
            debug!("Replaced existing collection '{}'", name);
        }
        Ok(collection)
    }

}

fn registry_poisoned() -> MarqueeError {
    MarqueeError::VectorStore("Collection registry lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str, embedding: Vec<f32>) -> Document {
        Document::new(content.to_string(), embedding)
    }

    #[tokio::test]
    async fn test_memory_vector_store() {
        let store = MemoryVectorStore::new("movies");

        store
            .insert_batch(vec![
                doc("Hello world", vec![1.0, 0.0, 0.0]),
                doc("Goodbye world", vec![0.0, 1.0, 0.0]),
                doc("Halfway", vec![0.7, 0.7, 0.0]),
            ])
            .await
            .unwrap();

        assert_eq!(store.count().await.unwrap(), 3);

        let results = store.query(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.content, "Hello world");
        assert_eq!(results[1].document.content, "Halfway");
        assert!(results[0].score > results[1].score);
    }

    #[tokio::test]
    async fn test_empty_collection_returns_nothing() {
        let store = MemoryVectorStore::new("empty");
        let results = store.query(&[1.0, 0.0], 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let store = MemoryVectorStore::new("ties");
        store
            .insert_batch(vec![
                doc("first", vec![1.0, 0.0]),
                doc("second", vec![2.0, 0.0]),
                doc("third", vec![3.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.query(&[1.0, 0.0], 10).await.unwrap();
        let order: Vec<&str> = results.iter().map(|r| r.document.content.as_str()).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_dimension_mismatch_is_rejected() {
        let store = MemoryVectorStore::new("dims");
        store.insert_batch(vec![doc("a", vec![1.0, 0.0])]).await.unwrap();

        assert!(store.insert_batch(vec![doc("b", vec![1.0, 0.0, 0.0])]).await.is_err());
        assert!(store.query(&[1.0, 0.0, 0.0], 5).await.is_err());
    }

    #[tokio::test]
    async fn test_recreate_collection_starts_empty() {
        let client = VectorClient::new();

        let first = client.get_or_create_collection("movies").unwrap();
        first.insert_batch(vec![doc("a", vec![1.0])]).await.unwrap();

        let same = client.get_or_create_collection("movies").unwrap();
        assert_eq!(same.count().await.unwrap(), 1);

        let fresh = client.recreate_collection("movies").unwrap();
        assert_eq!(fresh.count().await.unwrap(), 0);
        assert_eq!(client.get_or_create_collection("movies").unwrap().count().await.unwrap(), 0);
    }
}
