//! Loading the movie dataset into a vector collection.

use crate::dataset::{read_csv, MovieRecord};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{Document, MemoryVectorStore, VectorClient, VectorStore};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// JSON text of one record, with field names preserved.
pub fn serialize_record(record: &MovieRecord) -> Result<String> {
    Ok(serde_json::to_string(record)?)
}

/// Read the dataset at `path` and load it into a fresh collection named `collection`.
///
/// Any collection with that name is replaced. Every row is embedded and
/// inserted; there is no deduplication.
#[instrument(skip(embedder, client), fields(path = %path.display()))]
pub async fn load_index(
    path: &Path,
    embedder: &dyn Embedder,
    client: &VectorClient,
    collection: &str,
) -> Result<Arc<MemoryVectorStore>> {
    let records = read_csv(path)?;
    let store = client.recreate_collection(collection)?;
    let inserted = index_records(&records, embedder, store.as_ref()).await?;

    info!("Loaded {} movies into collection '{}'", inserted, collection);
    Ok(store)
}

/// Embed `records` and insert them into `store`.
pub async fn index_records(
    records: &[MovieRecord],
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
) -> Result<usize> {
    let texts = records
        .iter()
        .map(serialize_record)
        .collect::<Result<Vec<_>>>()?;

    let embeddings = embedder.embed_batch(&texts).await?;

    let documents: Vec<Document> = texts
        .into_iter()
        .zip(embeddings)
        .map(|(text, embedding)| Document::new(text, embedding))
        .collect();

    store.insert_batch(documents).await
}
