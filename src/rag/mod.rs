//! RAG (Retrieval-Augmented Generation) for movie questions.
//!
//! [`Retriever`] finds the movie documents closest to a question and
//! [`AnswerComposer`] asks the language model to answer from them.

mod composer;
mod llm;
mod retriever;

pub use composer::{AnswerComposer, CONTEXT_SEPARATOR};
pub use llm::{ChatModel, OpenAIChatModel, PromptMessage};
pub use retriever::{Retriever, DEFAULT_TOP_K};

use crate::error::Result;
use tracing::{info, instrument};

/// Retrieval followed by composition.
pub struct RagEngine {
    retriever: Retriever,
    composer: AnswerComposer,
}

impl RagEngine {
    pub fn new(retriever: Retriever, composer: AnswerComposer) -> Self {
        Self { retriever, composer }
    }

    pub fn retriever(&self) -> &Retriever {
        &self.retriever
    }

    /// Answer a single question.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn ask(&self, question: &str) -> Result<RagResponse> {
        info!("Processing question: {}", question);

        let sources = self.retriever.retrieve(question).await?;
        let answer = self.composer.compose(question, &sources).await?;

        Ok(RagResponse { answer, sources })
    }
}

/// An answer and the documents it was composed from.
#[derive(Debug, Clone)]
pub struct RagResponse {
    /// The model's answer, verbatim.
    pub answer: String,
    /// Retrieved document texts, best first.
    pub sources: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{write_csv, MovieRecord};
    use crate::embedding::Embedder;
    use crate::index::{load_index, serialize_record};
    use crate::vector_store::VectorClient;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Puts anything mentioning Nolan or Inception on the same axis.
    struct NolanEmbedder;

    #[async_trait]
    impl Embedder for NolanEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let text = text.to_lowercase();
            let nolan = text.contains("nolan") || text.contains("inception");
            Ok(vec![nolan as u8 as f32, 1.0 - nolan as u8 as f32])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut out = Vec::new();
            for text in texts {
                out.push(self.embed(text).await?);
            }
            Ok(out)
        }

        fn dimensions(&self) -> usize {
            2
        }
    }

    #[derive(Default)]
    struct StubModel {
        seen: Mutex<Vec<PromptMessage>>,
    }

    #[async_trait]
    impl ChatModel for StubModel {
        async fn complete(&self, messages: &[PromptMessage]) -> Result<String> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            Ok("Inception (2010) is directed by Christopher Nolan.".to_string())
        }
    }

    #[tokio::test]
    async fn test_inception_end_to_end() {
        let inception = MovieRecord {
            title: "Inception".to_string(),
            rating: 8.8,
            vote_count: 2_500_000,
            meta_score: Some(74.0),
            year: 2010,
            duration: 148,
            age_restriction: "PG-13".to_string(),
            intro: "A thief who steals...".to_string(),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.csv");
        write_csv(&path, std::slice::from_ref(&inception)).unwrap();

        let embedder = Arc::new(NolanEmbedder);
        let client = VectorClient::new();
        let store = load_index(&path, embedder.as_ref(), &client, "movies").await.unwrap();

        let model = Arc::new(StubModel::default());
        let engine = RagEngine::new(
            Retriever::new(store, embedder),
            AnswerComposer::new(model.clone()),
        );

        let query = "movies directed by Christopher Nolan";
        let response = engine.ask(query).await.unwrap();

        let expected_doc = serialize_record(&inception).unwrap();
        assert_eq!(response.sources, vec![expected_doc.clone()]);
        assert_eq!(response.answer, "Inception (2010) is directed by Christopher Nolan.");

        let seen = model.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].content().ends_with(&expected_doc));
        assert_eq!(seen[1], PromptMessage::Human(query.to_string()));
    }
}
