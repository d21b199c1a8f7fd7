//! Conversational session over the RAG engine.

use crate::error::Result;
use crate::rag::RagEngine;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

/// An append-only conversation. Each turn is answered independently from
/// retrieved context; the transcript is kept for display only.
pub struct Session {
    engine: RagEngine,
    transcript: Vec<ConversationMessage>,
}

impl Session {
    pub fn new(engine: RagEngine) -> Self {
        Self {
            engine,
            transcript: Vec::new(),
        }
    }

    /// Answer one user message.
    ///
    /// The user message is recorded before answering. If answering fails the
    /// error is returned and no assistant message is recorded.
    #[instrument(skip(self), fields(turn = self.transcript.len() / 2 + 1))]
    pub async fn turn(&mut self, input: &str) -> Result<String> {
        self.transcript.push(ConversationMessage {
            role: Role::User,
            content: input.to_string(),
        });

        let response = self.engine.ask(input).await.inspect_err(|e| {
            warn!("Turn failed: {}", e);
        })?;

        self.transcript.push(ConversationMessage {
            role: Role::Assistant,
            content: response.answer.clone(),
        });

        Ok(response.answer)
    }

    /// Messages so far, oldest first.
    pub fn transcript(&self) -> &[ConversationMessage] {
        &self.transcript
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::Embedder;
    use crate::error::MarqueeError;
    use crate::rag::{AnswerComposer, ChatModel, PromptMessage, Retriever};
    use crate::vector_store::MemoryVectorStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct ConstantEmbedder;

    #[async_trait]
    impl Embedder for ConstantEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![1.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|_| vec![1.0]).collect())
        }

        fn dimensions(&self) -> usize {
            1
        }
    }

    /// Answers "answer N", failing on the call numbered `fail_on`.
    struct CountingModel {
        calls: AtomicUsize,
        fail_on: Option<usize>,
    }

    #[async_trait]
    impl ChatModel for CountingModel {
        async fn complete(&self, _messages: &[PromptMessage]) -> Result<String> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if Some(n) == self.fail_on {
                return Err(MarqueeError::OpenAI("unavailable".to_string()));
            }
            Ok(format!("answer {}", n))
        }
    }

    fn session(fail_on: Option<usize>) -> Session {
        let retriever = Retriever::new(
            Arc::new(MemoryVectorStore::new("movies")),
            Arc::new(ConstantEmbedder),
        );
        let composer = AnswerComposer::new(Arc::new(CountingModel {
            calls: AtomicUsize::new(0),
            fail_on,
        }));
        Session::new(RagEngine::new(retriever, composer))
    }

    #[test]
    fn test_turns_append_to_transcript() {
        let mut session = session(None);

        let first = tokio_test::block_on(session.turn("best heist movie?")).unwrap();
        let second = tokio_test::block_on(session.turn("and the longest?")).unwrap();

        assert_eq!(first, "answer 1");
        assert_eq!(second, "answer 2");

        let roles: Vec<Role> = session.transcript().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Assistant, Role::User, Role::Assistant]);
        assert_eq!(session.transcript()[2].content, "and the longest?");
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_user_message_only() {
        let mut session = session(Some(1));

        assert!(session.turn("hello?").await.is_err());
        assert_eq!(session.transcript().len(), 1);
        assert_eq!(session.transcript()[0].role, Role::User);

        // The session stays usable after a failed turn.
        assert_eq!(session.turn("again?").await.unwrap(), "answer 2");
        assert_eq!(session.transcript().len(), 3);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let message = ConversationMessage {
            role: Role::Assistant,
            content: "hi".to_string(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }
}
